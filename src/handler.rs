//! # 命令处理逻辑模块
//!
//! 包含处理 `pack` 和 `unpack` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心打包算法以及向用户报告结果。

use crate::capacity::Dimensions;
use crate::cli::{PackArgs, UnpackArgs};
use crate::constants::{PACKED_EXTENSION, UNPACKED_PREFIX};
use crate::image_io::{decode_png, encode_png, read_dimensions};
use crate::packing::{pack, unpack};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Pack' 命令的执行逻辑。
///
/// 负责读取输入文件、确定图像尺寸并检查容量、调用打包函数生成光栅，
/// 将其编码为 PNG 写入目标路径，并在需要时回读校验。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与图像尺寸的 `PackArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入文件。
/// * 图像尺寸非法，或图像没有足够的空间容纳输入文件。
/// * 目标文件已存在且未指定 `--force`。
/// * PNG 编码失败或无法写入目标文件。
/// * 指定了 `--check` 而回读的数据与输入不一致。
pub fn handle_pack(args: PackArgs) -> Result<()> {
    let payload = fs::read(&args.input).with_context(|| {
        format!(
            "Unable to read input file: {}",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    let dims = if args.auto_size {
        Dimensions::fitting(payload.len())
    } else {
        Dimensions::new(args.width, args.height)
    }
    .with_context(|| "Invalid image dimensions.")?;

    let capacity = dims.capacity();
    log::debug!(
        "packing {} bytes into {} (capacity {})",
        payload.len(),
        dims,
        capacity
    );

    anyhow::ensure!(
        payload.len() <= capacity,
        "Not enough space in the image to pack the file. \nRequired: {}, Available: {}",
        payload.len().to_string().red().bold(),
        capacity.to_string().green().bold()
    );

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_packed_path(&args.input));
    ensure_writable(&dest, args.force)?;

    let raster = pack(&payload, dims).with_context(|| {
        format!(
            "Failed to pack {} into a {} image.",
            args.input.to_string_lossy().red().bold(),
            dims.to_string().red().bold()
        )
    })?;

    let png = encode_png(&raster, dims).with_context(|| "Failed to encode the packed image as PNG.")?;

    fs::write(&dest, png).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully packed and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    if args.check {
        check_packed(&dest, dims, &payload)?;
    }

    Ok(())
}

/// 处理 'Unpack' 命令的执行逻辑。
///
/// 负责读取打包后的图像、确定尺寸、解码 PNG 并还原有效载荷，
/// 最后将结果写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `UnpackArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取图像文件，或无法从中确定尺寸。
/// * 无法推导默认输出路径，或目标文件已存在且未指定 `--force`。
/// * 图像不是由本工具打包的，或已被损坏。
/// * 无法写入到目标文件。
pub fn handle_unpack(args: UnpackArgs) -> Result<()> {
    let picture = fs::read(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let dims = match (args.width, args.height) {
        (Some(width), Some(height)) => Dimensions::new(width, height),
        _ => read_dimensions(&picture),
    }
    .with_context(|| {
        format!(
            "Unable to determine the dimensions of '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let dest = match &args.dest {
        Some(dest) => dest.clone(),
        None => default_unpacked_path(&args.image)?,
    };
    ensure_writable(&dest, args.force)?;

    let raster = decode_png(&picture, dims).with_context(|| {
        format!(
            "Failed to decode '{}' as a {} PNG image.",
            args.image.to_string_lossy().red().bold(),
            dims.to_string().red().bold()
        )
    })?;

    let payload = unpack(&raster, dims).with_context(|| {
        format!(
            "Failed to unpack '{}'. \nThe image may not contain a packed file or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    log::debug!("recovered {} bytes from {}", payload.len(), dims);

    fs::write(&dest, payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully unpacked and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 打包输出的默认路径：输入文件旁的 `<文件名>.packed.png`。
pub fn default_packed_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string());

    input.with_file_name(format!("{name}{PACKED_EXTENSION}"))
}

/// 解包输出的默认路径：图像旁的 `unpacked_<去掉 .packed.png 的文件名>`。
///
/// # Errors
///
/// 图像文件名不以 `.packed.png` 结尾时无法推导，返回错误。
pub fn default_unpacked_path(image: &Path) -> Result<PathBuf> {
    let stem = image
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(PACKED_EXTENSION))
        .filter(|stem| !stem.is_empty())
        .with_context(|| {
            format!(
                "Cannot derive an output path: image file must end with {}. \nUse --dest to choose one.",
                PACKED_EXTENSION.red().bold()
            )
        })?;

    Ok(image.with_file_name(format!("{UNPACKED_PREFIX}{stem}")))
}

fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 回读刚写入的图像并与原始输入比较。
fn check_packed(dest: &Path, dims: Dimensions, expected: &[u8]) -> Result<()> {
    let written = fs::read(dest).with_context(|| {
        format!(
            "Unable to read back image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    let raster = decode_png(&written, dims).with_context(|| "Failed to decode the written image.")?;
    let recovered = unpack(&raster, dims).with_context(|| "Failed to unpack the written image.")?;

    anyhow::ensure!(
        recovered == expected,
        "Buffers do not match. \nPacked: {} bytes, Recovered: {} bytes",
        expected.len().to_string().green().bold(),
        recovered.len().to_string().red().bold()
    );

    println!("{}", "Buffers match".green().bold());

    Ok(())
}
