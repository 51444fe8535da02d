//! # 图像编解码模块
//!
//! 通过 `image` crate 在光栅缓冲区与 PNG 字节之间转换。
//! PNG 保存的是未预乘的 alpha，因此 alpha 为 255 的像素在往返中 R/G/B 保持不变。

use crate::capacity::Dimensions;
use crate::error::PackError;
use crate::raster::RasterBuffer;
use image::{ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;

/// 将光栅缓冲区编码为 RGBA8 PNG。
///
/// # Errors
///
/// * 缓冲区长度与尺寸不符时返回 `DimensionMismatch`。
/// * PNG 编码失败时返回 `Image`。
pub fn encode_png(raster: &RasterBuffer, dims: Dimensions) -> Result<Vec<u8>, PackError> {
    let actual = raster.as_bytes().len();
    let image = RgbaImage::from_raw(dims.width(), dims.height(), raster.as_bytes().to_vec())
        .ok_or(PackError::DimensionMismatch {
            expected: dims.total_samples(),
            actual,
        })?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

    log::debug!("encoded {} raster into {} PNG bytes", dims, bytes.len());

    Ok(bytes)
}

/// 将 PNG 解码为光栅缓冲区。
///
/// 任何颜色类型的 PNG 都会被转换为 RGBA8。
///
/// # Errors
///
/// * PNG 解码失败时返回 `Image`。
/// * 图像尺寸与 `dims` 不符时返回 `DimensionMismatch`。
pub fn decode_png(bytes: &[u8], dims: Dimensions) -> Result<RasterBuffer, PackError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();

    log::debug!(
        "decoded {}x{} PNG, expecting {}",
        image.width(),
        image.height(),
        dims
    );

    RasterBuffer::from_samples(image.into_raw(), dims)
}

/// 只读取 PNG 头部中的宽高，不解码像素。
pub fn read_dimensions(bytes: &[u8]) -> Result<Dimensions, PackError> {
    let (width, height) =
        ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png).into_dimensions()?;

    Dimensions::new(width, height)
}
