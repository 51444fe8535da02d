//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use clap::Parser;
use std::path::PathBuf;

/// 把任意二进制文件无损地打包进 PNG 图像，或从打包后的图像中还原文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "把任意二进制文件无损地打包进 PNG 图像的 R/G/B 通道，或从打包后的图像中还原文件。数据像素的 alpha 恒为 255，不受 alpha 预乘影响。"
)]
pub struct Cli {
    /// 输出调试日志。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：pack (打包) 和 unpack (解包)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文件打包为 PNG 图像。
    Pack(PackArgs),

    /// 从打包后的 PNG 图像中还原文件。
    Unpack(UnpackArgs),
}

/// 'pack' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// 要打包的输入文件路径。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 输出图像路径，默认为输入文件旁的 `<文件名>.packed.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出图像宽度 (像素)。
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// 输出图像高度 (像素)。
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// 根据输入文件大小自动选择最小的图像尺寸。
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub auto_size: bool,

    /// 写入后重新解包图像，并确认结果与输入一致。
    #[arg(short, long)]
    pub check: bool,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'unpack' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct UnpackArgs {
    /// 打包后的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 还原文件的输出路径，默认为图像旁的 `unpacked_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 图像宽度；省略时从 PNG 头部读取。
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// 图像高度；省略时从 PNG 头部读取。
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
