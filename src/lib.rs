//! # pixpack 库
//!
//! 本库包含把二进制数据打包进 PNG 图像的核心逻辑。
//! 数据只写入 R/G/B 通道，数据像素的 alpha 恒为 255，
//! 紧随其后的哨兵像素用 alpha 记录 slack，以便还原精确长度。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod image_io;
pub mod logger;
pub mod packing;
pub mod raster;
pub mod sentinel;

pub use capacity::Dimensions;
pub use error::PackError;
pub use packing::{pack, unpack, unpack_samples};
pub use raster::RasterBuffer;
