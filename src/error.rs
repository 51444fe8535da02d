//! # 错误类型模块
//!
//! 库内所有操作共用的错误类型。命令行层会把它转换为 `anyhow::Error` 并附加上下文。

/// 打包、解包以及图像编解码过程中可能出现的错误。
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PackError {
    #[error("payload too large: {length} bytes exceeds capacity of {capacity} bytes")]
    PayloadTooLarge { length: usize, capacity: usize },

    #[error("dimensions too small: {width}x{height} leaves no room for the sentinel pixel")]
    DimensionsTooSmall { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("raster size mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("sentinel pixel not found: every pixel is opaque")]
    SentinelNotFound,

    #[error("corrupt sentinel at pixel {index}: slack value {slack} is out of range")]
    CorruptSentinel { index: usize, slack: u8 },

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}
