//! # 容量模型模块
//!
//! 由图像宽高推导出样本总数与可打包的最大有效载荷长度。
//! `Dimensions` 是打包器与解包器共享的唯一配置值，在构造时完成校验，之后不可变。

use crate::constants::{CHANNELS, DATA_CHANNELS, SENTINEL_RESERVE};
use crate::error::PackError;

/// 经过校验的光栅尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
    pixel_count: usize,
}

impl Dimensions {
    /// 校验宽高并构造尺寸。
    ///
    /// # Errors
    ///
    /// * 任一边为 0 时返回 `DimensionsTooSmall`，此时没有像素可以容纳哨兵。
    /// * 像素数或样本数超出 `usize` 范围时返回 `DimensionsTooLarge`。
    pub fn new(width: u32, height: u32) -> Result<Self, PackError> {
        if width == 0 || height == 0 {
            return Err(PackError::DimensionsTooSmall { width, height });
        }

        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .filter(|count| count.checked_mul(CHANNELS).is_some())
            .ok_or(PackError::DimensionsTooLarge { width, height })?;

        Ok(Self {
            width,
            height,
            pixel_count,
        })
    }

    /// 能够容纳 `len` 字节有效载荷的最小近似正方形尺寸。
    pub fn fitting(len: usize) -> Result<Self, PackError> {
        let too_large = || PackError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        };

        // 数据像素之后还需要一个哨兵像素
        let pixels = len
            .div_ceil(DATA_CHANNELS)
            .checked_add(1)
            .ok_or_else(too_large)?;

        let root = pixels.isqrt();
        let width = if root * root < pixels { root + 1 } else { root };
        let height = pixels.div_ceil(width);

        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) => Self::new(width, height),
            _ => Err(too_large()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 像素总数 `W × H`。
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// 光栅缓冲区的样本总数 `W × H × 4`。
    pub fn total_samples(&self) -> usize {
        self.pixel_count * CHANNELS
    }

    /// 可打包的最大有效载荷字节数。
    ///
    /// 保留一个像素的 R/G/B 槽位给哨兵，因此写满容量时哨兵仍然落在最后一个像素上。
    pub fn capacity(&self) -> usize {
        self.pixel_count * DATA_CHANNELS - SENTINEL_RESERVE
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
