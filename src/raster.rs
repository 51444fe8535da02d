//! # 光栅缓冲区模块
//!
//! `RasterBuffer` 是 RGBA8 样本的定长序列，长度恒为 `4 × 像素数`。
//! 只能通过 `zeroed` 或经过长度校验的 `from_samples` 构造。

use crate::capacity::Dimensions;
use crate::constants::CHANNELS;
use crate::error::PackError;

/// 按 R, G, B, A 顺序排列的像素样本缓冲区。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    samples: Vec<u8>,
}

impl RasterBuffer {
    /// 创建全零的缓冲区。
    pub fn zeroed(dims: Dimensions) -> Self {
        Self {
            samples: vec![0u8; dims.total_samples()],
        }
    }

    /// 接管一段已有的样本，长度必须与尺寸一致。
    ///
    /// # Errors
    ///
    /// 长度不等于 `dims.total_samples()` 时返回 `DimensionMismatch`。
    pub fn from_samples(samples: Vec<u8>, dims: Dimensions) -> Result<Self, PackError> {
        if samples.len() != dims.total_samples() {
            return Err(PackError::DimensionMismatch {
                expected: dims.total_samples(),
                actual: samples.len(),
            });
        }

        Ok(Self { samples })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    pub fn pixel_count(&self) -> usize {
        self.samples.len() / CHANNELS
    }

    /// 以 4 样本窗口遍历像素。
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(CHANNELS)
    }

    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.samples.chunks_exact_mut(CHANNELS)
    }
}
