//! # 打包 / 解包模块
//!
//! 把有效载荷逐 3 字节写入像素的 R/G/B 通道，并把每个数据像素的 alpha 置为 255，
//! 使编解码器的 alpha 预乘不会改变颜色样本。紧随最后一个数据像素的是哨兵像素，
//! 它的 alpha 记录 slack，解包时据此还原精确长度。

use crate::capacity::Dimensions;
use crate::constants::{ALPHA, CHANNELS, DATA_CHANNELS, OPAQUE};
use crate::error::PackError;
use crate::raster::RasterBuffer;
use crate::sentinel::{data_pixels_for, payload_len, slack_for};

/// 将有效载荷打包为新的光栅缓冲区。
///
/// # Errors
///
/// 有效载荷超过 `dims.capacity()` 时返回 `PayloadTooLarge`。
pub fn pack(payload: &[u8], dims: Dimensions) -> Result<RasterBuffer, PackError> {
    let capacity = dims.capacity();
    if payload.len() > capacity {
        return Err(PackError::PayloadTooLarge {
            length: payload.len(),
            capacity,
        });
    }

    let mut raster = RasterBuffer::zeroed(dims);
    let slack = slack_for(payload.len());
    {
        let mut pixels = raster.pixels_mut();

        // 有效载荷在前：zip 先耗尽它，不会多消耗一个像素
        for (group, pixel) in payload.chunks(DATA_CHANNELS).zip(pixels.by_ref()) {
            pixel[..group.len()].copy_from_slice(group);
            pixel[ALPHA] = OPAQUE;
        }

        let sentinel = pixels.next().ok_or(PackError::PayloadTooLarge {
            length: payload.len(),
            capacity,
        })?;
        sentinel[ALPHA] = slack;
    }

    log::trace!(
        "packed {} bytes into {} ({} data pixels, slack {})",
        payload.len(),
        dims,
        data_pixels_for(payload.len()),
        slack
    );

    Ok(raster)
}

/// 从光栅缓冲区还原有效载荷。
///
/// # Errors
///
/// * 缓冲区长度与尺寸不符时返回 `DimensionMismatch`。
/// * 所有像素均不透明时返回 `SentinelNotFound`。
/// * 哨兵记录的 slack 不合法时返回 `CorruptSentinel`。
pub fn unpack(raster: &RasterBuffer, dims: Dimensions) -> Result<Vec<u8>, PackError> {
    unpack_samples(raster.as_bytes(), dims)
}

/// 与 [`unpack`] 相同，但直接读取原始 RGBA 样本切片。
pub fn unpack_samples(samples: &[u8], dims: Dimensions) -> Result<Vec<u8>, PackError> {
    if samples.len() != dims.total_samples() {
        return Err(PackError::DimensionMismatch {
            expected: dims.total_samples(),
            actual: samples.len(),
        });
    }

    let mut payload = Vec::with_capacity(dims.capacity());
    let mut sentinel = None;

    for (index, pixel) in samples.chunks_exact(CHANNELS).enumerate() {
        if pixel[ALPHA] != OPAQUE {
            sentinel = Some((index, pixel[ALPHA]));
            break;
        }
        payload.extend_from_slice(&pixel[..DATA_CHANNELS]);
    }

    let (index, slack) = sentinel.ok_or(PackError::SentinelNotFound)?;
    let len = payload_len(index, slack).ok_or(PackError::CorruptSentinel { index, slack })?;
    payload.truncate(len);

    log::trace!("sentinel at pixel {index} with slack {slack}, recovered {len} bytes");

    Ok(payload)
}
