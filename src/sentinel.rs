//! 哨兵像素的 slack 算术，打包与解包共用同一套公式。

use crate::constants::DATA_CHANNELS;

/// slack 的最大合法值：最后一个数据像素至少承载 1 字节。
pub const MAX_SLACK: u8 = (DATA_CHANNELS - 1) as u8;

/// 承载 `len` 字节所需的数据像素数，同时也是哨兵像素的索引。
pub fn data_pixels_for(len: usize) -> usize {
    len.div_ceil(DATA_CHANNELS)
}

/// 最后一个数据像素中未使用的 R/G/B 槽位数。
pub fn slack_for(len: usize) -> u8 {
    // 结果必然落在 [0, MAX_SLACK]
    (data_pixels_for(len) * DATA_CHANNELS - len) as u8
}

/// 由哨兵索引和 slack 还原有效载荷长度。
///
/// slack 超出范围，或者索引为 0 时 slack 非零，都返回 `None`。
pub fn payload_len(sentinel_index: usize, slack: u8) -> Option<usize> {
    if slack > MAX_SLACK {
        return None;
    }

    (sentinel_index * DATA_CHANNELS).checked_sub(usize::from(slack))
}
