/// 每个像素的通道数 (R, G, B, A)。
pub const CHANNELS: usize = 4;

/// 每个像素中用于承载数据的通道数 (R, G, B)。
pub const DATA_CHANNELS: usize = 3;

/// 完全不透明的 alpha 值。
/// 数据像素的 alpha 必须为此值，否则图像编解码器的 alpha 预乘会破坏颜色通道。
pub const OPAQUE: u8 = 255;

/// 为哨兵像素永久保留的 R/G/B 槽位数。
/// 正好是一个像素的数据通道，保证有效载荷写满时仍有一个像素可作为哨兵。
pub const SENTINEL_RESERVE: usize = DATA_CHANNELS;

/// 未指定尺寸时使用的默认图像宽度。
pub const DEFAULT_WIDTH: u32 = 854;

/// 未指定尺寸时使用的默认图像高度。
pub const DEFAULT_HEIGHT: u32 = 480;

/// 打包后图像文件的扩展名。
pub const PACKED_EXTENSION: &str = ".packed.png";

/// 解包后默认输出文件名的前缀。
pub const UNPACKED_PREFIX: &str = "unpacked_";

/// 像素内 alpha 通道的偏移。
pub const ALPHA: usize = 3;
