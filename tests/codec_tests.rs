use pixpack::constants::{ALPHA, CHANNELS, OPAQUE};
use pixpack::image_io::{decode_png, encode_png, read_dimensions};
use pixpack::sentinel::data_pixels_for;
use pixpack::{Dimensions, PackError, RasterBuffer, pack, unpack, unpack_samples};
use rand::RngCore;

/// 一个辅助函数，用于生成指定长度的随机有效载荷
fn random_payload(len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    rand::rng().fill_bytes(&mut payload);
    payload
}

/// 测试中使用的若干小尺寸
const SMALL_DIMENSIONS: [(u32, u32); 6] = [(1, 1), (2, 1), (1, 2), (3, 3), (7, 5), (16, 9)];

#[test]
fn capacity_model_for_two_by_one() -> anyhow::Result<()> {
    let dims = Dimensions::new(2, 1)?;
    assert_eq!(dims.pixel_count(), 2);
    assert_eq!(dims.total_samples(), 8);
    assert_eq!(dims.capacity(), 3);
    Ok(())
}

#[test]
fn single_pixel_holds_only_the_empty_payload() -> anyhow::Result<()> {
    let dims = Dimensions::new(1, 1)?;
    assert_eq!(dims.capacity(), 0);

    let raster = pack(&[], dims)?;
    assert_eq!(raster.as_bytes(), &[0, 0, 0, 0]);
    assert!(unpack(&raster, dims)?.is_empty());

    assert!(matches!(
        pack(&[1], dims),
        Err(PackError::PayloadTooLarge {
            length: 1,
            capacity: 0
        })
    ));
    Ok(())
}

#[test]
fn zero_sized_dimensions_are_rejected() {
    assert!(matches!(
        Dimensions::new(0, 10),
        Err(PackError::DimensionsTooSmall {
            width: 0,
            height: 10
        })
    ));
    assert!(matches!(
        Dimensions::new(10, 0),
        Err(PackError::DimensionsTooSmall { .. })
    ));
}

#[test]
fn two_byte_payload_layout() -> anyhow::Result<()> {
    let dims = Dimensions::new(2, 1)?;
    let raster = pack(&[0x41, 0x42], dims)?;

    assert_eq!(raster.as_bytes(), &[0x41, 0x42, 0x00, 255, 0, 0, 0, 1]);
    assert_eq!(unpack(&raster, dims)?, vec![0x41, 0x42]);
    Ok(())
}

#[test]
fn empty_payload_layout() -> anyhow::Result<()> {
    let dims = Dimensions::new(2, 1)?;
    let raster = pack(&[], dims)?;

    assert_eq!(raster.as_bytes(), &[0u8; 8]);
    assert!(unpack(&raster, dims)?.is_empty());
    Ok(())
}

#[test]
fn exact_capacity_layout() -> anyhow::Result<()> {
    let dims = Dimensions::new(2, 1)?;
    let raster = pack(&[7, 8, 9], dims)?;

    assert_eq!(raster.as_bytes(), &[7, 8, 9, 255, 0, 0, 0, 0]);
    assert_eq!(unpack(&raster, dims)?, vec![7, 8, 9]);
    Ok(())
}

#[test]
fn round_trip_every_length_up_to_capacity() -> anyhow::Result<()> {
    for (width, height) in SMALL_DIMENSIONS {
        let dims = Dimensions::new(width, height)?;

        for len in 0..=dims.capacity() {
            let payload = random_payload(len);
            let raster = pack(&payload, dims)?;

            assert_eq!(raster.as_bytes().len(), dims.total_samples());
            assert_eq!(raster.pixel_count(), dims.pixel_count());
            assert_eq!(
                unpack(&raster, dims)?,
                payload,
                "round trip failed for {len} bytes in {dims}"
            );
        }
    }
    Ok(())
}

#[test]
fn one_byte_over_capacity_is_rejected() -> anyhow::Result<()> {
    for (width, height) in SMALL_DIMENSIONS {
        let dims = Dimensions::new(width, height)?;
        let capacity = dims.capacity();

        let result = pack(&random_payload(capacity + 1), dims);
        assert!(
            matches!(result, Err(PackError::PayloadTooLarge { length, capacity: c }) if length == capacity + 1 && c == capacity),
            "expected PayloadTooLarge for {dims}"
        );
    }
    Ok(())
}

#[test]
fn exactly_one_sentinel_right_after_the_data() -> anyhow::Result<()> {
    let dims = Dimensions::new(7, 5)?;

    for len in 0..=dims.capacity() {
        let raster = pack(&random_payload(len), dims)?;
        let translucent: Vec<usize> = raster
            .pixels()
            .enumerate()
            .filter(|(_, pixel)| pixel[ALPHA] != OPAQUE)
            .map(|(index, _)| index)
            .collect();

        let sentinel = data_pixels_for(len);
        assert_eq!(translucent.first(), Some(&sentinel));

        // 哨兵的颜色通道与其后的所有像素都为零
        let tail = &raster.as_bytes()[sentinel * CHANNELS..];
        assert_eq!(&tail[..ALPHA], &[0, 0, 0]);
        assert!(tail[CHANNELS..].iter().all(|&b| b == 0));
    }
    Ok(())
}

#[test]
fn only_one_pixel_is_not_opaque_when_the_raster_is_full() -> anyhow::Result<()> {
    let dims = Dimensions::new(4, 4)?;
    let raster = pack(&random_payload(dims.capacity()), dims)?;

    let translucent = raster.pixels().filter(|p| p[ALPHA] != OPAQUE).count();
    assert_eq!(translucent, 1);
    Ok(())
}

#[test]
fn pack_and_unpack_are_deterministic() -> anyhow::Result<()> {
    let dims = Dimensions::new(16, 9)?;
    let payload = random_payload(200);

    let first = pack(&payload, dims)?;
    let second = pack(&payload, dims)?;
    assert_eq!(first, second);
    assert_eq!(unpack(&first, dims)?, unpack(&second, dims)?);
    Ok(())
}

#[test]
fn all_opaque_raster_has_no_sentinel() -> anyhow::Result<()> {
    let dims = Dimensions::new(3, 3)?;
    let mut samples = pack(&random_payload(10), dims)?.into_samples();
    samples
        .chunks_exact_mut(CHANNELS)
        .for_each(|pixel| pixel[ALPHA] = OPAQUE);

    let raster = RasterBuffer::from_samples(samples, dims)?;
    assert!(matches!(
        unpack(&raster, dims),
        Err(PackError::SentinelNotFound)
    ));
    Ok(())
}

#[test]
fn out_of_range_slack_is_reported_as_corruption() -> anyhow::Result<()> {
    let dims = Dimensions::new(2, 1)?;

    let samples = [1, 2, 3, 255, 0, 0, 0, 7];
    assert!(matches!(
        unpack_samples(&samples, dims),
        Err(PackError::CorruptSentinel { index: 1, slack: 7 })
    ));

    // 没有数据像素时 slack 只能为 0
    let samples = [0, 0, 0, 2, 0, 0, 0, 0];
    assert!(matches!(
        unpack_samples(&samples, dims),
        Err(PackError::CorruptSentinel { index: 0, slack: 2 })
    ));
    Ok(())
}

#[test]
fn wrong_buffer_length_is_a_dimension_mismatch() -> anyhow::Result<()> {
    let dims = Dimensions::new(2, 2)?;

    assert!(matches!(
        unpack_samples(&[0u8; 12], dims),
        Err(PackError::DimensionMismatch {
            expected: 16,
            actual: 12
        })
    ));
    assert!(matches!(
        RasterBuffer::from_samples(vec![0u8; 20], dims),
        Err(PackError::DimensionMismatch {
            expected: 16,
            actual: 20
        })
    ));
    Ok(())
}

#[test]
fn survives_premultiplication_of_translucent_pixels() -> anyhow::Result<()> {
    let dims = Dimensions::new(8, 8)?;
    let payload = random_payload(100);
    let mut samples = pack(&payload, dims)?.into_samples();

    // 模拟编解码器对所有像素做 alpha 预乘再反预乘
    for pixel in samples.chunks_exact_mut(CHANNELS) {
        let alpha = u16::from(pixel[ALPHA]);
        for channel in &mut pixel[..ALPHA] {
            let premultiplied = u16::from(*channel) * alpha / 255;
            *channel = if alpha == 0 {
                0
            } else {
                (premultiplied * 255 / alpha).min(255) as u8
            };
        }
    }

    assert_eq!(unpack_samples(&samples, dims)?, payload);
    Ok(())
}

#[test]
fn png_round_trip() -> anyhow::Result<()> {
    let dims = Dimensions::new(64, 48)?;

    for len in [0, 1, 2, 3, 1000, dims.capacity()] {
        let payload = random_payload(len);
        let png = encode_png(&pack(&payload, dims)?, dims)?;

        assert_eq!(read_dimensions(&png)?, dims);

        let raster = decode_png(&png, dims)?;
        assert_eq!(unpack(&raster, dims)?, payload);
    }
    Ok(())
}

#[test]
fn decoding_with_other_dimensions_is_a_mismatch() -> anyhow::Result<()> {
    let dims = Dimensions::new(10, 10)?;
    let png = encode_png(&pack(b"hello", dims)?, dims)?;

    let result = decode_png(&png, Dimensions::new(20, 10)?);
    assert!(matches!(
        result,
        Err(PackError::DimensionMismatch {
            expected: 800,
            actual: 400
        })
    ));
    Ok(())
}

#[test]
fn fitting_dimensions_hold_the_payload() -> anyhow::Result<()> {
    for len in 0..500 {
        let dims = Dimensions::fitting(len)?;
        assert!(dims.capacity() >= len, "{dims} cannot hold {len} bytes");
        assert_eq!(unpack(&pack(&random_payload(len), dims)?, dims)?.len(), len);
    }

    assert_eq!(Dimensions::fitting(0)?, Dimensions::new(1, 1)?);
    Ok(())
}
