// SPDX-License-Identifier: MPL-2.0

//! End-to-end tests for enhancement and gallery filters

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, Rgba32FImage};
use momento::pipelines::photo::{EncodingFormat, EncodingQuality};
use momento::{Enhancer, FilterType, PhotoEncoder, PipelineError, StylePipeline};
use std::io::Cursor;

fn solid_gray() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([128, 128, 128])))
}

fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_bay_days_darkens_and_cools_gray() {
    let output = StylePipeline::new()
        .apply(&solid_gray(), FilterType::BayDays)
        .unwrap();

    assert_eq!((output.width(), output.height()), (4, 4));
    for pixel in output.to_rgb8().pixels() {
        let [r, g, b] = pixel.0;
        assert!(r < 128 && g < 128 && b < 128, "expected darker: {:?}", pixel);
        assert!(b > r && b > g, "expected a blue cast: {:?}", pixel);
    }
}

#[test]
fn test_bay_days_float_gray_stays_in_bounds() {
    let gray = DynamicImage::ImageRgba32F(Rgba32FImage::from_pixel(
        4,
        4,
        Rgba([0.5, 0.5, 0.5, 1.0]),
    ));
    let output = StylePipeline::new().apply(&gray, FilterType::BayDays).unwrap();

    let DynamicImage::ImageRgba32F(buffer) = output else {
        panic!("bayDays changed the sample format");
    };
    assert_eq!(buffer.dimensions(), (4, 4));
    for pixel in buffer.pixels() {
        let [r, g, b, a] = pixel.0;
        for v in [r, g, b, a] {
            assert!((0.0..=1.0).contains(&v), "sample out of bounds: {:?}", pixel);
        }
        assert!(r < 0.5 && g < 0.5 && b < 0.5, "expected darker: {:?}", pixel);
        assert!(b > r && b > g, "expected a blue cast: {:?}", pixel);
        assert_eq!(a, 1.0);
    }
}

#[test]
fn test_none_rejects_garbage_bytes() {
    let result = StylePipeline::new().apply_to_bytes(
        b"not an image",
        FilterType::None,
        &PhotoEncoder::new(),
    );
    assert!(matches!(result, Err(PipelineError::Decode(_))));
}

#[test]
fn test_float_output_stays_in_unit_range() {
    let image = DynamicImage::ImageRgba32F(Rgba32FImage::from_fn(8, 8, |x, y| {
        Rgba([x as f32 / 7.0, y as f32 / 7.0, 1.0, 1.0])
    }));

    for filter in FilterType::ALL {
        let output = StylePipeline::new().apply(&image, filter).unwrap();
        let DynamicImage::ImageRgba32F(buffer) = output else {
            panic!("{} changed the sample format", filter);
        };
        assert!(
            buffer.pixels().flat_map(|p| p.0).all(|v| (0.0..=1.0).contains(&v)),
            "{} produced out-of-range samples",
            filter
        );
    }
}

#[test]
fn test_none_returns_identical_bytes() {
    let bytes = png_bytes(&solid_gray());
    let output = StylePipeline::new()
        .apply_to_bytes(&bytes, FilterType::None, &PhotoEncoder::new())
        .unwrap();
    assert_eq!(output, bytes);
}

#[test]
fn test_unknown_name_is_unfiltered() {
    let image = solid_gray();
    let output = StylePipeline::new().apply_named(&image, "polaroid").unwrap();
    assert_eq!(output, image);
}

#[test]
fn test_filtered_bytes_encode_in_requested_format() {
    let encoder = PhotoEncoder::with_format(EncodingFormat::Png, EncodingQuality::High);
    let output = StylePipeline::new()
        .apply_to_bytes(&png_bytes(&solid_gray()), FilterType::Noir, &encoder)
        .unwrap();

    assert_eq!(image::guess_format(&output).unwrap(), ImageFormat::Png);
    let decoded = PhotoEncoder::decode(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn test_corrupt_bytes_report_decode_error() {
    let result = StylePipeline::new().apply_to_bytes(
        b"not an image",
        FilterType::SummerSky,
        &PhotoEncoder::new(),
    );
    assert!(matches!(result, Err(PipelineError::Decode(_))));
}

#[test]
fn test_enhancer_never_loses_a_capture() {
    let enhancer = Enhancer::new();
    let encoder = PhotoEncoder::new();

    let garbage = b"\xff\xd8 truncated".to_vec();
    assert_eq!(enhancer.process_bytes(&garbage, &encoder), garbage);

    let enhanced = enhancer.process_bytes(&png_bytes(&solid_gray()), &encoder);
    let decoded = PhotoEncoder::decode(&enhanced).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn test_filters_are_deterministic() {
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(16, 10, |x, y| {
        Rgb([(x * 15) as u8, (y * 25) as u8, 90])
    }));
    let pipeline = StylePipeline::new();
    for filter in FilterType::ALL {
        let first = pipeline.apply(&image, filter).unwrap();
        let second = pipeline.apply(&image, filter).unwrap();
        assert_eq!(first, second, "{} is not deterministic", filter);
    }
}
