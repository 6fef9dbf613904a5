// SPDX-License-Identifier: MPL-2.0

//! Transform chain runner and the gallery filter pipeline

use super::FilterType;
use super::transform::TransformKind;
use crate::errors::{PipelineError, PipelineResult};
use crate::pipelines::photo::PhotoEncoder;
use image::{ColorType, DynamicImage, Rgba32FImage};
use tracing::{debug, info};

/// Run `chain` left to right, each stage consuming the previous stage's output
pub fn run_chain(image: Rgba32FImage, chain: &[TransformKind]) -> PipelineResult<Rgba32FImage> {
    chain
        .iter()
        .try_fold(image, |image, stage| stage.apply(image))
}

/// Whether every stage of `chain` is a pass-through
pub fn is_identity_chain(chain: &[TransformKind]) -> bool {
    chain.iter().all(TransformKind::is_identity)
}

/// Copy an image into the floating-point working representation
pub(crate) fn to_working(image: &DynamicImage) -> PipelineResult<Rgba32FImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::Decode(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(image.to_rgba32f())
}

/// Clamp a working buffer and convert it back to the sample depth of `source`
///
/// Alpha is kept only when the source had it. Grayscale sources come back as
/// RGB since tints add chroma.
pub(crate) fn from_working(mut working: Rgba32FImage, source: ColorType) -> DynamicImage {
    for pixel in working.pixels_mut() {
        for sample in pixel.0.iter_mut() {
            *sample = if sample.is_nan() {
                0.0
            } else {
                sample.clamp(0.0, 1.0)
            };
        }
    }

    let bytes_per_channel = source.bytes_per_pixel() / source.channel_count();
    let working = DynamicImage::ImageRgba32F(working);
    match (bytes_per_channel, source.has_alpha()) {
        (1, false) => DynamicImage::ImageRgb8(working.to_rgb8()),
        (1, true) => DynamicImage::ImageRgba8(working.to_rgba8()),
        (2, false) => DynamicImage::ImageRgb16(working.to_rgb16()),
        (2, true) => DynamicImage::ImageRgba16(working.to_rgba16()),
        (_, false) => DynamicImage::ImageRgb32F(working.to_rgb32f()),
        (_, true) => working,
    }
}

/// Apply a transform chain to a decoded image without touching the input
pub(crate) fn apply_chain(
    image: &DynamicImage,
    chain: &[TransformKind],
) -> PipelineResult<DynamicImage> {
    if is_identity_chain(chain) {
        return Ok(image.clone());
    }
    let working = run_chain(to_working(image)?, chain)?;
    Ok(from_working(working, image.color()))
}

/// Applies the named gallery filters
///
/// Stateless; safe to share across threads and call concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct StylePipeline;

impl StylePipeline {
    pub fn new() -> Self {
        Self
    }

    /// Apply `filter` to `image`, returning a new image of the same dimensions
    ///
    /// `FilterType::None` returns an exact copy of the input.
    pub fn apply(&self, image: &DynamicImage, filter: FilterType) -> PipelineResult<DynamicImage> {
        debug!(
            filter = %filter,
            width = image.width(),
            height = image.height(),
            "Applying filter"
        );
        apply_chain(image, filter.recipe())
    }

    /// Apply a filter by name; unknown names fall back to no filter
    pub fn apply_named(&self, image: &DynamicImage, name: &str) -> PipelineResult<DynamicImage> {
        self.apply(image, FilterType::from_name(name))
    }

    /// Decode `data`, apply `filter` and encode the result with `encoder`
    ///
    /// With no filter the input bytes are returned as they are, without a
    /// decode/encode round trip. They must still look like a supported image.
    pub fn apply_to_bytes(
        &self,
        data: &[u8],
        filter: FilterType,
        encoder: &PhotoEncoder,
    ) -> PipelineResult<Vec<u8>> {
        if is_identity_chain(filter.recipe()) {
            image::guess_format(data)?;
            return Ok(data.to_vec());
        }

        let image = PhotoEncoder::decode(data)?;
        let filtered = self.apply(&image, filter)?;
        let encoded = encoder.encode(&filtered)?;

        info!(
            filter = %filter,
            size = encoded.data.len(),
            "Filtered photo encoded"
        );
        Ok(encoded.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Rgb, WhitePoint};
    use image::{GrayImage, Luma, Rgb as RgbPixel, RgbImage, Rgba, RgbaImage};

    fn sample_photo() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(12, 9, |x, y| {
            RgbPixel([(x * 21) as u8, (y * 28) as u8, ((x + y) * 12) as u8])
        }))
    }

    #[test]
    fn test_none_returns_identical_image() {
        let pipeline = StylePipeline::new();
        let photo = sample_photo();
        assert_eq!(pipeline.apply(&photo, FilterType::None).unwrap(), photo);
    }

    #[test]
    fn test_dimensions_preserved_for_every_filter() {
        let pipeline = StylePipeline::new();
        let photo = sample_photo();
        for filter in FilterType::ALL {
            let out = pipeline.apply(&photo, filter).unwrap();
            assert_eq!(
                (out.width(), out.height()),
                (photo.width(), photo.height()),
                "{}",
                filter
            );
        }
    }

    #[test]
    fn test_filters_are_deterministic() {
        let pipeline = StylePipeline::new();
        let photo = sample_photo();
        for filter in FilterType::ALL {
            let first = pipeline.apply(&photo, filter).unwrap();
            let second = pipeline.apply(&photo, filter).unwrap();
            assert_eq!(first, second, "{} is not deterministic", filter);
        }
    }

    #[test]
    fn test_run_chain_is_left_to_right() {
        let input = Rgba32FImage::from_pixel(1, 1, Rgba([0.5, 0.5, 0.5, 1.0]));
        let brighten = TransformKind::ColorAdjust {
            brightness: 0.2,
            contrast: 1.0,
            saturation: 1.0,
        };
        let contrast = TransformKind::ColorAdjust {
            brightness: 0.0,
            contrast: 2.0,
            saturation: 1.0,
        };

        let a = run_chain(input.clone(), &[brighten, contrast]).unwrap();
        let b = run_chain(input, &[contrast, brighten]).unwrap();
        // (0.7 - 0.5) * 2 + 0.5 versus (0.5 - 0.5) * 2 + 0.5 + 0.2
        assert!((a.get_pixel(0, 0)[0] - 0.9).abs() < 1e-5);
        assert!((b.get_pixel(0, 0)[0] - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_intermediate_values_are_not_clamped() {
        let input = Rgba32FImage::from_pixel(1, 1, Rgba([0.9, 0.9, 0.9, 1.0]));
        let chain = [
            TransformKind::ColorAdjust {
                brightness: 0.5,
                contrast: 1.0,
                saturation: 1.0,
            },
            TransformKind::ColorAdjust {
                brightness: -0.5,
                contrast: 1.0,
                saturation: 1.0,
            },
        ];
        let out = run_chain(input, &chain).unwrap();
        assert!((out.get_pixel(0, 0)[0] - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_output_keeps_alpha_and_depth() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([200, 80, 40, 128])));
        let out = StylePipeline::new().apply(&rgba, FilterType::Noir).unwrap();
        assert_eq!(out.color(), ColorType::Rgba8);
        assert_eq!(out.as_rgba8().unwrap().get_pixel(1, 1)[3], 128);
    }

    #[test]
    fn test_grayscale_input_comes_back_as_rgb() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([128])));
        let out = StylePipeline::new().apply(&gray, FilterType::BayDays).unwrap();
        assert_eq!(out.color(), ColorType::Rgb8);
        let p = out.as_rgb8().unwrap().get_pixel(0, 0);
        assert!(p[2] > p[0]);
    }

    #[test]
    fn test_noir_is_grayscale() {
        let out = StylePipeline::new()
            .apply(&sample_photo(), FilterType::Noir)
            .unwrap();
        for p in out.as_rgb8().unwrap().pixels() {
            assert!(p[0].abs_diff(p[1]) <= 1 && p[1].abs_diff(p[2]) <= 1, "{:?}", p);
        }
    }

    #[test]
    fn test_summer_sky_brightens_and_warms() {
        let gray = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, RgbPixel([120, 120, 120])));
        let out = StylePipeline::new().apply(&gray, FilterType::SummerSky).unwrap();
        let p = out.as_rgb8().unwrap().get_pixel(0, 0);
        assert!(p[1] > 120);
        assert!(p[0] > p[2]);
    }

    #[test]
    fn test_suburbia_darkens_corners_more_than_center() {
        let gray = DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 9, RgbPixel([160, 160, 160])));
        let out = StylePipeline::new().apply(&gray, FilterType::Suburbia).unwrap();
        let out = out.as_rgb8().unwrap();
        let center = out.get_pixel(4, 4);
        let corner = out.get_pixel(0, 0);
        assert!(corner[0] < center[0]);
        assert!(center[0] > center[1], "expected a pink-red cast: {:?}", center);
    }

    #[test]
    fn test_unknown_name_returns_input_unchanged() {
        let photo = sample_photo();
        let out = StylePipeline::new().apply_named(&photo, "polaroid").unwrap();
        assert_eq!(out, photo);
    }

    #[test]
    fn test_empty_image_is_decode_error() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = StylePipeline::new()
            .apply(&empty, FilterType::Suburbia)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn test_apply_to_bytes_none_is_passthrough() {
        let mut bytes = Vec::new();
        sample_photo()
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let out = StylePipeline::new()
            .apply_to_bytes(&bytes, FilterType::None, &PhotoEncoder::new())
            .unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_apply_to_bytes_none_rejects_garbage() {
        let err = StylePipeline::new()
            .apply_to_bytes(b"not an image", FilterType::None, &PhotoEncoder::new())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_pipelines_are_send_sync() {
        assert_send_sync::<StylePipeline>();
        assert_send_sync::<crate::pipelines::photo::Enhancer>();
        assert_send_sync::<crate::pipelines::photo::PhotoPipeline>();
    }

    #[test]
    fn test_concurrent_calls_match_sequential() {
        use crate::pipelines::photo::Enhancer;
        use std::sync::Arc;

        let photo = Arc::new(sample_photo());
        let styles = StylePipeline::new();
        let enhancer = Enhancer::new();
        let expected_style = styles.apply(&photo, FilterType::Suburbia).unwrap();
        let expected_enhanced = enhancer.apply((*photo).clone());

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let photo = Arc::clone(&photo);
                std::thread::spawn(move || {
                    let styled = styles.apply(&photo, FilterType::Suburbia).unwrap();
                    let enhanced = enhancer.apply((*photo).clone());
                    (styled, enhanced)
                })
            })
            .collect();

        for worker in workers {
            let (styled, enhanced) = worker.join().unwrap();
            assert_eq!(styled, expected_style);
            assert_eq!(enhanced, expected_enhanced);
        }
    }

    #[test]
    fn test_apply_to_bytes_surfaces_decode_error() {
        let err = StylePipeline::new()
            .apply_to_bytes(b"garbage", FilterType::Noir, &PhotoEncoder::new())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn test_identity_chain_detection() {
        assert!(is_identity_chain(&[TransformKind::Identity]));
        assert!(is_identity_chain(&[
            TransformKind::Monochrome {
                tint: Rgb::BLUE,
                intensity: 0.0,
            },
            TransformKind::TemperatureTint {
                source: WhitePoint::D65,
                target: WhitePoint::D65,
            },
        ]));
        assert!(!is_identity_chain(FilterType::Noir.recipe()));
    }
}
