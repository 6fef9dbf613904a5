// SPDX-License-Identifier: MPL-2.0

//! Image transform primitives
//!
//! Each primitive consumes an RGBA `f32` working buffer and returns a buffer of
//! the same dimensions. Samples are normalized gamma-encoded values; nothing is
//! clamped here so a chain keeps full precision until its output is finalized.
//! Alpha is carried through untouched.

use super::color::{self, Rgb, WhitePoint};
use crate::constants::{limits, tone};
use crate::errors::{PipelineError, PipelineResult};
use image::Rgba32FImage;

/// A primitive image operation with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformKind {
    /// Saturation around luma, then contrast around mid-gray, then brightness offset
    ColorAdjust {
        brightness: f32,
        contrast: f32,
        saturation: f32,
    },
    /// Blend a tinted grayscale version over the original
    Monochrome { tint: Rgb, intensity: f32 },
    /// Chromatic adaptation between two white points
    TemperatureTint {
        source: WhitePoint,
        target: WhitePoint,
    },
    /// Radial darkening toward the corners
    Vignette { intensity: f32, radius: f32 },
    /// Lift shadows and pull down highlights by luma range
    HighlightShadow {
        shadow_amount: f32,
        highlight_amount: f32,
    },
    /// Pass-through
    Identity,
}

impl TransformKind {
    /// Whether this transform leaves every image unchanged
    pub fn is_identity(&self) -> bool {
        match self.sanitized() {
            TransformKind::Identity => true,
            TransformKind::ColorAdjust {
                brightness,
                contrast,
                saturation,
            } => brightness == 0.0 && contrast == 1.0 && saturation == 1.0,
            TransformKind::Monochrome { intensity, .. } => intensity == 0.0,
            TransformKind::TemperatureTint { source, target } => source == target,
            TransformKind::Vignette { intensity, .. } => intensity == 0.0,
            TransformKind::HighlightShadow {
                shadow_amount,
                highlight_amount,
            } => shadow_amount == 0.0 && highlight_amount == 0.0,
        }
    }

    /// Copy of this transform with every parameter clamped into its domain
    pub fn sanitized(&self) -> TransformKind {
        match *self {
            TransformKind::ColorAdjust {
                brightness,
                contrast,
                saturation,
            } => TransformKind::ColorAdjust {
                brightness: clamp_param(brightness, limits::BRIGHTNESS, 0.0),
                contrast: clamp_param(contrast, limits::CONTRAST, 1.0),
                saturation: clamp_param(saturation, limits::SATURATION, 1.0),
            },
            TransformKind::Monochrome { tint, intensity } => TransformKind::Monochrome {
                tint: tint.sanitized(),
                intensity: clamp_param(intensity, limits::INTENSITY, 0.0),
            },
            TransformKind::TemperatureTint { source, target } => TransformKind::TemperatureTint {
                source: source.sanitized(),
                target: target.sanitized(),
            },
            TransformKind::Vignette { intensity, radius } => TransformKind::Vignette {
                intensity: clamp_param(intensity, limits::INTENSITY, 0.0),
                radius: clamp_param(radius, limits::VIGNETTE_RADIUS, 1.0),
            },
            TransformKind::HighlightShadow {
                shadow_amount,
                highlight_amount,
            } => TransformKind::HighlightShadow {
                shadow_amount: clamp_param(shadow_amount, limits::TONE_AMOUNT, 0.0),
                highlight_amount: clamp_param(highlight_amount, limits::TONE_AMOUNT, 0.0),
            },
            TransformKind::Identity => TransformKind::Identity,
        }
    }

    /// Apply this transform, reusing the buffer for the output
    ///
    /// Returns `PipelineError::Decode` for an image with no pixels.
    pub fn apply(&self, image: Rgba32FImage) -> PipelineResult<Rgba32FImage> {
        ensure_accessible(&image)?;

        if self.is_identity() {
            return Ok(image);
        }

        let image = match self.sanitized() {
            TransformKind::ColorAdjust {
                brightness,
                contrast,
                saturation,
            } => map_rgb(image, |rgb| {
                color_adjust_pixel(rgb, brightness, contrast, saturation)
            }),
            TransformKind::Monochrome { tint, intensity } => {
                map_rgb(image, |rgb| monochrome_pixel(rgb, tint, intensity))
            }
            TransformKind::TemperatureTint { source, target } => {
                let matrix = color::temperature_matrix(&source, &target);
                map_rgb(image, |rgb| {
                    let linear = glam::Vec3::new(
                        color::srgb_to_linear(rgb[0]),
                        color::srgb_to_linear(rgb[1]),
                        color::srgb_to_linear(rgb[2]),
                    );
                    let adapted = matrix * linear;
                    [
                        color::linear_to_srgb(adapted.x),
                        color::linear_to_srgb(adapted.y),
                        color::linear_to_srgb(adapted.z),
                    ]
                })
            }
            TransformKind::Vignette { intensity, radius } => vignette(image, intensity, radius),
            TransformKind::HighlightShadow {
                shadow_amount,
                highlight_amount,
            } => map_rgb(image, |rgb| {
                highlight_shadow_pixel(rgb, shadow_amount, highlight_amount)
            }),
            TransformKind::Identity => image,
        };

        Ok(image)
    }
}

/// Clamp a parameter into `(min, max)`; non-finite values become `neutral`
fn clamp_param(value: f32, (min, max): (f32, f32), neutral: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        neutral
    }
}

fn ensure_accessible(image: &Rgba32FImage) -> PipelineResult<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::Decode(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

fn map_rgb(mut image: Rgba32FImage, f: impl Fn([f32; 3]) -> [f32; 3]) -> Rgba32FImage {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let [r, g, b] = f([r, g, b]);
        pixel.0 = [r, g, b, a];
    }
    image
}

#[inline]
pub(crate) fn color_adjust_pixel(
    rgb: [f32; 3],
    brightness: f32,
    contrast: f32,
    saturation: f32,
) -> [f32; 3] {
    let l = color::luma(rgb);
    rgb.map(|v| {
        let saturated = l + (v - l) * saturation;
        let contrasted = (saturated - 0.5) * contrast + 0.5;
        contrasted + brightness
    })
}

#[inline]
pub(crate) fn monochrome_pixel(rgb: [f32; 3], tint: Rgb, intensity: f32) -> [f32; 3] {
    let l = color::luma(rgb);
    let tinted = [l * tint.r, l * tint.g, l * tint.b];
    [
        intensity * tinted[0] + (1.0 - intensity) * rgb[0],
        intensity * tinted[1] + (1.0 - intensity) * rgb[1],
        intensity * tinted[2] + (1.0 - intensity) * rgb[2],
    ]
}

#[inline]
pub(crate) fn highlight_shadow_pixel(rgb: [f32; 3], shadow: f32, highlight: f32) -> [f32; 3] {
    let l = color::luma(rgb).clamp(0.0, 1.0);
    let shadow_weight = 1.0 - color::smoothstep(0.0, tone::SHADOW_EDGE, l);
    let highlight_weight = color::smoothstep(tone::HIGHLIGHT_EDGE, 1.0, l);
    let offset = tone::MAX_OFFSET * (shadow * shadow_weight + highlight * highlight_weight);
    rgb.map(|v| v + offset)
}

/// Darkening factor at `distance` from the center, where 1.0 is the corner
///
/// Exactly 1.0 at the center for every intensity and radius.
#[inline]
pub fn vignette_factor(distance: f32, intensity: f32, radius: f32) -> f32 {
    (1.0 - intensity * color::smoothstep(0.0, radius, distance)).max(0.0)
}

fn vignette(mut image: Rgba32FImage, intensity: f32, radius: f32) -> Rgba32FImage {
    let center_x = image.width() as f32 / 2.0;
    let center_y = image.height() as f32 / 2.0;
    let half_diagonal = (center_x * center_x + center_y * center_y).sqrt();

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        let distance = (dx * dx + dy * dy).sqrt() / half_diagonal;
        let factor = vignette_factor(distance, intensity, radius);
        pixel.0[0] *= factor;
        pixel.0[1] *= factor;
        pixel.0[2] *= factor;
    }
    image
}
