// SPDX-License-Identifier: MPL-2.0

//! Post-capture enhancement
//!
//! Runs the fixed auto-enhancement recipe on freshly captured photos:
//! - Color controls: slight saturation boost and subtle contrast
//! - Highlight/shadow: lift shadows and recover highlights
//!
//! Enhancement is best effort. Any failure is logged and the original photo is
//! kept, so a capture always ends with some image on disk.

use super::encoding::PhotoEncoder;
use crate::constants::enhancement;
use crate::errors::PipelineResult;
use crate::filters::TransformKind;
use crate::filters::chain::apply_chain;
use image::DynamicImage;
use tracing::{debug, info, warn};

/// The fixed post-processing recipe
pub const ENHANCEMENT_RECIPE: &[TransformKind] = &[
    TransformKind::ColorAdjust {
        brightness: 0.0,
        contrast: enhancement::CONTRAST,
        saturation: enhancement::SATURATION,
    },
    TransformKind::HighlightShadow {
        shadow_amount: enhancement::SHADOW_AMOUNT,
        highlight_amount: enhancement::HIGHLIGHT_AMOUNT,
    },
];

/// Applies the post-capture enhancement recipe
///
/// The enhancer itself is unconditional; whether to call it is decided by the
/// caller's post-processing setting.
#[derive(Debug, Clone, Copy)]
pub struct Enhancer {
    recipe: &'static [TransformKind],
}

impl Enhancer {
    pub fn new() -> Self {
        Self {
            recipe: ENHANCEMENT_RECIPE,
        }
    }

    /// Enhancer that runs `recipe` in place of [`ENHANCEMENT_RECIPE`]
    pub fn with_recipe(recipe: &'static [TransformKind]) -> Self {
        Self { recipe }
    }

    pub fn recipe(&self) -> &'static [TransformKind] {
        self.recipe
    }

    /// Enhance an image, surfacing stage failures
    pub fn try_apply(&self, image: &DynamicImage) -> PipelineResult<DynamicImage> {
        apply_chain(image, self.recipe)
    }

    /// Enhance an image, falling back to the original on failure
    pub fn apply(&self, image: DynamicImage) -> DynamicImage {
        match self.try_apply(&image) {
            Ok(enhanced) => {
                debug!(
                    width = enhanced.width(),
                    height = enhanced.height(),
                    "Enhancement applied"
                );
                enhanced
            }
            Err(e) => {
                warn!(error = %e, "Enhancement failed, keeping original image");
                image
            }
        }
    }

    /// Decode, enhance and re-encode captured photo bytes
    ///
    /// Returns the original bytes untouched if any step fails.
    pub fn process_bytes(&self, data: &[u8], encoder: &PhotoEncoder) -> Vec<u8> {
        info!(size = data.len(), "Starting post-processing");

        let result = PhotoEncoder::decode(data)
            .and_then(|image| self.try_apply(&image))
            .and_then(|enhanced| encoder.encode(&enhanced));

        match result {
            Ok(encoded) => {
                debug!(
                    size = encoded.data.len(),
                    format = ?encoded.format,
                    "Post-processing complete"
                );
                encoded.data
            }
            Err(e) => {
                warn!(error = %e, "Post-processing failed, saving unprocessed photo");
                data.to_vec()
            }
        }
    }
}

/// Center-crop `image` to a square with side `min(width, height)`
///
/// An odd leftover pixel is dropped from the right or bottom edge.
pub fn crop_to_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width == height {
        return image.clone();
    }

    let side = width.min(height);
    let x = (width - side) / 2;
    let y = (height - side) / 2;
    debug!(width, height, side, x, y, "Cropping photo to square");
    image.crop_imm(x, y, side, side)
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new()
    }
}
