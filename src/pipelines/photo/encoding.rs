// SPDX-License-Identifier: GPL-3.0-only

//! Photo decoding and encoding
//!
//! Decodes captured or stored photo bytes into images and encodes processed
//! images for storage:
//! - JPEG (with quality control)
//! - PNG (lossless)
//!
//! Everything here is synchronous; [`super::PhotoPipeline`] moves it onto the
//! blocking pool.

use crate::errors::{PipelineError, PipelineResult};
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::debug;

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl From<crate::config::PhotoOutputFormat> for EncodingFormat {
    fn from(format: crate::config::PhotoOutputFormat) -> Self {
        match format {
            crate::config::PhotoOutputFormat::Jpeg => EncodingFormat::Jpeg,
            crate::config::PhotoOutputFormat::Png => EncodingFormat::Png,
        }
    }
}

/// Encoding quality settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression)
    #[default]
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl EncodingQuality {
    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::High => 92,
            EncodingQuality::Maximum => 98,
        }
    }
}

/// Encoded image data ready for saving
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
#[derive(Debug, Clone, Copy)]
pub struct PhotoEncoder {
    format: EncodingFormat,
    quality: EncodingQuality,
}

impl PhotoEncoder {
    /// Create a new encoder with JPEG format and high quality
    pub fn new() -> Self {
        Self {
            format: EncodingFormat::Jpeg,
            quality: EncodingQuality::High,
        }
    }

    /// Create an encoder with the given format and quality
    pub fn with_format(format: EncodingFormat, quality: EncodingQuality) -> Self {
        Self { format, quality }
    }

    /// Decode photo bytes in any format the image crate understands
    ///
    /// Images without pixels are rejected so later stages never see them.
    pub fn decode(data: &[u8]) -> PipelineResult<DynamicImage> {
        let image = image::load_from_memory(data)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(PipelineError::Decode(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }

        debug!(
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Decoded photo"
        );
        Ok(image)
    }

    /// Encode an image with the configured format
    pub fn encode(&self, image: &DynamicImage) -> PipelineResult<EncodedImage> {
        let data = match self.format {
            EncodingFormat::Jpeg => Self::encode_jpeg(image, self.quality)?,
            EncodingFormat::Png => Self::encode_png(image)?,
        };

        debug!(size = data.len(), format = ?self.format, "Encoding complete");

        Ok(EncodedImage {
            data,
            format: self.format,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Encode image as JPEG
    ///
    /// JPEG has no alpha channel and only 8-bit samples, so the image is
    /// flattened to RGB8 first.
    fn encode_jpeg(image: &DynamicImage, quality: EncodingQuality) -> PipelineResult<Vec<u8>> {
        let rgb = image.to_rgb8();
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());

        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| PipelineError::Encode(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    /// Encode image as PNG
    ///
    /// Float images are quantized to 16 bits since PNG has no float samples.
    fn encode_png(image: &DynamicImage) -> PipelineResult<Vec<u8>> {
        let converted;
        let image = match image {
            DynamicImage::ImageRgb32F(_) => {
                converted = DynamicImage::ImageRgb16(image.to_rgb16());
                &converted
            }
            DynamicImage::ImageRgba32F(_) => {
                converted = DynamicImage::ImageRgba16(image.to_rgba16());
                &converted
            }
            other => other,
        };

        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| PipelineError::Encode(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new()
    }
}
