// SPDX-License-Identifier: MPL-2.0

//! Async photo pipeline
//!
//! Capture side:
//!
//! ```text
//! Captured bytes → Enhancement (if enabled) → Disk I/O
//! ```
//!
//! Gallery side:
//!
//! ```text
//! Stored photo → Decode → Filter → Display / Encode for export
//! ```
//!
//! CPU-bound stages run on the tokio blocking pool so an interactive caller
//! keeps running while a photo is processed. Each call owns its buffers; nothing
//! is shared between invocations.

pub mod encoding;
pub mod processing;

pub use encoding::{EncodedImage, EncodingFormat, EncodingQuality, PhotoEncoder};
pub use processing::{ENHANCEMENT_RECIPE, Enhancer, crop_to_square};

use crate::errors::PipelineResult;
use crate::filters::{FilterType, StylePipeline};
use crate::storage;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How much of a filtered photo to keep on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportSize {
    /// Whole frame
    #[default]
    Full,
    /// Centered square with side `min(width, height)`
    Square,
}

/// Complete photo pipeline
///
/// Orchestrates capture → enhance → save and stored photo → filter → export.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoPipeline {
    enhancer: Enhancer,
    styles: StylePipeline,
    encoder: PhotoEncoder,
}

impl PhotoPipeline {
    /// Create a new photo pipeline with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline that encodes with the given format and quality
    pub fn with_encoding(format: EncodingFormat, quality: EncodingQuality) -> Self {
        Self {
            encoder: PhotoEncoder::with_format(format, quality),
            ..Self::default()
        }
    }

    /// Process captured bytes and save them to `output_dir`
    ///
    /// With `post_processing` off the captured bytes are written unchanged.
    /// Enhancement failures never fail the capture; only disk errors do.
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Path to saved photo
    pub async fn capture_and_save(
        &self,
        captured: Vec<u8>,
        post_processing: bool,
        output_dir: PathBuf,
    ) -> PipelineResult<PathBuf> {
        info!(
            size = captured.len(),
            post_processing,
            "Processing captured photo"
        );

        let data = if post_processing {
            let enhancer = self.enhancer;
            let encoder = self.encoder;
            tokio::task::spawn_blocking(move || enhancer.process_bytes(&captured, &encoder))
                .await?
        } else {
            captured
        };

        let path = storage::save_photo(data, output_dir).await?;
        info!(path = %path.display(), "Photo saved successfully");
        Ok(path)
    }

    /// Load a stored photo and apply `filter` for display
    pub async fn render_filtered(
        &self,
        path: &Path,
        filter: FilterType,
    ) -> PipelineResult<DynamicImage> {
        let data = tokio::fs::read(path).await?;
        let styles = self.styles;

        tokio::task::spawn_blocking(move || {
            let image = PhotoEncoder::decode(&data)?;
            styles.apply(&image, filter)
        })
        .await?
    }

    /// Load a stored photo, apply `filter` and encode it for export
    pub async fn export_filtered(
        &self,
        path: &Path,
        filter: FilterType,
        size: ExportSize,
    ) -> PipelineResult<EncodedImage> {
        let image = self.render_filtered(path, filter).await?;
        let encoder = self.encoder;

        let encoded = tokio::task::spawn_blocking(move || match size {
            ExportSize::Full => encoder.encode(&image),
            ExportSize::Square => encoder.encode(&crop_to_square(&image)),
        })
        .await??;
        debug!(
            path = %path.display(),
            filter = %filter,
            ?size,
            size = encoded.data.len(),
            "Filtered photo ready for export"
        );
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PipelineError;
    use image::{Rgb, RgbImage};

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(8, 8, |x, y| {
            Rgb([(x * 30) as u8, (y * 30) as u8, 90])
        }));
        PhotoEncoder::with_format(EncodingFormat::Png, EncodingQuality::High)
            .encode(&image)
            .unwrap()
            .data
    }

    #[tokio::test]
    async fn test_capture_without_post_processing_saves_original_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let captured = png_bytes();

        let path = PhotoPipeline::new()
            .capture_and_save(captured.clone(), false, dir.path().to_path_buf())
            .await
            .unwrap();

        assert_eq!(path.extension().unwrap(), "png");
        assert_eq!(std::fs::read(&path).unwrap(), captured);
    }

    #[tokio::test]
    async fn test_capture_with_post_processing_reencodes() {
        let dir = tempfile::tempdir().unwrap();
        let captured = png_bytes();

        let path = PhotoPipeline::new()
            .capture_and_save(captured.clone(), true, dir.path().to_path_buf())
            .await
            .unwrap();

        assert_eq!(path.extension().unwrap(), "jpg");
        let saved = std::fs::read(&path).unwrap();
        assert_ne!(saved, captured);
        let decoded = PhotoEncoder::decode(&saved).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[tokio::test]
    async fn test_capture_with_corrupt_data_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let corrupt = b"sensor glitch".to_vec();

        let path = PhotoPipeline::new()
            .capture_and_save(corrupt.clone(), true, dir.path().to_path_buf())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), corrupt);
    }

    #[tokio::test]
    async fn test_export_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo.png");
        std::fs::write(&source, png_bytes()).unwrap();

        let pipeline = PhotoPipeline::with_encoding(EncodingFormat::Png, EncodingQuality::High);
        let exported = pipeline
            .export_filtered(&source, FilterType::BayDays, ExportSize::Full)
            .await
            .unwrap();
        assert_eq!(exported.format, EncodingFormat::Png);
        assert_eq!((exported.width, exported.height), (8, 8));

        let unfiltered = pipeline.render_filtered(&source, FilterType::None).await.unwrap();
        assert_eq!(unfiltered, PhotoEncoder::decode(&png_bytes()).unwrap());
    }

    #[tokio::test]
    async fn test_export_square_crops_filtered_photo() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("wide.png");
        let wide = DynamicImage::ImageRgb8(RgbImage::from_fn(9, 6, |x, y| {
            Rgb([(x * 25) as u8, (y * 40) as u8, 120])
        }));
        wide.save(&source).unwrap();

        let pipeline = PhotoPipeline::with_encoding(EncodingFormat::Png, EncodingQuality::High);
        let exported = pipeline
            .export_filtered(&source, FilterType::Noir, ExportSize::Square)
            .await
            .unwrap();
        assert_eq!((exported.width, exported.height), (6, 6));

        let full = pipeline
            .render_filtered(&source, FilterType::Noir)
            .await
            .unwrap();
        let decoded = PhotoEncoder::decode(&exported.data).unwrap();
        assert_eq!(decoded, full.crop_imm(1, 0, 6, 6));
    }

    #[tokio::test]
    async fn test_render_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PhotoPipeline::new()
            .render_filtered(&dir.path().join("gone.jpg"), FilterType::Noir)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
