// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for photo operations
//!
//! This module provides command-line functionality for:
//! - Storing captured photos (with optional enhancement)
//! - Enhancing and filtering individual photos
//! - Browsing and clearing the photo directory
//! - Viewing and changing settings

use momento::config::PhotoOutputFormat;
use momento::filters::FilterType;
use momento::pipelines::photo::{
    EncodingFormat, EncodingQuality, Enhancer, ExportSize, PhotoEncoder, PhotoPipeline,
};
use momento::{Config, StylePipeline, storage};
use std::path::{Path, PathBuf};

/// Settings changes requested on the command line
pub struct SettingsUpdate {
    pub post_processing: Option<bool>,
    pub filter: Option<String>,
    pub format: Option<PhotoOutputFormat>,
    pub quality: Option<EncodingQuality>,
}

/// Pick the output format from a path, falling back to the configured format
fn format_for(output: &Path, config: &Config) -> EncodingFormat {
    match output
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => EncodingFormat::Png,
        Some("jpg") | Some("jpeg") => EncodingFormat::Jpeg,
        _ => config.photo_output_format.into(),
    }
}

/// Store a captured photo the way the camera does after the shutter fires
pub fn capture(
    config_path: &Path,
    input: PathBuf,
    post_processing: Option<bool>,
    output_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path);
    let post_processing = post_processing.unwrap_or(config.post_processing);
    let output_dir = output_dir.unwrap_or_else(|| config.photo_dir());

    let captured = std::fs::read(&input)?;
    let pipeline =
        PhotoPipeline::with_encoding(config.photo_output_format.into(), config.photo_quality);

    // Create async runtime for the pipeline
    let rt = tokio::runtime::Runtime::new()?;
    let output_path = rt.block_on(async {
        pipeline
            .capture_and_save(captured, post_processing, output_dir)
            .await
    })?;

    println!("Photo saved: {}", output_path.display());
    Ok(())
}

/// Enhance a single photo
pub fn enhance(
    config_path: &Path,
    input: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path);
    let encoder = PhotoEncoder::with_format(format_for(&output, &config), config.photo_quality);

    let data = std::fs::read(&input)?;
    let image = PhotoEncoder::decode(&data)?;
    let enhanced = Enhancer::new().apply(image);
    let encoded = encoder.encode(&enhanced)?;

    std::fs::write(&output, &encoded.data)?;
    println!(
        "Enhanced {}x{} photo saved: {}",
        encoded.width,
        encoded.height,
        output.display()
    );
    Ok(())
}

/// Apply a named filter to a single photo, optionally cropped to a square
pub fn filter(
    config_path: &Path,
    input: PathBuf,
    name: &str,
    output: PathBuf,
    square: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path);
    let format = format_for(&output, &config);
    let filter = FilterType::from_name(name);

    let filtered = if square {
        let pipeline = PhotoPipeline::with_encoding(format, config.photo_quality);
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(pipeline.export_filtered(&input, filter, ExportSize::Square))?
            .data
    } else {
        let encoder = PhotoEncoder::with_format(format, config.photo_quality);
        let data = std::fs::read(&input)?;
        StylePipeline::new().apply_to_bytes(&data, filter, &encoder)?
    };

    std::fs::write(&output, &filtered)?;
    println!(
        "{} applied, saved: {}",
        filter.display_name(),
        output.display()
    );
    Ok(())
}

/// List all filters
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    for filter in FilterType::ALL {
        println!("  {:<10} {}", filter.name(), filter.display_name());
    }
    Ok(())
}

/// List stored photos, newest first
pub fn gallery(
    config_path: &Path,
    dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = dir.unwrap_or_else(|| Config::load(config_path).photo_dir());

    let rt = tokio::runtime::Runtime::new()?;
    let photos = rt.block_on(storage::list_photos(dir.clone()))?;

    if photos.is_empty() {
        println!("No photos found in {}", dir.display());
        return Ok(());
    }

    println!("Photos in {}:", dir.display());
    println!();
    for (index, path) in photos.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  [{}] {}", index, name);
    }
    Ok(())
}

/// Delete all stored photos
pub fn clear(config_path: &Path, dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = dir.unwrap_or_else(|| Config::load(config_path).photo_dir());

    let rt = tokio::runtime::Runtime::new()?;
    let removed = rt.block_on(storage::clear_photos(dir.clone()))?;

    println!("Deleted {} photo(s) from {}", removed, dir.display());
    Ok(())
}

/// Show settings, applying and saving any requested changes first
pub fn settings(
    config_path: &Path,
    update: SettingsUpdate,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(config_path);
    let original = config.clone();

    if let Some(post_processing) = update.post_processing {
        config.post_processing = post_processing;
    }
    if let Some(name) = update.filter {
        config.filter = FilterType::from_name(&name);
    }
    if let Some(format) = update.format {
        config.photo_output_format = format;
    }
    if let Some(quality) = update.quality {
        config.photo_quality = quality;
    }

    if config != original {
        config.save(config_path)?;
        println!("Settings saved: {}", config_path.display());
        println!();
    }

    println!("Post-processing: {}", if config.post_processing { "on" } else { "off" });
    println!("Filter:          {}", config.filter.display_name());
    println!("Output format:   {:?}", config.photo_output_format);
    println!("Quality:         {:?}", config.photo_quality);
    println!("Photo directory: {}", config.photo_dir().display());
    Ok(())
}
