// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for managing photo files

use crate::constants::{PHOTO_DIR_NAME, PHOTO_FILE_PREFIX, PHOTO_TIMESTAMP_FORMAT};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Default directory for captured photos (`~/Pictures/MomentoPhotos`)
pub fn default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PHOTO_DIR_NAME)
}

/// File extension matching the encoded bytes, `bin` if the format is unknown
pub fn extension_for(data: &[u8]) -> &'static str {
    image::guess_format(data)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("bin")
}

/// Unique filename for a new photo: `Momento_<timestamp>_<uuid>.<ext>`
pub fn photo_filename(extension: &str) -> String {
    let timestamp = chrono::Local::now().format(PHOTO_TIMESTAMP_FORMAT);
    format!(
        "{}_{}_{}.{}",
        PHOTO_FILE_PREFIX,
        timestamp,
        uuid::Uuid::new_v4(),
        extension
    )
}

/// Save encoded photo bytes into `output_dir`, creating it if needed
///
/// Returns the path of the new file.
pub async fn save_photo(data: Vec<u8>, output_dir: PathBuf) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(&output_dir).await?;

    let filepath = output_dir.join(photo_filename(extension_for(&data)));
    info!(path = %filepath.display(), size = data.len(), "Saving photo");

    tokio::fs::write(&filepath, &data).await?;
    Ok(filepath)
}

/// Whether `path` has an extension of an image format we can decode
fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ImageFormat::from_extension(ext))
        .is_some_and(|format| format.reading_enabled())
}

/// List photos in `dir`, newest first
///
/// A missing directory is an empty gallery.
pub async fn list_photos(dir: PathBuf) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "Photo directory does not exist yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut photos: Vec<(SystemTime, PathBuf)> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_photo(&path) {
            continue;
        }
        let modified = match entry.metadata().await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping photo without timestamp");
                continue;
            }
        };
        photos.push((modified, path));
    }

    // Newest first; ties broken by name so the order is stable
    photos.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
    Ok(photos.into_iter().map(|(_, path)| path).collect())
}

/// Delete every photo in `dir`, returning how many were removed
pub async fn clear_photos(dir: PathBuf) -> std::io::Result<usize> {
    let photos = list_photos(dir.clone()).await?;
    for path in &photos {
        tokio::fs::remove_file(path).await?;
    }
    info!(dir = %dir.display(), count = photos.len(), "Photos deleted");
    Ok(photos.len())
}
