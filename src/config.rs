// SPDX-License-Identifier: GPL-3.0-only

//! User settings
//!
//! Settings belong to the host application. The photo pipeline never reads
//! them itself; the host passes the relevant values into each call.

use crate::errors::AppResult;
use crate::filters::FilterType;
use crate::pipelines::photo::EncodingQuality;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Current settings file layout
pub const CONFIG_VERSION: u32 = 1;

/// Output format for saved photos
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoOutputFormat {
    /// JPEG (lossy, small files)
    #[default]
    Jpeg,
    /// PNG (lossless)
    Png,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Settings file layout version
    pub version: u32,
    /// Run the enhancement recipe on every captured photo
    pub post_processing: bool,
    /// Filter last selected in the gallery
    pub filter: FilterType,
    /// Format for enhanced and exported photos
    pub photo_output_format: PhotoOutputFormat,
    /// JPEG quality preset
    pub photo_quality: EncodingQuality,
    /// Where photos are stored; `None` uses the default pictures directory
    pub photo_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            post_processing: false, // Off until the user opts in
            filter: FilterType::None,
            photo_output_format: PhotoOutputFormat::default(),
            photo_quality: EncodingQuality::default(),
            photo_dir: None,
        }
    }
}

impl Config {
    /// Default location of the settings file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("momento")
            .join("config.json")
    }

    /// Load settings from `path`
    ///
    /// A missing file yields the defaults. So does an unreadable one, with a
    /// warning, so a corrupt settings file never blocks the camera.
    pub fn load(path: &Path) -> Config {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                return Config::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read settings, using defaults");
                return Config::default();
            }
        };

        match serde_json::from_str::<Config>(&contents) {
            Ok(config) if config.version > CONFIG_VERSION => {
                warn!(
                    version = config.version,
                    supported = CONFIG_VERSION,
                    "Settings written by a newer version, using defaults"
                );
                Config::default()
            }
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
                Config::default()
            }
        }
    }

    /// Write settings to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Directory photos are stored in
    pub fn photo_dir(&self) -> PathBuf {
        self.photo_dir
            .clone()
            .unwrap_or_else(crate::storage::default_photo_dir)
    }
}
