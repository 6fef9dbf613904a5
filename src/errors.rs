// SPDX-License-Identifier: MPL-2.0

//! Error types for the photo pipeline and the host application

use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for pipeline stages
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors produced while decoding, transforming or encoding a photo
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input is not a supported image, or has no pixels to work on
    #[error("Failed to decode image: {0}")]
    Decode(String),
    /// Output encoding failed
    #[error("Failed to encode image: {0}")]
    Encode(String),
    /// Reading or writing a photo file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<image::ImageError> for PipelineError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => PipelineError::Io(e),
            image::ImageError::Encoding(e) => PipelineError::Encode(e.to_string()),
            other => PipelineError::Decode(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(err: tokio::task::JoinError) -> Self {
        PipelineError::Task(err.to_string())
    }
}

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Photo pipeline errors
    #[error("Photo error: {0}")]
    Pipeline(#[from] PipelineError),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    /// Storage/filesystem errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
