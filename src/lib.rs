// SPDX-License-Identifier: MPL-2.0

//! Momento - photo enhancement and gallery filters for a camera app
//!
//! This library provides the image side of the Momento camera: the
//! post-capture enhancement pass, the named gallery filters, and the
//! encoding and storage glue around them.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`filters`]: Transform primitives, the filter catalog and the chain runner
//! - [`pipelines`]: Enhancement, encoding and the async photo pipeline
//! - [`config`]: User settings handling
//! - [`storage`]: Photo file naming, listing and cleanup
//!
//! # Example
//!
//! ```no_run
//! use momento::{FilterType, PhotoEncoder, StylePipeline};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let photo = PhotoEncoder::decode(&bytes)?;
//! let styled = StylePipeline::new().apply(&photo, FilterType::SummerSky)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use errors::{AppError, AppResult, PipelineError, PipelineResult};
pub use filters::{FilterType, StylePipeline, TransformKind};
pub use pipelines::photo::{Enhancer, PhotoEncoder, PhotoPipeline};
