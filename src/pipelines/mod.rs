// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for captured and stored photos
//!
//! # Pipeline Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Captured     │ ──▶ │  Enhancer         │ ──▶ │  Photo file  │
//! │ bytes        │     │  - Color controls │     │              │
//! │              │     │  - Shadows/highl. │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//!
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Stored photo │ ──▶ │  StylePipeline    │ ──▶ │ Display or   │
//! │              │     │  - Named filter   │     │ export bytes │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! # Design Principles
//!
//! 1. **Never lose a capture**: enhancement failures fall back to the original
//! 2. **Non-blocking**: CPU-bound work runs on the blocking pool
//! 3. **Stateless**: every call owns its buffers and can run concurrently
//!
//! # Modules
//!
//! - [`photo`]: Enhancement, encoding and the async photo pipeline

pub mod photo;
