// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Rec.709 luma weights, matching the platform color-controls filter
pub const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Name of the directory photos are stored in
pub const PHOTO_DIR_NAME: &str = "MomentoPhotos";

/// Prefix for saved photo filenames
pub const PHOTO_FILE_PREFIX: &str = "Momento";

/// Timestamp layout used in saved photo filenames
pub const PHOTO_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Post-capture enhancement recipe values
pub mod enhancement {
    /// Slight saturation boost
    pub const SATURATION: f32 = 1.1;
    /// Subtle contrast
    pub const CONTRAST: f32 = 1.05;
    /// Lift shadows
    pub const SHADOW_AMOUNT: f32 = 0.3;
    /// Recover highlights
    pub const HIGHLIGHT_AMOUNT: f32 = -0.3;
}

/// Parameter domains for the transform primitives
///
/// Values outside these ranges are clamped, non-finite values fall back to the
/// neutral value.
pub mod limits {
    pub const BRIGHTNESS: (f32, f32) = (-1.0, 1.0);
    pub const CONTRAST: (f32, f32) = (0.25, 4.0);
    pub const SATURATION: (f32, f32) = (0.0, 2.0);
    pub const INTENSITY: (f32, f32) = (0.0, 1.0);
    pub const VIGNETTE_RADIUS: (f32, f32) = (0.1, 4.0);
    pub const TONE_AMOUNT: (f32, f32) = (-1.0, 1.0);
    /// Range covered by the Planckian locus approximation
    pub const TEMPERATURE: (f32, f32) = (1667.0, 25000.0);
    pub const TINT: (f32, f32) = (-150.0, 150.0);
}

/// Highlight/shadow weighting curve
pub mod tone {
    /// Luma where the shadow weight reaches zero
    pub const SHADOW_EDGE: f32 = 0.6;
    /// Luma where the highlight weight starts rising
    pub const HIGHLIGHT_EDGE: f32 = 0.4;
    /// Largest offset a full-strength amount applies to a channel
    pub const MAX_OFFSET: f32 = 0.25;
}

/// Chromaticity shift per unit of tint (positive tint pushes toward magenta)
pub const TINT_Y_SCALE: f32 = 0.0002;
