// SPDX-License-Identifier: MPL-2.0

//! Color math shared by the transform primitives
//!
//! Luma, smoothstep, sRGB transfer functions and the chromatic adaptation used
//! by the temperature/tint shift.

use crate::constants::{LUMA_WEIGHTS, TINT_Y_SCALE, limits};
use glam::{Mat3, Vec3};

/// Linear RGB → XYZ (D65), row-major
const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

/// Bradford cone response matrix, row-major
const BRADFORD: [[f32; 3]; 3] = [
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
];

/// An RGB color in normalized [0, 1] space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
    /// Soft pinkish-red used for sunset hues
    pub const PINK_RED: Rgb = Rgb::new(1.0, 0.2, 0.3);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp each component to [0, 1]; non-finite components become 1.0
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
        Self::new(fix(self.r), fix(self.g), fix(self.b))
    }
}

/// A white point expressed as correlated color temperature plus tint
///
/// Tint moves the chromaticity off the Planckian locus: positive values push
/// toward magenta, negative toward green.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    /// Correlated color temperature in Kelvin
    pub temperature: f32,
    pub tint: f32,
}

impl WhitePoint {
    /// Standard daylight neutral
    pub const D65: WhitePoint = WhitePoint::new(6500.0, 0.0);

    pub const fn new(temperature: f32, tint: f32) -> Self {
        Self { temperature, tint }
    }

    /// Clamp temperature and tint into the supported range
    pub fn sanitized(self) -> Self {
        let temperature = if self.temperature.is_finite() {
            self.temperature.clamp(limits::TEMPERATURE.0, limits::TEMPERATURE.1)
        } else {
            Self::D65.temperature
        };
        let tint = if self.tint.is_finite() {
            self.tint.clamp(limits::TINT.0, limits::TINT.1)
        } else {
            0.0
        };
        Self { temperature, tint }
    }

    /// CIE xy chromaticity of this white point
    pub fn chromaticity(&self) -> (f32, f32) {
        let (x, y) = planckian_xy(self.temperature);
        (x, y - self.tint * TINT_Y_SCALE)
    }

    /// XYZ tristimulus values normalized to Y = 1
    fn xyz(&self) -> Vec3 {
        let (x, y) = self.chromaticity();
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Luma of a gamma-encoded RGB triple
#[inline]
pub fn luma(rgb: [f32; 3]) -> f32 {
    LUMA_WEIGHTS[0] * rgb[0] + LUMA_WEIGHTS[1] * rgb[1] + LUMA_WEIGHTS[2] * rgb[2]
}

/// Hermite smoothstep between `edge0` and `edge1`
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// sRGB transfer function, decoding. Sign-preserving so out-of-gamut
/// intermediates survive the round trip.
#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    let a = v.abs();
    let lin = if a <= 0.040_45 {
        a / 12.92
    } else {
        ((a + 0.055) / 1.055).powf(2.4)
    };
    lin.copysign(v)
}

/// sRGB transfer function, encoding
#[inline]
pub fn linear_to_srgb(v: f32) -> f32 {
    let a = v.abs();
    let enc = if a <= 0.003_130_8 {
        a * 12.92
    } else {
        1.055 * a.powf(1.0 / 2.4) - 0.055
    };
    enc.copysign(v)
}

/// Chromaticity of a black body at `kelvin` (Kim et al. cubic spline)
///
/// Valid between 1667 K and 25000 K; inputs are clamped to that range.
pub fn planckian_xy(kelvin: f32) -> (f32, f32) {
    let t = kelvin.clamp(limits::TEMPERATURE.0, limits::TEMPERATURE.1) as f64;
    let (t2, t3) = (t * t, t * t * t);

    let x = if t <= 4000.0 {
        -0.266_123_9e9 / t3 - 0.234_358_9e6 / t2 + 0.877_695_6e3 / t + 0.179_910
    } else {
        -3.025_846_9e9 / t3 + 2.107_037_9e6 / t2 + 0.222_634_7e3 / t + 0.240_390
    };

    let (x2, x3) = (x * x, x * x * x);
    let y = if t <= 2222.0 {
        -1.106_381_4 * x3 - 1.348_110_20 * x2 + 2.185_558_32 * x - 0.202_196_83
    } else if t <= 4000.0 {
        -0.954_947_6 * x3 - 1.374_185_93 * x2 + 2.091_370_15 * x - 0.167_488_67
    } else {
        3.081_758_0 * x3 - 5.873_386_70 * x2 + 3.751_129_97 * x - 0.370_014_83
    };

    (x as f32, y as f32)
}

fn row_major(rows: &[[f32; 3]; 3]) -> Mat3 {
    Mat3::from_cols_array_2d(rows).transpose()
}

/// Bradford adaptation in XYZ from one white to another
pub fn bradford_adaptation(from: &WhitePoint, to: &WhitePoint) -> Mat3 {
    let bradford = row_major(&BRADFORD);
    let lms_from = bradford * from.xyz();
    let lms_to = bradford * to.xyz();
    bradford.inverse() * Mat3::from_diagonal(lms_to / lms_from) * bradford
}

/// Matrix that re-renders linear sRGB so that colors that were neutral under
/// `target` become neutral under `source`
///
/// With `target` hotter than `source` the image warms up.
pub fn temperature_matrix(source: &WhitePoint, target: &WhitePoint) -> Mat3 {
    let to_xyz = row_major(&SRGB_TO_XYZ);
    to_xyz.inverse() * bradford_adaptation(target, source) * to_xyz
}
