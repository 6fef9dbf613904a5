// SPDX-License-Identifier: MPL-2.0

//! Gallery filters
//!
//! Each named filter is a fixed, ordered list of [`TransformKind`] stages run by
//! the generic chain runner in [`chain`]. The recipe table is plain data:
//!
//! ```text
//! none       Identity
//! noir       ColorAdjust (grayscale, extra contrast)
//! bayDays    ColorAdjust → Monochrome (blue)
//! summerSky  ColorAdjust → TemperatureTint (6500 K → 8000 K)
//! suburbia   ColorAdjust → Monochrome (pink-red) → Vignette
//! ```

pub mod chain;
pub mod color;
pub mod transform;

pub use chain::{StylePipeline, run_chain};
pub use color::{Rgb, WhitePoint};
pub use transform::TransformKind;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

const NONE: &[TransformKind] = &[TransformKind::Identity];

/// Noir approximates a high-contrast black & white photo effect
const NOIR: &[TransformKind] = &[TransformKind::ColorAdjust {
    brightness: 0.0,
    contrast: 1.35,
    saturation: 0.0,
}];

/// Moody, dark and cool
const BAY_DAYS: &[TransformKind] = &[
    TransformKind::ColorAdjust {
        brightness: -0.2,
        contrast: 1.8,
        saturation: 0.8,
    },
    TransformKind::Monochrome {
        tint: Rgb::BLUE,
        intensity: 0.3,
    },
];

/// Bright, vibrant and warm
const SUMMER_SKY: &[TransformKind] = &[
    TransformKind::ColorAdjust {
        brightness: 0.2,
        contrast: 1.4,
        saturation: 1.8,
    },
    TransformKind::TemperatureTint {
        source: WhitePoint::new(6500.0, 0.0),
        target: WhitePoint::new(8000.0, 0.0),
    },
];

/// Sunset glow with darkened edges
const SUBURBIA: &[TransformKind] = &[
    TransformKind::ColorAdjust {
        brightness: -0.1,
        contrast: 1.6,
        saturation: 1.4,
    },
    TransformKind::Monochrome {
        tint: Rgb::PINK_RED,
        intensity: 0.4,
    },
    TransformKind::Vignette {
        intensity: 0.6,
        radius: 2.0,
    },
];

/// Filters offered in the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterType {
    /// No filter applied
    #[default]
    None,
    /// High contrast black & white
    Noir,
    /// Saturated, pink-red tint with vignette
    Suburbia,
    /// Bright, saturated and warm
    SummerSky,
    /// Dark, punchy and blue
    BayDays,
}

impl FilterType {
    /// All filters in picker order
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Noir,
        FilterType::Suburbia,
        FilterType::SummerSky,
        FilterType::BayDays,
    ];

    /// Stable identifier used in settings and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::Noir => "noir",
            FilterType::Suburbia => "suburbia",
            FilterType::SummerSky => "summerSky",
            FilterType::BayDays => "bayDays",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::None => "None",
            FilterType::Noir => "Noir",
            FilterType::Suburbia => "Suburbia",
            FilterType::SummerSky => "Summer Sky",
            FilterType::BayDays => "Bay Days",
        }
    }

    /// Look up a filter by identifier or display name, ignoring ASCII case
    pub fn lookup(name: &str) -> Option<FilterType> {
        let name = name.trim();
        Self::ALL.into_iter().find(|filter| {
            filter.name().eq_ignore_ascii_case(name)
                || filter.display_name().eq_ignore_ascii_case(name)
        })
    }

    /// Resolve a filter name, falling back to [`FilterType::None`] for unknown names
    pub fn from_name(name: &str) -> FilterType {
        Self::lookup(name).unwrap_or_else(|| {
            warn!(name, "Unknown filter name, using none");
            FilterType::None
        })
    }

    /// The ordered transform chain for this filter
    pub fn recipe(&self) -> &'static [TransformKind] {
        match self {
            FilterType::None => NONE,
            FilterType::Noir => NOIR,
            FilterType::Suburbia => SUBURBIA,
            FilterType::SummerSky => SUMMER_SKY,
            FilterType::BayDays => BAY_DAYS,
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for FilterType {
    fn from(name: String) -> Self {
        FilterType::from_name(&name)
    }
}

impl From<FilterType> for String {
    fn from(filter: FilterType) -> Self {
        filter.name().to_string()
    }
}
