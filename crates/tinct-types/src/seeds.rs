// ABOUTME: Seed colors and chroma shaping inputs for palette generation
// ABOUTME: Pure configuration data with serde defaults

use crate::color::Oklch;
use serde::{Deserialize, Serialize};

/// Lightness direction of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Ramps run light to dark (N0 is the lightest step)
    #[default]
    Light,
    /// Ramps run dark to light (N0 is the darkest step)
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

/// Near-white foundation used when a light theme has no foundation seed.
pub const DEFAULT_LIGHT_FOUNDATION: Oklch = Oklch {
    l: 0.97,
    c: 0.005,
    h: 0.0,
};

/// Near-black foundation used when a dark theme has no foundation seed.
pub const DEFAULT_DARK_FOUNDATION: Oklch = Oklch {
    l: 0.20,
    c: 0.005,
    h: 0.0,
};

/// User supplied seed colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteSeeds {
    pub brand: Oklch,
    #[serde(default)]
    pub foundation: Option<Oklch>,
}

impl Default for PaletteSeeds {
    fn default() -> Self {
        Self {
            brand: Oklch {
                l: 0.55,
                c: 0.15,
                h: 220.0,
            },
            foundation: None,
        }
    }
}

impl PaletteSeeds {
    pub fn new(brand: Oklch) -> Self {
        Self {
            brand,
            foundation: None,
        }
    }

    pub fn with_foundation(mut self, foundation: Oklch) -> Self {
        self.foundation = Some(foundation);
        self
    }

    /// The foundation seed, or the direction's neutral default when omitted.
    pub fn foundation_for(&self, mode: ThemeMode) -> Oklch {
        self.foundation.unwrap_or(match mode {
            ThemeMode::Light => DEFAULT_LIGHT_FOUNDATION,
            ThemeMode::Dark => DEFAULT_DARK_FOUNDATION,
        })
    }
}

/// Chroma shaping ratios for the two ramps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromaShaping {
    /// Fraction of brand chroma carried into the neutral ramp
    #[serde(default = "default_neutral_ratio")]
    pub neutral_ratio: f64,

    /// Upper bound on neutral ramp chroma
    #[serde(default = "default_neutral_max")]
    pub neutral_max: f64,

    /// Fraction of foundation seed chroma carried into the foundation ramp
    #[serde(default = "default_foundation_ratio")]
    pub foundation_ratio: f64,
}

fn default_neutral_ratio() -> f64 {
    0.12
}

fn default_neutral_max() -> f64 {
    0.02
}

fn default_foundation_ratio() -> f64 {
    0.5
}

impl Default for ChromaShaping {
    fn default() -> Self {
        Self {
            neutral_ratio: default_neutral_ratio(),
            neutral_max: default_neutral_max(),
            foundation_ratio: default_foundation_ratio(),
        }
    }
}

impl ChromaShaping {
    /// Negative or non-finite values become 0, which collapses the ramp to gray.
    pub fn sanitized(&self) -> Self {
        fn non_negative(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }
        Self {
            neutral_ratio: non_negative(self.neutral_ratio),
            neutral_max: non_negative(self.neutral_max),
            foundation_ratio: non_negative(self.foundation_ratio),
        }
    }

    pub fn is_sanitized(&self) -> bool {
        self.sanitized() == *self
    }
}
