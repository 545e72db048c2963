// ABOUTME: Ten-step lightness ramps and brand derivative colors
// ABOUTME: Every generated color is gamut clamped before it leaves this module

use serde::{Deserialize, Serialize};
use tinct_types::{Oklch, ThemeMode};

use crate::error::PaletteError;
use crate::gamut::clamp_to_gamut;

pub const RAMP_LEN: usize = 10;

/// Lightness per ramp index. Strictly monotonic; direction decides theme polarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LightnessSteps([f64; RAMP_LEN]);

impl LightnessSteps {
    /// Light themes: N0 is the lightest step.
    pub const LIGHT: LightnessSteps =
        LightnessSteps([0.985, 0.955, 0.90, 0.82, 0.72, 0.60, 0.48, 0.36, 0.24, 0.12]);

    /// Dark themes: N0 is the darkest step.
    pub const DARK: LightnessSteps =
        LightnessSteps([0.10, 0.16, 0.23, 0.32, 0.43, 0.55, 0.66, 0.77, 0.87, 0.94]);

    pub fn new(steps: [f64; RAMP_LEN]) -> Result<Self, PaletteError> {
        if let Some(index) = steps
            .iter()
            .position(|v| !v.is_finite() || !(0.0..=1.0).contains(v))
        {
            return Err(PaletteError::InvalidSteps(format!(
                "step {index} ({}) is outside [0, 1]",
                steps[index]
            )));
        }

        let ascending = steps.windows(2).all(|w| w[0] < w[1]);
        let descending = steps.windows(2).all(|w| w[0] > w[1]);
        if !ascending && !descending {
            return Err(PaletteError::InvalidSteps(
                "steps must be strictly increasing or strictly decreasing".to_string(),
            ));
        }

        Ok(Self(steps))
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LIGHT,
            ThemeMode::Dark => Self::DARK,
        }
    }

    /// Light direction when index 0 is the lightest step.
    pub fn mode(&self) -> ThemeMode {
        if self.0[0] > self.0[RAMP_LEN - 1] {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    pub fn values(&self) -> &[f64; RAMP_LEN] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LightnessSteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let steps = <[f64; RAMP_LEN]>::deserialize(deserializer)?;
        LightnessSteps::new(steps).map_err(serde::de::Error::custom)
    }
}

/// Neutral ramp: brand hue, a small capped share of brand chroma.
pub fn generate_neutral_ramp(
    brand: Oklch,
    steps: &LightnessSteps,
    chroma_ratio: f64,
    max_chroma: f64,
) -> [Oklch; RAMP_LEN] {
    let brand = brand.normalized();
    let chroma = (brand.c * chroma_ratio.max(0.0)).min(max_chroma.max(0.0));
    ramp_from(steps, chroma, brand.h)
}

/// Foundation ramp: hue and softened chroma of an independent seed.
pub fn generate_foundation_ramp(
    foundation: Oklch,
    steps: &LightnessSteps,
    chroma_ratio: f64,
) -> [Oklch; RAMP_LEN] {
    let foundation = foundation.normalized();
    ramp_from(steps, foundation.c * chroma_ratio.max(0.0), foundation.h)
}

fn ramp_from(steps: &LightnessSteps, chroma: f64, hue: f64) -> [Oklch; RAMP_LEN] {
    steps
        .values()
        .map(|l| clamp_to_gamut(Oklch::new(l, chroma, hue)))
}

/// How one brand derivative moves away from the seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeRule {
    pub lightness_offset: f64,
    pub min_lightness: f64,
    pub max_lightness: f64,
    pub chroma_ratio: f64,
    pub min_chroma: f64,
    pub max_chroma: f64,
}

impl DerivativeRule {
    /// Pale brand tone for light surfaces.
    pub const TINT: DerivativeRule = DerivativeRule {
        lightness_offset: 0.38,
        min_lightness: 0.90,
        max_lightness: 0.97,
        chroma_ratio: 0.25,
        min_chroma: 0.0,
        max_chroma: 0.05,
    };

    /// Deep brand tone for dark surfaces.
    pub const SHADE: DerivativeRule = DerivativeRule {
        lightness_offset: -0.18,
        min_lightness: 0.28,
        max_lightness: 0.45,
        chroma_ratio: 0.70,
        min_chroma: 0.0,
        max_chroma: 0.14,
    };

    /// Saturated brand tone for high emphasis fills (buttons, badges).
    pub const FILL: DerivativeRule = DerivativeRule {
        lightness_offset: 0.0,
        min_lightness: 0.35,
        max_lightness: 0.50,
        chroma_ratio: 1.0,
        min_chroma: 0.0,
        max_chroma: 0.22,
    };

    pub fn apply(&self, brand: Oklch) -> Oklch {
        let brand = brand.normalized();
        let l = (brand.l + self.lightness_offset).clamp(self.min_lightness, self.max_lightness);
        let c = (brand.c * self.chroma_ratio).clamp(self.min_chroma, self.max_chroma);
        clamp_to_gamut(Oklch::new(l, c, brand.h))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandDerivatives {
    pub tint: Oklch,
    pub shade: Oklch,
    pub fill: Oklch,
}

pub fn generate_brand_derivatives(brand: Oklch) -> BrandDerivatives {
    BrandDerivatives {
        tint: DerivativeRule::TINT.apply(brand),
        shade: DerivativeRule::SHADE.apply(brand),
        fill: DerivativeRule::FILL.apply(brand),
    }
}
