// ABOUTME: OKLCH color value type shared by every pipeline stage
// ABOUTME: Normalizes picker input and formats colors as CSS oklch() values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A color in OKLCH: lightness in [0, 1], chroma >= 0, hue in degrees [0, 360).
///
/// Values built through [`Oklch::new`] or deserialized are always normalized.
/// Chroma is not bounded here; gamut clamping lives in the palette crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "OklchFields")]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

#[derive(Deserialize)]
struct OklchFields {
    l: f64,
    c: f64,
    #[serde(default)]
    h: f64,
}

impl From<OklchFields> for Oklch {
    fn from(fields: OklchFields) -> Self {
        Oklch::new(fields.l, fields.c, fields.h)
    }
}

impl Oklch {
    pub const BLACK: Oklch = Oklch {
        l: 0.0,
        c: 0.0,
        h: 0.0,
    };

    pub const WHITE: Oklch = Oklch {
        l: 1.0,
        c: 0.0,
        h: 0.0,
    };

    /// Build a normalized color. Never fails: out-of-range lightness is
    /// clamped, negative chroma floors at zero, hue wraps, non-finite parts
    /// become zero.
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        let l = if l.is_finite() { l.clamp(0.0, 1.0) } else { 0.0 };
        let c = if c.is_finite() { c.max(0.0) } else { 0.0 };
        let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        let h = if h >= 360.0 { 0.0 } else { h };
        Self { l, c, h }
    }

    /// Re-apply normalization to a value whose public fields may have been edited.
    pub fn normalized(self) -> Self {
        Self::new(self.l, self.c, self.h)
    }

    /// Hue in radians, for the polar to rectangular OKLab step.
    pub fn hue_radians(&self) -> f64 {
        self.h.to_radians()
    }

    /// CSS serialization with fixed precision so output is byte-stable.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.2})", self.l, self.c, self.h)
    }
}

/// Error parsing a seed color from text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeedParseError {
    #[error("expected three components \"L C H\", found {0}")]
    ComponentCount(usize),

    #[error("component '{0}' is not a number")]
    NotANumber(String),
}

impl FromStr for Oklch {
    type Err = SeedParseError;

    /// Accepts `0.55 0.15 220`, `55% 0.15 220deg`, or `oklch(0.55 0.15 220)`.
    /// Commas may separate components.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body
            .strip_prefix("oklch(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(body);

        let parts: Vec<&str> = body
            .split(|ch: char| ch.is_whitespace() || ch == ',')
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() != 3 {
            return Err(SeedParseError::ComponentCount(parts.len()));
        }

        let l = match parts[0].strip_suffix('%') {
            Some(pct) => parse_number(pct, parts[0])? / 100.0,
            None => parse_number(parts[0], parts[0])?,
        };
        let c = parse_number(parts[1], parts[1])?;
        let h = parse_number(parts[2].trim_end_matches("deg"), parts[2])?;

        Ok(Oklch::new(l, c, h))
    }
}

fn parse_number(text: &str, original: &str) -> Result<f64, SeedParseError> {
    text.parse::<f64>()
        .map_err(|_| SeedParseError::NotANumber(original.to_string()))
}
