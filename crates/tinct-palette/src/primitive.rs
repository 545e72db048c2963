// ABOUTME: The flat primitive palette keyed by N0..N9, F0..F9, B, Bt, Bs, Bf
// ABOUTME: Built once from seeds and a step table; every color is gamut valid

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tinct_types::{ChromaShaping, Oklch, PaletteSeeds, ThemeMode};

use crate::error::KeyParseError;
use crate::gamut::clamp_to_gamut;
use crate::ramp::{
    LightnessSteps, RAMP_LEN, generate_brand_derivatives, generate_foundation_ramp,
    generate_neutral_ramp,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PrimitiveKey {
    N0,
    N1,
    N2,
    N3,
    N4,
    N5,
    N6,
    N7,
    N8,
    N9,
    F0,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    /// Brand seed
    B,
    /// Brand tint
    Bt,
    /// Brand shade
    Bs,
    /// Brand fill
    Bf,
}

use PrimitiveKey::*;

impl PrimitiveKey {
    pub const COUNT: usize = 24;

    pub const ALL: [PrimitiveKey; Self::COUNT] = [
        N0, N1, N2, N3, N4, N5, N6, N7, N8, N9, F0, F1, F2, F3, F4, F5, F6, F7, F8, F9, B, Bt, Bs,
        Bf,
    ];

    pub const NEUTRAL: [PrimitiveKey; RAMP_LEN] = [N0, N1, N2, N3, N4, N5, N6, N7, N8, N9];

    pub const FOUNDATION: [PrimitiveKey; RAMP_LEN] = [F0, F1, F2, F3, F4, F5, F6, F7, F8, F9];

    pub fn neutral(index: usize) -> Option<Self> {
        Self::NEUTRAL.get(index).copied()
    }

    pub fn foundation(index: usize) -> Option<Self> {
        Self::FOUNDATION.get(index).copied()
    }

    /// Position in [`PrimitiveKey::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The same position counted from the other end of its ramp. Brand keys
    /// have no ramp and map to themselves.
    pub fn mirrored(self) -> Self {
        match self.index() {
            i @ 0..=9 => Self::NEUTRAL[RAMP_LEN - 1 - i],
            i @ 10..=19 => Self::FOUNDATION[RAMP_LEN - 1 - (i - RAMP_LEN)],
            _ => self,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            N0 => "N0",
            N1 => "N1",
            N2 => "N2",
            N3 => "N3",
            N4 => "N4",
            N5 => "N5",
            N6 => "N6",
            N7 => "N7",
            N8 => "N8",
            N9 => "N9",
            F0 => "F0",
            F1 => "F1",
            F2 => "F2",
            F3 => "F3",
            F4 => "F4",
            F5 => "F5",
            F6 => "F6",
            F7 => "F7",
            F8 => "F8",
            F9 => "F9",
            B => "B",
            Bt => "Bt",
            Bs => "Bs",
            Bf => "Bf",
        }
    }
}

impl fmt::Display for PrimitiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| KeyParseError::new("primitive key", s))
    }
}

impl TryFrom<String> for PrimitiveKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PrimitiveKey> for String {
    fn from(value: PrimitiveKey) -> Self {
        value.as_str().to_string()
    }
}

/// Exactly one gamut-valid color per [`PrimitiveKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitivePalette {
    colors: [Oklch; PrimitiveKey::COUNT],
    mode: ThemeMode,
}

impl PrimitivePalette {
    pub fn get(&self, key: PrimitiveKey) -> Oklch {
        self.colors[key.index()]
    }

    /// Direction of the step table the ramps were generated from.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveKey, Oklch)> + '_ {
        PrimitiveKey::ALL.iter().map(|key| (*key, self.get(*key)))
    }

    pub fn neutral_ramp(&self) -> [Oklch; RAMP_LEN] {
        PrimitiveKey::NEUTRAL.map(|key| self.get(key))
    }

    pub fn foundation_ramp(&self) -> [Oklch; RAMP_LEN] {
        PrimitiveKey::FOUNDATION.map(|key| self.get(key))
    }

    /// Palette key holding lightness rank `rank`, where `N0`/`F0` name the
    /// lightest step and `N9`/`F9` the darkest. Reference maps address ramps
    /// by rank, so a map keeps its polarity whichever step table built the
    /// palette.
    pub fn key_at_rank(&self, rank: PrimitiveKey) -> PrimitiveKey {
        match self.mode {
            ThemeMode::Light => rank,
            ThemeMode::Dark => rank.mirrored(),
        }
    }

    /// Color at lightness rank `rank`.
    pub fn ranked(&self, rank: PrimitiveKey) -> Oklch {
        self.get(self.key_at_rank(rank))
    }
}

impl Serialize for PrimitivePalette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PrimitiveKey::COUNT))?;
        for (key, color) in self.iter() {
            map.serialize_entry(key.as_str(), &color)?;
        }
        map.end()
    }
}

/// Derive the full primitive palette from seeds and one step table.
///
/// Seeds are normalized first, so any picker input yields a palette. The
/// foundation seed falls back to the step table's direction default.
pub fn generate_primitive_palette(
    seeds: &PaletteSeeds,
    steps: &LightnessSteps,
    shaping: &ChromaShaping,
) -> PrimitivePalette {
    let shaping = shaping.sanitized();
    let mode = steps.mode();
    let brand = seeds.brand.normalized();
    let foundation = seeds.foundation_for(mode).normalized();

    let neutral = generate_neutral_ramp(brand, steps, shaping.neutral_ratio, shaping.neutral_max);
    let found = generate_foundation_ramp(foundation, steps, shaping.foundation_ratio);
    let derivatives = generate_brand_derivatives(brand);

    let mut colors = [Oklch::BLACK; PrimitiveKey::COUNT];
    for (i, color) in neutral.into_iter().enumerate() {
        colors[PrimitiveKey::NEUTRAL[i].index()] = color;
    }
    for (i, color) in found.into_iter().enumerate() {
        colors[PrimitiveKey::FOUNDATION[i].index()] = color;
    }
    colors[B.index()] = clamp_to_gamut(brand);
    colors[Bt.index()] = derivatives.tint;
    colors[Bs.index()] = derivatives.shade;
    colors[Bf.index()] = derivatives.fill;

    PrimitivePalette { colors, mode }
}
