// ABOUTME: Per-theme tables mapping contexts and components to primitive keys
// ABOUTME: Tables are plain values; built-in light/dark tables plus TOML-loaded ones

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tinct_types::{Oklch, ThemeMode};

use crate::gamut::clamp_to_gamut;
use crate::primitive::PrimitiveKey::{self, *};
use crate::primitive::PrimitivePalette;
use crate::roles::{
    ContextName, InkRole, InteractionState, StatefulComponent, StaticComponent, TokenOwner,
};

/// Points at a palette position, optionally overridden by an exact color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PrimitiveRefRepr")]
pub struct PrimitiveRef {
    pub key: PrimitiveKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Oklch>,
}

// Accepts either `"N0"` or `{ key = "N0", color = { l = .., c = .., h = .. } }`
#[derive(Deserialize)]
#[serde(untagged)]
enum PrimitiveRefRepr {
    Key(PrimitiveKey),
    Full {
        key: PrimitiveKey,
        #[serde(default)]
        color: Option<Oklch>,
    },
}

impl From<PrimitiveRefRepr> for PrimitiveRef {
    fn from(repr: PrimitiveRefRepr) -> Self {
        match repr {
            PrimitiveRefRepr::Key(key) => PrimitiveRef::key(key),
            PrimitiveRefRepr::Full { key, color } => PrimitiveRef { key, color },
        }
    }
}

impl PrimitiveRef {
    pub fn key(key: PrimitiveKey) -> Self {
        Self { key, color: None }
    }

    pub fn with_color(key: PrimitiveKey, color: Oklch) -> Self {
        Self {
            key,
            color: Some(color),
        }
    }

    /// The override color (gamut clamped) or the palette color at lightness
    /// rank `key`.
    pub fn resolve(&self, palette: &PrimitivePalette) -> Oklch {
        match self.color {
            Some(color) => clamp_to_gamut(color),
            None => palette.ranked(self.key),
        }
    }
}

impl From<PrimitiveKey> for PrimitiveRef {
    fn from(key: PrimitiveKey) -> Self {
        PrimitiveRef::key(key)
    }
}

/// Candidate ink keys per role, in preference order for ties. Ramp keys are
/// lightness ranks like every other key in a table.
pub type InkPools = BTreeMap<InkRole, Vec<PrimitiveKey>>;

/// Table entry for a context or static component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRefs {
    pub surface: PrimitiveRef,
    pub tint_surface: PrimitiveRef,
    /// Brand color used for emphasis on this surface.
    pub accent: PrimitiveRef,
    pub ink: InkPools,
}

/// Table entry for one state of a stateful component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRefs {
    pub surface: PrimitiveRef,
    pub ink: InkPools,
}

pub type StatefulRefs = BTreeMap<InteractionState, StateRefs>;

/// A complete theme table. Ramp keys name lightness ranks (`N0` lightest),
/// so the table alone decides whether surfaces sit at the light or dark end.
/// Swapping it swaps the semantic palette without regenerating primitives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrimitiveRefMap {
    #[serde(default)]
    pub contexts: BTreeMap<ContextName, SurfaceRefs>,
    #[serde(default)]
    pub components: BTreeMap<StaticComponent, SurfaceRefs>,
    #[serde(default)]
    pub stateful: BTreeMap<StatefulComponent, StatefulRefs>,
}

impl PrimitiveRefMap {
    /// Owners that have no entry in this table.
    pub fn missing_entries(&self) -> Vec<TokenOwner> {
        TokenOwner::all()
            .into_iter()
            .filter(|owner| match owner {
                TokenOwner::Context(c) => !self.contexts.contains_key(c),
                TokenOwner::Component(c) => !self.components.contains_key(c),
                TokenOwner::Stateful(c) => !self.stateful.contains_key(c),
            })
            .collect()
    }
}

/// The built-in table for a theme direction.
pub fn create_primitive_ref_map(mode: ThemeMode) -> PrimitiveRefMap {
    match mode {
        ThemeMode::Light => light_table(),
        ThemeMode::Dark => dark_table(),
    }
}

fn pools(entries: &[(InkRole, &[PrimitiveKey])]) -> InkPools {
    entries
        .iter()
        .map(|(role, keys)| (*role, keys.to_vec()))
        .collect()
}

fn surface(
    surface: PrimitiveKey,
    tint_surface: PrimitiveKey,
    accent: PrimitiveKey,
    ink: InkPools,
) -> SurfaceRefs {
    SurfaceRefs {
        surface: surface.into(),
        tint_surface: tint_surface.into(),
        accent: accent.into(),
        ink,
    }
}

fn stateful(states: [(InteractionState, PrimitiveKey, InkPools); 4]) -> StatefulRefs {
    states
        .into_iter()
        .map(|(state, surface, ink)| {
            (
                state,
                StateRefs {
                    surface: surface.into(),
                    ink,
                },
            )
        })
        .collect()
}

// Ink for surfaces at the light end of the ramp
fn on_light() -> InkPools {
    pools(&[
        (InkRole::Title, &[N9, N8]),
        (InkRole::Body, &[N8, N7]),
        (InkRole::Meta, &[N7, N6, N5]),
        (InkRole::LinkText, &[Bs, B]),
        (InkRole::Highlight, &[Bs, B, Bf]),
        (InkRole::Border, &[N5, N4, N3]),
        (InkRole::Divider, &[N4, N3, N2]),
    ])
}

// Ink for surfaces at the dark end of the ramp
fn on_dark() -> InkPools {
    pools(&[
        (InkRole::Title, &[N0, N1]),
        (InkRole::Body, &[N1, N2]),
        (InkRole::Meta, &[N2, N3, N4]),
        (InkRole::LinkText, &[Bt, B]),
        (InkRole::Highlight, &[Bt, B, Bf]),
        (InkRole::Border, &[N4, N5, N6]),
        (InkRole::Divider, &[N5, N6, N7]),
    ])
}

// Contrast section of a light theme: a dark band
fn inverted_light() -> InkPools {
    pools(&[
        (InkRole::Title, &[N0, N1]),
        (InkRole::Body, &[N1, N2]),
        (InkRole::Meta, &[N2, N3, N4]),
        (InkRole::LinkText, &[Bt, N1]),
        (InkRole::Highlight, &[Bt, N0]),
        (InkRole::Border, &[N4, N5, N6, N7]),
        (InkRole::Divider, &[N5, N6, N7, N8]),
    ])
}

// Contrast section of a dark theme: a light band
fn inverted_dark() -> InkPools {
    pools(&[
        (InkRole::Title, &[N9, N8]),
        (InkRole::Body, &[N8, N7]),
        (InkRole::Meta, &[N7, N6, N5]),
        (InkRole::LinkText, &[Bt, N8]),
        (InkRole::Highlight, &[Bt, N9]),
        (InkRole::Border, &[N5, N4, N3, N2]),
        (InkRole::Divider, &[N4, N3, N2, N1]),
    ])
}

// Saturated brand fills: only the ramp extremes are safe
fn on_brand() -> InkPools {
    pools(&[
        (InkRole::Title, &[N0, N9]),
        (InkRole::Border, &[N0, N9]),
        (InkRole::LinkText, &[N0, N9]),
    ])
}

fn quiet_light() -> InkPools {
    pools(&[
        (InkRole::Title, &[N9, N8]),
        (InkRole::Border, &[N6, N5, N4]),
        (InkRole::LinkText, &[Bs, B, N9]),
    ])
}

fn quiet_dark() -> InkPools {
    pools(&[
        (InkRole::Title, &[N0, N1]),
        (InkRole::Border, &[N3, N4, N5]),
        (InkRole::LinkText, &[Bs, B, N0]),
    ])
}

// Disabled controls: neutral ink only, starting from the mid ramp so the
// gentlest legible step wins
fn muted_light() -> InkPools {
    pools(&[
        (InkRole::Title, &[N6, N7, N8]),
        (InkRole::Border, &[N2, N3, N4]),
        (InkRole::LinkText, &[N6, N7, N8]),
    ])
}

fn muted_dark() -> InkPools {
    pools(&[
        (InkRole::Title, &[N3, N2, N1]),
        (InkRole::Border, &[N7, N6, N5]),
        (InkRole::LinkText, &[N3, N2, N1]),
    ])
}

fn light_table() -> PrimitiveRefMap {
    use InteractionState::*;

    PrimitiveRefMap {
        contexts: BTreeMap::from([
            (ContextName::Canvas, surface(N0, N1, Bf, on_light())),
            (ContextName::SectionNeutral, surface(N1, N2, Bf, on_light())),
            (ContextName::SectionTint, surface(Bt, N1, Bf, on_light())),
            (ContextName::SectionContrast, surface(N9, N8, Bt, inverted_light())),
        ]),
        components: BTreeMap::from([
            (StaticComponent::Card, surface(F0, F1, Bf, on_light())),
            (StaticComponent::CardFlat, surface(F1, F2, Bf, on_light())),
        ]),
        stateful: BTreeMap::from([
            (
                StatefulComponent::Action,
                stateful([
                    (Default, Bf, on_brand()),
                    (Hover, B, on_brand()),
                    (Active, Bs, on_brand()),
                    (Disabled, N2, muted_light()),
                ]),
            ),
            (
                StatefulComponent::ActionQuiet,
                stateful([
                    (Default, N1, quiet_light()),
                    (Hover, N2, quiet_light()),
                    (Active, N3, quiet_light()),
                    (Disabled, N0, muted_light()),
                ]),
            ),
        ]),
    }
}

fn dark_table() -> PrimitiveRefMap {
    use InteractionState::*;

    PrimitiveRefMap {
        contexts: BTreeMap::from([
            (ContextName::Canvas, surface(N9, N8, B, on_dark())),
            (ContextName::SectionNeutral, surface(N8, N7, B, on_dark())),
            (ContextName::SectionTint, surface(Bs, N8, B, on_dark())),
            (ContextName::SectionContrast, surface(N0, N1, Bf, inverted_dark())),
        ]),
        components: BTreeMap::from([
            (StaticComponent::Card, surface(F8, F7, B, on_dark())),
            (StaticComponent::CardFlat, surface(F9, F8, B, on_dark())),
        ]),
        stateful: BTreeMap::from([
            (
                StatefulComponent::Action,
                stateful([
                    (Default, Bf, on_brand()),
                    (Hover, Bs, on_brand()),
                    (Active, Bt, on_brand()),
                    (Disabled, N7, muted_dark()),
                ]),
            ),
            (
                StatefulComponent::ActionQuiet,
                stateful([
                    (Default, N8, quiet_dark()),
                    (Hover, N7, quiet_dark()),
                    (Active, N6, quiet_dark()),
                    (Disabled, N9, muted_dark()),
                ]),
            ),
        ]),
    }
}
