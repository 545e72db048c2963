// ABOUTME: Picks legible ink primitives for a surface from role candidate pools
// ABOUTME: Prefers the least contrasting qualifying ink; falls back to a ramp endpoint

use std::fmt;
use thiserror::Error;
use tinct_logging::warn;
use tinct_types::Oklch;

use crate::error::PaletteError;
use crate::gamut::{contrast_ratio_y, relative_luminance};
use crate::primitive::{PrimitiveKey, PrimitivePalette};
use crate::reference::InkPools;
use crate::roles::{InkRole, InkSet};

/// The ink chosen for one role on one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkChoice {
    pub key: PrimitiveKey,
    pub color: Oklch,
    pub contrast: f64,
    pub required: f64,
    /// No candidate met `required`; `key` is a neutral ramp endpoint.
    pub degraded: bool,
}

impl InkChoice {
    pub fn meets_threshold(&self) -> bool {
        self.contrast >= self.required
    }
}

/// Inks for all seven roles against one surface.
pub type InkSelection = InkSet<InkChoice>;

/// A role's candidate pool is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("no candidate pool for {0}")]
    Missing(InkRole),

    #[error("empty candidate pool for {0}")]
    Empty(InkRole),
}

impl PoolError {
    /// Attach the table entry the pool belongs to.
    pub fn at(self, entry: impl fmt::Display) -> PaletteError {
        let entry = entry.to_string();
        match self {
            PoolError::Missing(role) => PaletteError::MissingRole { entry, role },
            PoolError::Empty(role) => PaletteError::EmptyPool { entry, role },
        }
    }
}

/// Look up a role's non-empty candidate pool.
pub fn pool_for(pools: &InkPools, role: InkRole) -> Result<&[PrimitiveKey], PoolError> {
    match pools.get(&role) {
        None => Err(PoolError::Missing(role)),
        Some(keys) if keys.is_empty() => Err(PoolError::Empty(role)),
        Some(keys) => Ok(keys),
    }
}

/// A role's pool with its ranked keys translated to this palette's keys.
pub fn ranked_pool(
    pools: &InkPools,
    role: InkRole,
    palette: &PrimitivePalette,
) -> Result<Vec<PrimitiveKey>, PoolError> {
    let pool = pool_for(pools, role)?;
    Ok(pool.iter().map(|rank| palette.key_at_rank(*rank)).collect())
}

pub fn select_ink_for_surface(
    surface: Oklch,
    candidates: &[PrimitiveKey],
    role: InkRole,
    palette: &PrimitivePalette,
) -> InkChoice {
    select_ink_for_surface_with_bg_y(relative_luminance(surface), candidates, role, palette)
}

/// Select against a precomputed surface luminance.
///
/// Among candidates at or above the role threshold the lowest contrast wins,
/// ties keeping pool order. When none qualify the neutral endpoint with more
/// contrast is returned, marked degraded, and a warning is logged.
pub fn select_ink_for_surface_with_bg_y(
    bg_y: f64,
    candidates: &[PrimitiveKey],
    role: InkRole,
    palette: &PrimitivePalette,
) -> InkChoice {
    let required = role.min_contrast();
    let score = |key: PrimitiveKey| {
        let color = palette.get(key);
        let contrast = contrast_ratio_y(bg_y, relative_luminance(color));
        (key, color, contrast)
    };

    let mut best: Option<(PrimitiveKey, Oklch, f64)> = None;
    let mut best_rejected = 1.0_f64;
    for (key, color, contrast) in candidates.iter().map(|key| score(*key)) {
        if contrast < required {
            best_rejected = best_rejected.max(contrast);
            continue;
        }
        // strict comparison keeps the earlier candidate on ties
        if best.is_none_or(|(_, _, current)| contrast < current) {
            best = Some((key, color, contrast));
        }
    }

    if let Some((key, color, contrast)) = best {
        return InkChoice {
            key,
            color,
            contrast,
            required,
            degraded: false,
        };
    }

    let light_end = score(PrimitiveKey::N0);
    let dark_end = score(PrimitiveKey::N9);
    let (key, color, contrast) = if dark_end.2 > light_end.2 {
        dark_end
    } else {
        light_end
    };

    warn!(
        role = role.as_str(),
        surface_luminance = bg_y,
        best_contrast = best_rejected,
        required,
        fallback = key.as_str(),
        fallback_contrast = contrast,
        "No candidate ink meets the contrast threshold"
    );

    InkChoice {
        key,
        color,
        contrast,
        required,
        degraded: true,
    }
}

/// Resolve every ink role against one surface, computing its luminance once.
///
/// Pool keys are lightness ranks (see [`PrimitivePalette::key_at_rank`]);
/// the returned choices carry palette keys.
pub fn select_all_inks_for_surface(
    surface: Oklch,
    pools: &InkPools,
    palette: &PrimitivePalette,
) -> Result<InkSelection, PoolError> {
    let bg_y = relative_luminance(surface);
    InkSet::try_from_fn(|role| {
        let candidates = ranked_pool(pools, role, palette)?;
        Ok(select_ink_for_surface_with_bg_y(
            bg_y,
            &candidates,
            role,
            palette,
        ))
    })
}
