// ABOUTME: Primitive and semantic color palette engine
// ABOUTME: Seeds -> gamut-safe ramps -> primitive palette -> contrast-checked semantic tokens -> CSS

pub mod css;
pub mod error;
pub mod gamut;
pub mod ink;
pub mod pipeline;
pub mod primitive;
pub mod ramp;
pub mod reference;
pub mod roles;
pub mod semantic;
pub mod token;

#[cfg(test)]
mod pipeline_tests;

pub use css::{CssRuleSet, collect_css_rule_sets, to_css_rule_sets_text, to_css_text};
pub use error::{KeyParseError, PaletteError, Result, TokenParseError};
pub use gamut::{
    ContrastRatios, clamp_to_gamut, contrast_ratio, is_in_gamut, relative_luminance,
};
pub use ink::{
    InkChoice, InkSelection, ranked_pool, select_all_inks_for_surface, select_ink_for_surface,
    select_ink_for_surface_with_bg_y,
};
pub use pipeline::{GeneratedPalette, ThemeSpec, generate_palette};
pub use primitive::{PrimitiveKey, PrimitivePalette, generate_primitive_palette};
pub use ramp::{
    BrandDerivatives, DerivativeRule, LightnessSteps, generate_brand_derivatives,
    generate_foundation_ramp, generate_neutral_ramp,
};
pub use reference::{PrimitiveRef, PrimitiveRefMap, create_primitive_ref_map};
pub use roles::{
    ContextName, InkRole, InteractionState, StatefulComponent, StaticComponent, TokenOwner,
};
pub use semantic::{
    ContrastWarning, ResolvedInk, SemanticAssembly, SemanticColorPalette,
    create_semantic_from_primitive,
};
pub use token::{ColorToken, StatefulRole, SurfaceRole};

// Seed types live in the types crate; re-exported so callers need one import
pub use tinct_types::{ChromaShaping, Oklch, PaletteSeeds, ThemeMode};
