// ABOUTME: Named themes and the end-to-end seeds -> primitives -> semantic pipeline
// ABOUTME: A theme pairs a lightness step table with a reference map

use serde::{Deserialize, Serialize};
use tinct_logging::{info, instrument, warn};
use tinct_types::{ChromaShaping, Oklch, PaletteSeeds, ThemeMode};

use crate::css::to_css_text;
use crate::error::{PaletteError, Result};
use crate::primitive::{PrimitivePalette, generate_primitive_palette};
use crate::ramp::LightnessSteps;
use crate::reference::{PrimitiveRefMap, create_primitive_ref_map};
use crate::semantic::{
    ContrastWarning, ResolvedInk, SemanticColorPalette, create_semantic_from_primitive,
};
use crate::token::ColorToken;

/// A named step table plus reference map. Custom themes are pure data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSpec {
    /// Filled from the table key when loaded from a config file
    #[serde(default, skip_serializing)]
    pub name: String,
    pub steps: LightnessSteps,
    pub refs: PrimitiveRefMap,
}

impl ThemeSpec {
    pub const BUILTIN_NAMES: [&'static str; 2] = ["light", "dark"];

    pub fn new(name: impl Into<String>, steps: LightnessSteps, refs: PrimitiveRefMap) -> Self {
        Self {
            name: name.into(),
            steps,
            refs,
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::new(
            mode.as_str(),
            LightnessSteps::for_mode(mode),
            create_primitive_ref_map(mode),
        )
    }

    pub fn light() -> Self {
        Self::for_mode(ThemeMode::Light)
    }

    pub fn dark() -> Self {
        Self::for_mode(ThemeMode::Dark)
    }

    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "light" => Ok(Self::light()),
            "dark" => Ok(Self::dark()),
            other => Err(PaletteError::UnknownTheme(other.to_string())),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.steps.mode()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPalette {
    pub theme: String,
    pub primitives: PrimitivePalette,
    pub semantic: SemanticColorPalette,
    pub warnings: Vec<ContrastWarning>,
    pub resolutions: Vec<ResolvedInk>,
}

impl GeneratedPalette {
    pub fn get(&self, token: ColorToken) -> Oklch {
        self.semantic.get(token)
    }

    pub fn to_css_text(&self, selector: &str) -> String {
        to_css_text(&self.semantic, selector)
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run ramps, primitives and semantic assembly for one theme.
#[instrument(skip_all, fields(theme = %theme.name))]
pub fn generate_palette(
    seeds: &PaletteSeeds,
    theme: &ThemeSpec,
    shaping: &ChromaShaping,
) -> Result<GeneratedPalette> {
    let primitives = generate_primitive_palette(seeds, &theme.steps, shaping);
    let assembly = create_semantic_from_primitive(&primitives, &theme.refs)?;

    if assembly.warnings.is_empty() {
        info!(brand = %seeds.brand, "Palette generated");
    } else {
        warn!(
            brand = %seeds.brand,
            warnings = assembly.warnings.len(),
            "Palette generated with degraded contrast"
        );
    }

    Ok(GeneratedPalette {
        theme: theme.name.clone(),
        primitives,
        semantic: assembly.palette,
        warnings: assembly.warnings,
        resolutions: assembly.resolutions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(ThemeSpec::builtin("light").unwrap().mode(), ThemeMode::Light);
        assert_eq!(ThemeSpec::builtin("dark").unwrap().name, "dark");
        assert_eq!(
            ThemeSpec::builtin("sepia"),
            Err(PaletteError::UnknownTheme("sepia".to_string()))
        );
        for name in ThemeSpec::BUILTIN_NAMES {
            assert!(ThemeSpec::builtin(name).is_ok());
        }
    }

    #[test]
    fn test_generated_palette_accessors() {
        let generated =
            generate_palette(&PaletteSeeds::default(), &ThemeSpec::light(), &ChromaShaping::default())
                .unwrap();
        assert_eq!(generated.theme, "light");
        assert!(!generated.is_degraded());
        let token = "context-canvas-surface".parse::<ColorToken>().unwrap();
        assert_eq!(generated.get(token), generated.semantic.context.canvas.surface);
        assert!(generated.to_css_text(":root").starts_with(":root {\n"));
    }

    #[test]
    fn test_theme_spec_from_toml() {
        let dark = ThemeSpec::dark();
        let text = toml::to_string(&dark).unwrap();
        let parsed: ThemeSpec = toml::from_str(&text).unwrap();
        assert_eq!(parsed.steps, dark.steps);
        assert_eq!(parsed.refs, dark.refs);
        assert!(parsed.name.is_empty());
        assert_eq!(parsed.with_name("night").name, "night");
    }

    #[test]
    fn test_non_monotonic_steps_rejected_on_load() {
        let mut value = toml::Value::try_from(ThemeSpec::light()).unwrap();
        value["steps"] = toml::Value::Array(vec![toml::Value::Float(0.5); 10]);
        let text = toml::to_string(&value).unwrap();
        let err = toml::from_str::<ThemeSpec>(&text).unwrap_err();
        assert!(err.to_string().contains("strictly"), "{err}");
    }
}
