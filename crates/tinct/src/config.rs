// ABOUTME: tinct.toml loading with an explicit outcome for absent and corrupt files
// ABOUTME: Resolves file values into seeds, chroma shaping, theme selection and logging

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tinct_logging::{LoggingConfig, warn};
use tinct_palette::{ChromaShaping, Oklch, PaletteError, PaletteSeeds, ThemeSpec, TokenOwner};
use tinct_types::SeedParseError;

pub const CONFIG_FILE_NAME: &str = "tinct.toml";
pub const DEFAULT_THEME: &str = "light";

/// A seed as written in the file: `"0.55 0.15 220"` or `{ l = 0.55, c = 0.15, h = 220 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedValue {
    Text(String),
    Color(Oklch),
}

impl SeedValue {
    pub fn resolve(&self) -> Result<Oklch, SeedParseError> {
        match self {
            SeedValue::Text(text) => text.parse(),
            SeedValue::Color(color) => Ok(*color),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedsSection {
    #[serde(default)]
    pub brand: Option<SeedValue>,
    #[serde(default)]
    pub foundation: Option<SeedValue>,
}

/// The raw contents of `tinct.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// `light`, `dark`, or the name of a `[themes.<name>]` table
    #[serde(default)]
    pub theme: Option<String>,

    #[serde(default)]
    pub seeds: SeedsSection,

    #[serde(default)]
    pub chroma: ChromaShaping,

    #[serde(default)]
    pub themes: BTreeMap<String, ThemeSpec>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Resolved configuration used by the commands.
#[derive(Debug, Clone)]
pub struct Config {
    pub seeds: PaletteSeeds,
    pub shaping: ChromaShaping,
    pub theme: String,
    pub themes: BTreeMap<String, ThemeSpec>,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seeds: PaletteSeeds::default(),
            shaping: ChromaShaping::default(),
            theme: DEFAULT_THEME.to_string(),
            themes: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field} seed: {source}")]
    InvalidSeed {
        field: &'static str,
        #[source]
        source: SeedParseError,
    },

    #[error("theme '{name}' has no entries for {}", join_owners(missing))]
    IncompleteTheme {
        name: String,
        missing: Vec<TokenOwner>,
    },
}

fn join_owners(owners: &[TokenOwner]) -> String {
    owners
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why defaults were used instead of a config file.
#[derive(Debug)]
pub enum DefaultReason {
    Absent,
    Corrupt(ConfigError),
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultReason::Absent => f.write_str("no config file"),
            DefaultReason::Corrupt(err) => write!(f, "config file rejected: {err}"),
        }
    }
}

/// The result of looking for a config file. Never an error: callers decide
/// whether an absent or corrupt file matters.
#[derive(Debug)]
pub enum ConfigLoad {
    Loaded(Config),
    Defaulted { config: Config, reason: DefaultReason },
}

impl ConfigLoad {
    pub fn defaulted(reason: DefaultReason) -> Self {
        ConfigLoad::Defaulted {
            config: Config::default(),
            reason,
        }
    }

    pub fn config(&self) -> &Config {
        match self {
            ConfigLoad::Loaded(config) | ConfigLoad::Defaulted { config, .. } => config,
        }
    }

    pub fn into_config(self) -> Config {
        match self {
            ConfigLoad::Loaded(config) | ConfigLoad::Defaulted { config, .. } => config,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ConfigLoad::Loaded(_))
    }

    pub fn reason(&self) -> Option<&DefaultReason> {
        match self {
            ConfigLoad::Loaded(_) => None,
            ConfigLoad::Defaulted { reason, .. } => Some(reason),
        }
    }
}

/// `<config_dir>/tinct/tinct.toml`, when the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tinct").join(CONFIG_FILE_NAME))
}

/// Read and resolve a config file.
pub fn load_config(path: &Path) -> ConfigLoad {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return ConfigLoad::defaulted(DefaultReason::Absent);
        }
        Err(source) => {
            return ConfigLoad::defaulted(DefaultReason::Corrupt(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }));
        }
    };

    match text.parse::<Config>() {
        Ok(config) => ConfigLoad::Loaded(config),
        Err(err) => ConfigLoad::defaulted(DefaultReason::Corrupt(err)),
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Config::from_raw(toml::from_str(text)?)
    }
}

impl Config {
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut seeds = PaletteSeeds::default();
        if let Some(brand) = &raw.seeds.brand {
            seeds.brand = brand
                .resolve()
                .map_err(|source| ConfigError::InvalidSeed {
                    field: "brand",
                    source,
                })?;
        }
        if let Some(foundation) = &raw.seeds.foundation {
            let foundation = foundation
                .resolve()
                .map_err(|source| ConfigError::InvalidSeed {
                    field: "foundation",
                    source,
                })?;
            seeds.foundation = Some(foundation);
        }

        let mut themes = BTreeMap::new();
        for (name, spec) in raw.themes {
            let missing = spec.refs.missing_entries();
            if !missing.is_empty() {
                return Err(ConfigError::IncompleteTheme { name, missing });
            }
            let spec = spec.with_name(name.clone());
            themes.insert(name, spec);
        }

        Ok(Self {
            seeds,
            shaping: raw.chroma,
            theme: raw.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            themes,
            logging: raw.logging,
        })
    }

    /// The selected theme. Custom tables shadow built-ins of the same name.
    pub fn resolve_theme(&self) -> Result<ThemeSpec, PaletteError> {
        self.theme_named(&self.theme)
    }

    pub fn theme_named(&self, name: &str) -> Result<ThemeSpec, PaletteError> {
        match self.themes.get(name) {
            Some(spec) => Ok(spec.clone()),
            None => ThemeSpec::builtin(name),
        }
    }

    /// Built-in names followed by custom ones, without duplicates.
    pub fn theme_names(&self) -> Vec<String> {
        let mut names: Vec<String> = ThemeSpec::BUILTIN_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect();
        for name in self.themes.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.shaping.is_sanitized() {
            return Err("chroma ratios must be finite and non-negative".to_string());
        }
        Ok(())
    }

    /// Copy with negative or non-finite chroma shaping replaced by 0.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if let Err(reason) = self.validate() {
            let original = config.shaping;
            config.shaping = original.sanitized();
            warn!(
                reason = %reason,
                neutral_ratio = original.neutral_ratio,
                neutral_max = original.neutral_max,
                foundation_ratio = original.foundation_ratio,
                "Invalid chroma shaping, clamping negative values to 0"
            );
        }

        config
    }
}
