// ABOUTME: Error types for palette assembly and name parsing
// ABOUTME: Theme table defects fail loudly instead of silently dropping tokens

use thiserror::Error;

use crate::roles::InkRole;

pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("Invalid lightness steps: {0}")]
    InvalidSteps(String),

    #[error("Theme table has no entry for {entry}")]
    MissingEntry { entry: String },

    #[error("Theme table entry {entry} has no candidate pool for {role}")]
    MissingRole { entry: String, role: InkRole },

    #[error("Theme table entry {entry} has an empty candidate pool for {role}")]
    EmptyPool { entry: String, role: InkRole },

    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),
}

impl PaletteError {
    pub fn missing_entry(entry: impl ToString) -> Self {
        Self::MissingEntry {
            entry: entry.to_string(),
        }
    }
}

/// A name that does not belong to one of the closed key or role sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{name}'")]
pub struct KeyParseError {
    pub kind: &'static str,
    pub name: String,
}

impl KeyParseError {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// A CSS token name that does not address any semantic color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenParseError {
    #[error("Token '{0}' must start with 'context-' or 'component-'")]
    UnknownPrefix(String),

    #[error("Token '{0}' does not name a known context or component")]
    UnknownOwner(String),

    #[error("Token '{token}' has an invalid role: {reason}")]
    InvalidRole { token: String, reason: String },
}
