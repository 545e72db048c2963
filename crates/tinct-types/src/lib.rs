// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for the palette engine and the CLI

pub mod color;
pub mod seeds;

// Re-export commonly used types
pub use color::{Oklch, SeedParseError};
pub use seeds::{ChromaShaping, PaletteSeeds, ThemeMode};
