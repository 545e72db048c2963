// ABOUTME: Command line arguments for the tinct binary
// ABOUTME: Global seed and theme flags override the config file; subcommands pick the output

use clap::{ArgAction, Parser as ClapParser, Subcommand};
use std::path::PathBuf;
use tinct_palette::{ColorToken, Oklch};

use crate::config::Config;

#[derive(ClapParser, Debug)]
#[command(
    name = "tinct",
    version,
    about = "Generate contrast-checked OKLCH palettes and CSS variables from seed colors"
)]
pub struct Cli {
    /// Brand seed as "L C H", e.g. "0.55 0.15 220".
    #[arg(long, global = true, value_name = "L C H")]
    pub brand: Option<Oklch>,

    /// Foundation seed as "L C H". Defaults to a near-neutral matching the theme.
    #[arg(long, global = true, value_name = "L C H")]
    pub foundation: Option<Oklch>,

    /// Theme name: light, dark, or a [themes.<name>] table from the config file.
    #[arg(short, long, global = true)]
    pub theme: Option<String>,

    /// Config file (defaults to <config dir>/tinct/tinct.toml).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fraction of brand chroma carried into the neutral ramp.
    #[arg(long, global = true)]
    pub neutral_chroma_ratio: Option<f64>,

    /// Upper bound on neutral ramp chroma.
    #[arg(long, global = true)]
    pub neutral_max_chroma: Option<f64>,

    /// Fraction of foundation chroma carried into the foundation ramp.
    #[arg(long, global = true)]
    pub foundation_chroma_ratio: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print every semantic token as a CSS custom property.
    Css {
        /// Selector wrapping the declarations.
        #[arg(long, default_value = ":root")]
        selector: String,
    },

    /// Print the class rule sets that bind tokens to CSS properties.
    Rules,

    /// Print the 24 primitive colors.
    Primitives,

    /// Print one token's color, e.g. `context-canvas-title`.
    Get { token: ColorToken },

    /// Report every ink decision; exits non-zero when any ink fell back.
    Check,
}

impl Cli {
    /// Overlay flag values on the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(brand) = self.brand {
            config.seeds.brand = brand;
        }
        if let Some(foundation) = self.foundation {
            config.seeds.foundation = Some(foundation);
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(ratio) = self.neutral_chroma_ratio {
            config.shaping.neutral_ratio = ratio;
        }
        if let Some(max) = self.neutral_max_chroma {
            config.shaping.neutral_max = max;
        }
        if let Some(ratio) = self.foundation_chroma_ratio {
            config.shaping.foundation_ratio = ratio;
        }
    }
}
