// ABOUTME: Runs one subcommand against a resolved configuration
// ABOUTME: Produces stdout text plus a success flag so the binary stays a thin shell

use anyhow::{Context, Result};
use tinct_palette::{
    ColorToken, GeneratedPalette, PrimitivePalette, ResolvedInk, generate_palette,
    to_css_rule_sets_text,
};

use crate::cli::Command;
use crate::config::Config;

/// What a command printed and whether it passed.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Resolve the configured theme and run the palette pipeline.
pub fn generate(config: &Config) -> Result<GeneratedPalette> {
    let theme = config.resolve_theme().with_context(|| {
        format!(
            "Cannot use theme '{}' (available: {})",
            config.theme,
            config.theme_names().join(", ")
        )
    })?;

    generate_palette(&config.seeds, &theme, &config.shaping)
        .with_context(|| format!("Failed to generate palette for theme '{}'", theme.name))
}

pub fn run(command: &Command, config: &Config) -> Result<CommandOutput> {
    match command {
        Command::Rules => Ok(CommandOutput::ok(to_css_rule_sets_text())),
        Command::Css { selector } => {
            let generated = generate(config)?;
            Ok(CommandOutput::ok(generated.to_css_text(selector)))
        }
        Command::Primitives => {
            let generated = generate(config)?;
            Ok(CommandOutput::ok(render_primitives(&generated.primitives)))
        }
        Command::Get { token } => {
            let generated = generate(config)?;
            Ok(CommandOutput::ok(render_token(&generated, *token)))
        }
        Command::Check => {
            let generated = generate(config)?;
            Ok(CommandOutput {
                text: render_check_report(&generated),
                success: !generated.is_degraded(),
            })
        }
    }
}

/// One `KEY oklch(...)` line per primitive, in palette order.
pub fn render_primitives(palette: &PrimitivePalette) -> String {
    let mut out = String::new();
    for (key, color) in palette.iter() {
        out.push_str(&format!("{key} {}\n", color.to_css()));
    }
    out
}

pub fn render_token(generated: &GeneratedPalette, token: ColorToken) -> String {
    format!("{}\n", generated.get(token).to_css())
}

fn location(resolved: &ResolvedInk) -> String {
    match resolved.state {
        Some(state) => format!("{}:{state}", resolved.owner),
        None => resolved.owner.to_string(),
    }
}

/// Every ink decision with its contrast, followed by a summary line.
pub fn render_check_report(generated: &GeneratedPalette) -> String {
    let mut out = String::new();
    for resolved in &generated.resolutions {
        let choice = &resolved.choice;
        let status = if choice.degraded { "FALLBACK" } else { "ok" };
        out.push_str(&format!(
            "{:<32} {:<10} {:<3} {:>6.2}:1  min {:.1}  {status}\n",
            location(resolved),
            resolved.role.as_str(),
            choice.key.as_str(),
            choice.contrast,
            choice.required,
        ));
    }

    out.push_str(&format!(
        "theme {}: {} inks checked, {} fell back\n",
        generated.theme,
        generated.resolutions.len(),
        generated.warnings.len()
    ));
    for warning in &generated.warnings {
        out.push_str(&format!("warning: {warning}\n"));
    }
    out
}
