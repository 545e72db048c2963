// ABOUTME: Logging configuration and environment variable overrides
// ABOUTME: Log levels, per-module directives, and stderr/JSON/file output targets

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::Level;

/// Primary log level variable; `RUST_LOG` is consulted when it is unset.
pub const LOG_ENV: &str = "TINCT_LOG";
/// Enables the JSON layer when set to any value.
pub const LOG_JSON_ENV: &str = "TINCT_LOG_JSON";
/// Enables file output and points it at the given path.
pub const LOG_FILE_ENV: &str = "TINCT_LOG_FILE";

/// Wrapper for tracing::Level that implements Serialize/Deserialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(level_name(self.0))
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<LogLevel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_log_level(&s)
            .map(LogLevel)
            .map_err(serde::de::Error::custom)
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

/// Logging configuration for the CLI and library consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level
    pub level: LogLevel,

    /// Per-module overrides, e.g. `tinct_palette::ink = "debug"`
    pub module_levels: BTreeMap<String, LogLevel>,

    pub output: OutputConfig,

    pub file: FileConfig,
}

/// Which layers get installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Human readable output on stderr. Stdout is reserved for generated CSS.
    pub console: bool,

    /// Compact single-line console format instead of the pretty one
    pub compact: bool,

    /// JSON lines on stderr
    pub json: bool,

    /// Daily-rolled log file
    pub file: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Path to the log file (defaults to <data dir>/tinct/tinct.log)
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::WARN),
            module_levels: BTreeMap::new(),
            output: OutputConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            compact: true,
            json: false,
            file: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: default_log_file_path(),
        }
    }
}

impl LoggingConfig {
    /// Default configuration with process environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level_str) = lookup(LOG_ENV) {
            self.parse_directives(&level_str)
                .with_context(|| format!("Invalid {LOG_ENV} value '{level_str}'"))?;
        } else if let Some(rust_log) = lookup("RUST_LOG") {
            self.parse_directives(&rust_log)
                .context("Invalid RUST_LOG value")?;
        }

        if lookup(LOG_JSON_ENV).is_some() {
            self.output.json = true;
            self.output.console = false;
        }

        if let Some(path) = lookup(LOG_FILE_ENV) {
            self.output.file = true;
            self.file.path = PathBuf::from(path);
        }

        Ok(())
    }

    /// Parse `RUST_LOG` style directives: `warn` or `info,tinct_palette=debug`.
    fn parse_directives(&mut self, directives: &str) -> Result<()> {
        for directive in directives.split(',') {
            let directive = directive.trim();
            if directive.is_empty() {
                continue;
            }

            match directive.split_once('=') {
                Some((module, level_str)) => {
                    let level = parse_log_level(level_str).with_context(|| {
                        format!("Invalid log level '{level_str}' for module '{module}'")
                    })?;
                    self.module_levels
                        .insert(module.trim().to_string(), LogLevel(level));
                }
                None => {
                    self.level = LogLevel(
                        parse_log_level(directive)
                            .with_context(|| format!("Invalid global log level '{directive}'"))?,
                    );
                }
            }
        }
        Ok(())
    }

    /// Raise the global level by CLI verbosity (`-v` count) without ever lowering it.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        let requested = match verbosity {
            0 => return self,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        // tracing orders levels by verbosity: TRACE > DEBUG > ... > ERROR
        if requested > self.level.0 {
            self.level = LogLevel(requested);
        }
        self
    }
}

fn default_log_file_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("tinct").join("tinct.log"),
        None => PathBuf::from("tinct.log"),
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Parse a log level string (case-insensitive).
pub(crate) fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ),
    }
}
