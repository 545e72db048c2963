// ABOUTME: Output layers for the tracing registry
// ABOUTME: Stderr console, stderr JSON, and rolling file layers plus the env filter

use anyhow::{Context, Result};
use std::fs;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{FileConfig, LoggingConfig, OutputConfig};

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Console layer writing to stderr.
pub fn create_console_layer(config: &OutputConfig) -> Option<BoxedLayer> {
    if !config.console {
        return None;
    }

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    let layer = if config.compact {
        layer.compact().boxed()
    } else {
        layer.pretty().boxed()
    };

    Some(layer)
}

/// JSON lines on stderr.
pub fn create_json_layer(config: &OutputConfig) -> Option<BoxedLayer> {
    if !config.json {
        return None;
    }

    let layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .boxed();

    Some(layer)
}

/// Daily-rolled file layer. The returned guard flushes pending lines on drop.
pub fn create_file_layer(config: &FileConfig) -> Result<(BoxedLayer, WorkerGuard)> {
    let directory = config
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));

    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory: {}", directory.display()))?;

    let file_name = config
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid log file path")?;

    let (writer, guard) = non_blocking(rolling::daily(directory, file_name));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .boxed();

    Ok((layer, guard))
}

/// Build the filter from the configured level and module directives.
pub fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.0.to_string());

    for (module, level) in &config.module_levels {
        let directive = format!("{}={}", module, level.0)
            .parse()
            .with_context(|| format!("Invalid filter directive for module '{module}'"))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}
