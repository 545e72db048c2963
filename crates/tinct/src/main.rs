// ABOUTME: tinct binary entry point
// ABOUTME: Loads config, initializes logging, runs one subcommand and writes its output to stdout

use anyhow::{Context, Result, bail};
use clap::Parser as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tinct::{Cli, ConfigLoad, DefaultReason, default_config_path, load_config};
use tinct_logging::{LoggingConfig, LoggingGuard, debug, info, warn};

fn setup_logging(mut config: LoggingConfig, verbosity: u8) -> Result<LoggingGuard> {
    // Environment beats the config file, -v beats both
    config
        .apply_overrides(|key| std::env::var(key).ok())
        .context("Failed to apply logging overrides from environment")?;

    let guard = tinct_logging::init_logging_with_config(config.with_verbosity(verbosity))
        .context("Failed to initialize tinct logging")?;

    debug!("Tinct logging system initialized");
    Ok(guard)
}

/// An explicit `--config` must exist; the default location may be absent.
fn read_config(explicit: Option<&Path>) -> Result<(Option<PathBuf>, ConfigLoad)> {
    if let Some(path) = explicit {
        let load = load_config(path);
        if matches!(load.reason(), Some(DefaultReason::Absent)) {
            bail!("Config file {} does not exist", path.display());
        }
        return Ok((Some(path.to_path_buf()), load));
    }

    match default_config_path() {
        Some(path) => {
            let load = load_config(&path);
            Ok((Some(path), load))
        }
        None => Ok((None, ConfigLoad::defaulted(DefaultReason::Absent))),
    }
}

fn report_config(path: Option<&Path>, load: &ConfigLoad) {
    let shown = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".to_string());

    match load {
        ConfigLoad::Loaded(config) => info!(
            config_path = %shown,
            theme = %config.theme,
            custom_themes = config.themes.len(),
            "Loaded configuration"
        ),
        ConfigLoad::Defaulted {
            reason: DefaultReason::Absent,
            ..
        } => debug!(config_path = %shown, "No config file found, using defaults"),
        ConfigLoad::Defaulted {
            reason: DefaultReason::Corrupt(err),
            ..
        } => warn!(
            config_path = %shown,
            error = %err,
            "Config file is invalid, using defaults"
        ),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (path, load) = read_config(cli.config.as_deref())?;
    let _guard = setup_logging(load.config().logging.clone(), cli.verbose)?;
    report_config(path.as_deref(), &load);

    let mut config = load.into_config();
    cli.apply_overrides(&mut config);
    let config = config.sanitized();

    let output = tinct::run(&cli.command, &config)?;
    io::stdout()
        .lock()
        .write_all(output.text.as_bytes())
        .context("Failed to write to stdout")?;

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
