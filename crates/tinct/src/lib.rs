// ABOUTME: Library side of the tinct binary
// ABOUTME: Config loading, argument parsing and command execution, kept testable outside main

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use commands::{CommandOutput, generate, run};
pub use config::{Config, ConfigError, ConfigLoad, DefaultReason, default_config_path, load_config};
