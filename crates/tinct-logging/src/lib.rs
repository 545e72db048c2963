// ABOUTME: Public API for tinct logging built on tokio-tracing
// ABOUTME: Centralized configuration and initialization for structured logging

pub mod config;
pub mod layers;
pub mod subscriber;


// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

pub use config::{LogLevel, LoggingConfig};
pub use subscriber::{LoggingGuard, init_subscriber};

use anyhow::Result;

/// Initialize logging with a caller-built configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<LoggingGuard> {
    init_subscriber(config)
}
