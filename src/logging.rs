//! # Structured Logging Module
//!
//! This module configures structured logging for wirefish on top of the
//! `tracing` ecosystem. Diagnostics go to stderr so they never mix with
//! JSON or CSV results on stdout, and the level is controlled through the
//! `WIREFISH_LOG` environment variable.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wirefish::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env()?;
//! init_logging(&config)?;
//!
//! tracing::info!("starting up");
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::error::{Result, WirefishError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "WIREFISH_LOG";

/// Configuration for structured logging
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    /// Create configuration from the environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(level) = std::env::var(LOG_ENV_VAR) {
            config.level = level;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(WirefishError::config(format!(
                "Invalid log level '{}'. Valid levels: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }
}

/// Initialize structured logging with the given configuration
///
/// Installs a stderr subscriber filtered by the configured level. Call once
/// at startup.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    config.validate()?;

    let env_filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();

    tracing::debug!(level = %config.level, "logging initialized");
    Ok(())
}
