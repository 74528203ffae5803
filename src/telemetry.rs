//! # Telemetry
//!
//! Installs the global `tracing` subscriber for processes that embed the
//! tax provider. Libraries and tests that install their own subscriber
//! should not call [`init_tracing`].

use crate::config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error type for subscriber installation.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter {directive:?}: {message}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Builds the event filter. `RUST_LOG` wins over the configured level.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` if the configured level does not
/// parse and `RUST_LOG` is unset.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
            directive: config.level.clone(),
            message: e.to_string(),
        })
    })
}

/// Installs a fmt subscriber with the configured filter and format.
///
/// # Errors
///
/// Returns `TelemetryError` if the filter is invalid or a global subscriber
/// is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    installed.map_err(|e| TelemetryError::Install(e.to_string()))?;
    tracing::debug!(level = %config.level, format = %config.format, "tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "tax_provider=loud".to_string(),
            format: LogFormat::Pretty,
        };
        let err = env_filter(&config).err();
        assert!(matches!(err, Some(TelemetryError::InvalidFilter { .. })));
    }

    #[test]
    fn valid_level_builds_filter() {
        let config = LoggingConfig::default();
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn second_install_fails() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Json,
        };
        let _ = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(matches!(second, Err(TelemetryError::Install(_))));
    }
}
