//! # Configuration
//!
//! Runtime settings for the tax provider.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/{ENV}.toml` when `ENV` is set (optional)
//! 4. Environment variables prefixed `TAX_PROVIDER__`, nested with `__`,
//!    e.g. `TAX_PROVIDER__CACHE__TTL_SECS=60`
//!
//! A `.env` file in the working directory is loaded before the environment
//! is read.

use crate::application::services::rate_cache::{DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TAX_PROVIDER";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxProviderConfig {
    /// Rate cache settings.
    pub cache: CacheConfig,
    /// Override store settings.
    pub database: DatabaseConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Rate cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis URL.
    pub url: String,
    /// Key prefix.
    pub namespace: String,
    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

/// Override store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres URL.
    pub url: String,
    /// Pool size.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/tax_provider".to_string(),
            max_connections: 5,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `tax_provider=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// A source could not be read or deserialized.
    #[error("configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("configuration validation error: {0}")]
    Validation(String),
}

impl TaxProviderConfig {
    /// Loads configuration from files and environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoadError` if a source is malformed or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigLoadError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML document, on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoadError` if the document is malformed or a value
    /// fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoadError::Validation` naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.cache.url.trim().is_empty() {
            return Err(ConfigLoadError::Validation("cache.url must not be empty".into()));
        }
        if self.cache.namespace.is_empty() || self.cache.namespace.contains(char::is_whitespace) {
            return Err(ConfigLoadError::Validation(
                "cache.namespace must be non-empty and contain no whitespace".into(),
            ));
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigLoadError::Validation("cache.ttl_secs must be > 0".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigLoadError::Validation("database.url must not be empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigLoadError::Validation(
                "database.max_connections must be > 0".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation("logging.level must not be empty".into()));
        }
        Ok(())
    }
}
