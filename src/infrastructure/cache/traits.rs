//! # Cache Store Trait
//!
//! Port definition for the key-value store backing the rate cache.
//!
//! The contract mirrors the three commands the rate cache needs from a
//! Redis-compatible server: `GET key`, `SET key value EX seconds` and
//! `DEL key`.
//!
//! # Examples
//!
//! ```ignore
//! use tax_provider::infrastructure::cache::CacheStore;
//! use std::time::Duration;
//!
//! async fn example(store: &dyn CacheStore) {
//!     store.set_ex("txrtcache:prod_1:reg_1", "[]", Duration::from_secs(30)).await?;
//!     let value = store.get("txrtcache:prod_1:reg_1").await?;
//! }
//! ```

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Error type for cache store operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The store could not be reached.
    #[error("cache connection error: {0}")]
    Connection(String),

    /// A command was rejected or failed.
    #[error("cache command error: {command} - {message}")]
    Command {
        /// Command name (GET, SET, DEL).
        command: &'static str,
        /// Error message.
        message: String,
    },
}

impl CacheError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a command error.
    #[must_use]
    pub fn command(command: &'static str, message: impl Into<String>) -> Self {
        Self::Command {
            command,
            message: message.into(),
        }
    }
}

/// Result type for cache store operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store with per-key expiry.
#[async_trait]
pub trait CacheStore: Send + Sync + fmt::Debug {
    /// Returns the value stored under `key`, or `None` if absent or expired.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the store cannot be queried.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    ///
    /// Overwrites any existing value unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the write fails.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the delete fails.
    async fn del(&self, key: &str) -> CacheResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_display() {
        let err = CacheError::command("GET", "WRONGTYPE");
        assert_eq!(err.to_string(), "cache command error: GET - WRONGTYPE");
    }

    #[test]
    fn connection_error_display() {
        let err = CacheError::connection("refused");
        assert!(err.to_string().contains("refused"));
    }
}
