//! # Redis Cache Store
//!
//! [`CacheStore`] backed by a Redis-compatible server through a
//! multiplexed [`ConnectionManager`], which reconnects on its own after
//! transient failures.

use crate::infrastructure::cache::traits::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use redis::Client;
use redis::aio::ConnectionManager;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

/// Redis implementation of [`CacheStore`].
///
/// # Examples
///
/// ```ignore
/// use tax_provider::infrastructure::cache::RedisCacheStore;
///
/// let store = RedisCacheStore::connect("redis://127.0.0.1:6379").await?;
/// ```
#[derive(Clone)]
pub struct RedisCacheStore {
    connection: ConnectionManager,
}

impl RedisCacheStore {
    /// Opens a client for `url` and verifies it with `PING`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server
    /// does not answer.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = Client::open(url).map_err(|e| {
            error!(error = %e, "failed to create redis client");
            CacheError::connection(e.to_string())
        })?;

        let connection = ConnectionManager::new(client).await.map_err(|e| {
            error!(error = %e, "failed to create redis connection manager");
            CacheError::connection(e.to_string())
        })?;

        let mut conn = connection.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| CacheError::connection(format!("ping failed: {e}")))?;

        debug!("connected to redis cache");
        Ok(Self { connection })
    }

    /// Wraps an existing connection manager.
    #[must_use]
    pub fn from_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

impl fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCacheStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection.clone();
        redis::cmd("GET")
            .arg(key)
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(|e| CacheError::command("GET", e.to_string()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::command("SET", e.to_string()))
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.connection.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async::<i64>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| CacheError::command("DEL", e.to_string()))
    }
}
