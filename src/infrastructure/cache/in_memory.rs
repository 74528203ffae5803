//! # In-Memory Cache Store
//!
//! [`CacheStore`] held in a [`DashMap`], for tests and single-process
//! deployments. Expiry is absolute and evaluated lazily on read.
//!
//! # Examples
//!
//! ```
//! use tax_provider::infrastructure::cache::{CacheStore, InMemoryCacheStore};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryCacheStore::new();
//! store.set_ex("k", "v", Duration::from_secs(30)).await.unwrap();
//! assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
//! # });
//! ```

use crate::domain::value_objects::timestamp::Timestamp;
use crate::infrastructure::cache::traits::{CacheResult, CacheStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Timestamp,
}

/// In-memory implementation of [`CacheStore`].
///
/// Counts writes and deletes so callers can assert on cache traffic.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: DashMap<String, StoredValue>,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an unexpired value exists for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.expires_at.is_expired())
    }

    /// Returns the number of stored keys, including expired ones not yet read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many `set_ex` calls were made.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns how many `del` calls were made.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.expires_at.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        self.entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: Timestamp::now().add_millis(ttl_ms),
            },
        );
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
