//! # Rate Cache
//!
//! Best-effort cache of resolved [`RateSet`]s keyed by product and region.
//!
//! The cache is an accelerator, never an authority. Every store fault is
//! absorbed here and reported as a miss:
//!
//! | Situation                | `get` result | Side effect            |
//! |--------------------------|--------------|------------------------|
//! | key absent or expired    | miss         | none                   |
//! | store unreachable        | miss         | warning logged         |
//! | value fails to decode    | miss         | key deleted            |
//! | value decodes            | hit          | none                   |
//!
//! Writes that fail are logged and dropped.

use crate::config::CacheConfig;
use crate::domain::value_objects::ids::{ID_DELIMITER, ProductId, RegionId};
use crate::domain::value_objects::tax_rate::RateSet;
use crate::infrastructure::cache::CacheStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Key prefix for rate cache entries.
pub const DEFAULT_CACHE_NAMESPACE: &str = "txrtcache";

/// Time-to-live of a cached rate set.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Configuration for [`RateCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCacheConfig {
    /// Key prefix.
    pub namespace: String,
    /// Entry time-to-live.
    pub ttl: Duration,
}

impl Default for RateCacheConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl RateCacheConfig {
    /// Sets the key prefix.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the entry time-to-live.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl From<&CacheConfig> for RateCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            ttl: Duration::from_secs(config.ttl_secs),
        }
    }
}

/// Cache-aside layer over a [`CacheStore`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tax_provider::application::services::RateCache;
/// use tax_provider::domain::value_objects::{ProductId, RegionId};
/// use tax_provider::infrastructure::cache::InMemoryCacheStore;
///
/// let cache = RateCache::with_defaults(Arc::new(InMemoryCacheStore::new()));
/// let key = cache.key(&ProductId::new("P1").unwrap(), &RegionId::new("R1").unwrap());
/// assert_eq!(key, "txrtcache:P1:R1");
/// ```
#[derive(Debug, Clone)]
pub struct RateCache {
    store: Arc<dyn CacheStore>,
    config: RateCacheConfig,
}

impl RateCache {
    /// Creates a cache over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, config: RateCacheConfig) -> Self {
        Self { store, config }
    }

    /// Creates a cache with the default namespace and TTL.
    #[must_use]
    pub fn with_defaults(store: Arc<dyn CacheStore>) -> Self {
        Self::new(store, RateCacheConfig::default())
    }

    /// Returns the cache key for a product in a region.
    ///
    /// Identifiers cannot contain the delimiter, so distinct pairs never
    /// share a key.
    #[must_use]
    pub fn key(&self, product_id: &ProductId, region_id: &RegionId) -> String {
        format!(
            "{}{ID_DELIMITER}{}{ID_DELIMITER}{}",
            self.config.namespace, product_id, region_id
        )
    }

    /// Returns the entry time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Looks up the cached rates for a product in a region.
    ///
    /// Returns `None` on a miss, on a store fault, or when the stored value
    /// is not a valid rate set. Invalid values are deleted.
    pub async fn get(&self, product_id: &ProductId, region_id: &RegionId) -> Option<RateSet> {
        let key = self.key(product_id, region_id);

        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%key, "rate cache miss");
                return None;
            }
            Err(e) => {
                warn!(%key, error = %e, "rate cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<RateSet>(&raw) {
            Ok(rates) => {
                debug!(%key, rates = rates.len(), "rate cache hit");
                Some(rates)
            }
            Err(e) => {
                warn!(%key, error = %e, "discarding corrupt rate cache entry");
                if let Err(del_err) = self.store.del(&key).await {
                    warn!(%key, error = %del_err, "failed to delete corrupt rate cache entry");
                }
                None
            }
        }
    }

    /// Stores rates for a product in a region. Failures are logged only.
    pub async fn set(&self, product_id: &ProductId, region_id: &RegionId, rates: &RateSet) {
        let key = self.key(product_id, region_id);

        let value = match serde_json::to_string(rates) {
            Ok(value) => value,
            Err(e) => {
                warn!(%key, error = %e, "failed to encode rate set for cache");
                return;
            }
        };

        if let Err(e) = self.store.set_ex(&key, &value, self.config.ttl).await {
            warn!(%key, error = %e, "rate cache write failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::tax_rate::TaxServiceRate;
    use crate::infrastructure::cache::{CacheError, CacheResult, InMemoryCacheStore};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct FailingStore {
        gets: AtomicUsize,
        sets: AtomicUsize,
        dels: AtomicUsize,
        corrupt_value: Option<String>,
    }

    impl FailingStore {
        fn returning(value: &str) -> Self {
            Self {
                corrupt_value: Some(value.to_string()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl CacheStore for FailingStore {
        async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            match &self.corrupt_value {
                Some(value) => Ok(Some(value.clone())),
                None => Err(CacheError::connection("connection refused")),
            }
        }

        async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::command("SET", "READONLY"))
        }

        async fn del(&self, _key: &str) -> CacheResult<()> {
            self.dels.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::command("DEL", "READONLY"))
        }
    }

    fn product(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn region(id: &str) -> RegionId {
        RegionId::new(id).unwrap()
    }

    fn rates() -> RateSet {
        RateSet::new(vec![
            TaxServiceRate::new(Decimal::from(5), "reduced", "RED"),
            TaxServiceRate::new(Decimal::from(8), "luxury", "LUX"),
        ])
        .unwrap()
    }

    #[test]
    fn key_uses_namespace_product_region() {
        let cache = RateCache::with_defaults(Arc::new(InMemoryCacheStore::new()));
        assert_eq!(cache.key(&product("P1"), &region("R1")), "txrtcache:P1:R1");
    }

    #[test]
    fn key_honours_custom_namespace() {
        let cache = RateCache::new(
            Arc::new(InMemoryCacheStore::new()),
            RateCacheConfig::default().with_namespace("staging-rates"),
        );
        assert_eq!(cache.key(&product("P1"), &region("R1")), "staging-rates:P1:R1");
    }

    #[test]
    fn config_from_cache_section() {
        let section = CacheConfig {
            url: "redis://cache:6379".to_string(),
            namespace: "rates".to_string(),
            ttl_secs: 45,
        };
        let config = RateCacheConfig::from(&section);
        assert_eq!(config.namespace, "rates");
        assert_eq!(config.ttl, Duration::from_secs(45));
    }

    #[tokio::test]
    async fn set_then_get_hits() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = RateCache::with_defaults(store.clone());

        cache.set(&product("P1"), &region("R1"), &rates()).await;

        assert!(store.contains_key("txrtcache:P1:R1"));
        assert_eq!(cache.get(&product("P1"), &region("R1")).await, Some(rates()));
    }

    #[tokio::test]
    async fn get_absent_is_miss() {
        let cache = RateCache::with_defaults(Arc::new(InMemoryCacheStore::new()));
        assert_eq!(cache.get(&product("P1"), &region("R1")).await, None);
    }

    #[tokio::test]
    async fn stored_value_is_json_array_of_rates() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = RateCache::with_defaults(store.clone());
        cache
            .set(&product("P1"), &region("R1"), &RateSet::default_for(Decimal::from(10)))
            .await;

        let raw = store.get("txrtcache:P1:R1").await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"rate": 10, "name": "default", "code": "default"}])
        );
    }

    #[tokio::test]
    async fn corrupt_entry_is_deleted_and_missed() {
        let store = Arc::new(InMemoryCacheStore::new());
        store
            .set_ex("txrtcache:P1:R1", "not json", Duration::from_secs(30))
            .await
            .unwrap();
        let cache = RateCache::with_defaults(store.clone());

        assert_eq!(cache.get(&product("P1"), &region("R1")).await, None);
        assert!(!store.contains_key("txrtcache:P1:R1"));
        assert_eq!(store.delete_count(), 1);
    }

    #[tokio::test]
    async fn wrong_shape_entry_is_treated_as_corrupt() {
        let store = Arc::new(InMemoryCacheStore::new());
        for raw in [
            "[]",
            r#"{"rate":1}"#,
            r#"[{"rate":"x","name":"a","code":"b"}]"#,
            r#"[{"name":"a","code":"b"}]"#,
        ] {
            store
                .set_ex("txrtcache:P1:R1", raw, Duration::from_secs(30))
                .await
                .unwrap();
            let cache = RateCache::with_defaults(store.clone());
            assert_eq!(cache.get(&product("P1"), &region("R1")).await, None, "{raw}");
            assert!(!store.contains_key("txrtcache:P1:R1"));
        }
    }

    #[tokio::test]
    async fn unreachable_store_reads_as_miss() {
        let store = Arc::new(FailingStore::default());
        let cache = RateCache::with_defaults(store.clone());

        assert_eq!(cache.get(&product("P1"), &region("R1")).await, None);
        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
        assert_eq!(store.dels.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_delete_of_corrupt_entry_is_swallowed() {
        let store = Arc::new(FailingStore::returning("{{{"));
        let cache = RateCache::with_defaults(store.clone());

        assert_eq!(cache.get(&product("P1"), &region("R1")).await, None);
        assert_eq!(store.dels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_write_is_swallowed() {
        let store = Arc::new(FailingStore::default());
        let cache = RateCache::with_defaults(store.clone());

        cache.set(&product("P1"), &region("R1"), &rates()).await;
        assert_eq!(store.sets.load(Ordering::SeqCst), 1);
    }

    fn id_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_-]{1,12}"
    }

    proptest! {
        #[test]
        fn key_is_deterministic(p in id_strategy(), r in id_strategy()) {
            let cache = RateCache::with_defaults(Arc::new(InMemoryCacheStore::new()));
            let first = cache.key(&product(&p), &region(&r));
            let second = cache.key(&product(&p), &region(&r));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn distinct_pairs_never_share_a_key(
            p1 in id_strategy(),
            r1 in id_strategy(),
            p2 in id_strategy(),
            r2 in id_strategy(),
        ) {
            prop_assume!((p1.as_str(), r1.as_str()) != (p2.as_str(), r2.as_str()));
            let cache = RateCache::with_defaults(Arc::new(InMemoryCacheStore::new()));
            prop_assert_ne!(
                cache.key(&product(&p1), &region(&r1)),
                cache.key(&product(&p2), &region(&r2))
            );
        }
    }
}
