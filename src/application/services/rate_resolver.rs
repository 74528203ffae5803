//! # Rate Resolver
//!
//! Determines the applicable [`RateSet`] for a product in a region.
//!
//! # Resolution Order
//!
//! 1. Cached rates for `(product, region)`, when the cache holds a valid entry
//! 2. Product overrides that point at the region's rate definitions
//! 3. The region default rate, as `[{default_rate, "default", "default"}]`
//!
//! Steps 2 and 3 write their result back to the cache. An override that
//! references a rate the region does not define aborts resolution with
//! [`ApplicationError::UnexpectedState`] and nothing is cached.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::rate_cache::RateCache;
use crate::domain::entities::region::{Region, TaxRateDefinition};
use crate::domain::value_objects::ids::ProductId;
use crate::domain::value_objects::tax_rate::RateSet;
use crate::infrastructure::persistence::{ProductTaxRateFilter, ProductTaxRateRepository};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Resolves rate sets through the cache and the override store.
#[derive(Debug, Clone)]
pub struct RateResolver {
    cache: RateCache,
    overrides: Arc<dyn ProductTaxRateRepository>,
}

impl RateResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(cache: RateCache, overrides: Arc<dyn ProductTaxRateRepository>) -> Self {
        Self { cache, overrides }
    }

    /// Returns the rate cache.
    #[must_use]
    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// Returns the rates that apply to `product_id` in `region`.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Infrastructure` if the override store fails
    /// - `ApplicationError::UnexpectedState` if an override references a
    ///   rate definition the region does not have
    #[instrument(skip_all, fields(product_id = %product_id, region_id = %region.id()))]
    pub async fn resolve(&self, product_id: &ProductId, region: &Region) -> ApplicationResult<RateSet> {
        if let Some(cached) = self.cache.get(product_id, region.id()).await {
            return Ok(cached);
        }

        let rates = match self.override_rates(product_id, region).await? {
            Some(rates) => rates,
            None => {
                debug!("no product overrides, using region default rate");
                RateSet::default_for(region.default_rate())
            }
        };

        self.cache.set(product_id, region.id(), &rates).await;
        Ok(rates)
    }

    async fn override_rates(
        &self,
        product_id: &ProductId,
        region: &Region,
    ) -> ApplicationResult<Option<RateSet>> {
        if !region.has_tax_rates() {
            return Ok(None);
        }

        let filter = ProductTaxRateFilter::new(product_id.clone(), region.tax_rate_ids());
        let overrides = self.overrides.list(&filter).await?;
        if overrides.is_empty() {
            return Ok(None);
        }

        let rates = overrides
            .iter()
            .map(|o| {
                region
                    .find_tax_rate(&o.rate_id)
                    .map(TaxRateDefinition::to_service_rate)
                    .ok_or_else(|| {
                        error!(rate_id = %o.rate_id, "override references a rate the region does not define");
                        ApplicationError::unexpected_state(format!(
                            "product {} references tax rate {} which region {} does not define",
                            product_id,
                            o.rate_id,
                            region.id()
                        ))
                    })
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        RateSet::new(rates).map(Some).map_err(|e| {
            ApplicationError::unexpected_state(format!(
                "region {} has an invalid rate definition: {e}",
                region.id()
            ))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::product_tax_rate::ProductTaxRate;
    use crate::domain::value_objects::ids::{RegionId, TaxRateId};
    use crate::domain::value_objects::tax_rate::TaxServiceRate;
    use crate::infrastructure::cache::{CacheStore, InMemoryCacheStore};
    use crate::infrastructure::persistence::RepositoryResult;
    use crate::infrastructure::persistence::in_memory::InMemoryProductTaxRateRepository;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::time::Duration;

    /// Store that returns overrides regardless of the filter.
    #[derive(Debug)]
    struct UnfilteredRepository(Vec<ProductTaxRate>);

    #[async_trait]
    impl ProductTaxRateRepository for UnfilteredRepository {
        async fn list(&self, _filter: &ProductTaxRateFilter) -> RepositoryResult<Vec<ProductTaxRate>> {
            Ok(self.0.clone())
        }
    }

    fn product(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn rate_id(id: &str) -> TaxRateId {
        TaxRateId::new(id).unwrap()
    }

    fn region_r1() -> Region {
        Region::new(RegionId::new("R1").unwrap(), "Region One", Decimal::from(10))
            .unwrap()
            .with_tax_rate(TaxRateDefinition::new(rate_id("t1"), Decimal::from(5), "reduced", "RED"))
            .with_tax_rate(TaxRateDefinition::new(rate_id("t2"), Decimal::from(8), "luxury", "LUX"))
    }

    fn plain_region() -> Region {
        Region::new(RegionId::new("R2").unwrap(), "Region Two", Decimal::from(20)).unwrap()
    }

    struct Fixture {
        store: Arc<InMemoryCacheStore>,
        overrides: Arc<InMemoryProductTaxRateRepository>,
        resolver: RateResolver,
    }

    fn fixture(rates: Vec<ProductTaxRate>) -> Fixture {
        let store = Arc::new(InMemoryCacheStore::new());
        let overrides = Arc::new(InMemoryProductTaxRateRepository::with_rates(rates));
        let resolver = RateResolver::new(RateCache::with_defaults(store.clone()), overrides.clone());
        Fixture {
            store,
            overrides,
            resolver,
        }
    }

    #[tokio::test]
    async fn overrides_map_to_region_definitions_in_order() {
        let f = fixture(vec![
            ProductTaxRate::new(product("P1"), rate_id("t2")),
            ProductTaxRate::new(product("P1"), rate_id("t1")),
        ]);

        let rates = f.resolver.resolve(&product("P1"), &region_r1()).await.unwrap();

        assert_eq!(
            rates.rates(),
            &[
                TaxServiceRate::new(Decimal::from(8), "luxury", "LUX"),
                TaxServiceRate::new(Decimal::from(5), "reduced", "RED"),
            ]
        );
        assert!(f.store.contains_key("txrtcache:P1:R1"));
    }

    #[tokio::test]
    async fn product_without_overrides_gets_default() {
        let f = fixture(vec![ProductTaxRate::new(product("P1"), rate_id("t1"))]);

        let rates = f.resolver.resolve(&product("P2"), &region_r1()).await.unwrap();

        assert!(rates.is_default());
        assert_eq!(rates.rates(), &[TaxServiceRate::default_rate(Decimal::from(10))]);
        assert!(f.store.contains_key("txrtcache:P2:R1"));
    }

    #[tokio::test]
    async fn region_without_definitions_skips_override_store() {
        let f = fixture(vec![ProductTaxRate::new(product("P1"), rate_id("t1"))]);

        let rates = f.resolver.resolve(&product("P1"), &plain_region()).await.unwrap();

        assert_eq!(rates, RateSet::default_for(Decimal::from(20)));
        assert_eq!(f.overrides.list_calls(), 0);
        assert!(f.store.contains_key("txrtcache:P1:R2"));
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let f = fixture(vec![ProductTaxRate::new(product("P1"), rate_id("t1"))]);

        let first = f.resolver.resolve(&product("P1"), &region_r1()).await.unwrap();
        let second = f.resolver.resolve(&product("P1"), &region_r1()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.overrides.list_calls(), 1);
        assert_eq!(f.store.write_count(), 1);
    }

    #[tokio::test]
    async fn cache_hit_wins_over_changed_overrides() {
        let f = fixture(vec![ProductTaxRate::new(product("P1"), rate_id("t1"))]);
        let first = f.resolver.resolve(&product("P1"), &region_r1()).await.unwrap();

        f.overrides.clear();
        let second = f.resolver.resolve(&product("P1"), &region_r1()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn corrupt_entry_is_replaced_with_fresh_resolution() {
        let f = fixture(vec![]);
        f.store
            .set_ex("txrtcache:P1:R1", "garbage", Duration::from_secs(30))
            .await
            .unwrap();

        let rates = f.resolver.resolve(&product("P1"), &region_r1()).await.unwrap();

        assert_eq!(rates, RateSet::default_for(Decimal::from(10)));
        assert_eq!(f.store.delete_count(), 1);
        let raw = f.store.get("txrtcache:P1:R1").await.unwrap().unwrap();
        assert_eq!(serde_json::from_str::<RateSet>(&raw).unwrap(), rates);
    }

    #[tokio::test]
    async fn unknown_override_rate_is_unexpected_state() {
        let store = Arc::new(InMemoryCacheStore::new());
        let resolver = RateResolver::new(
            RateCache::with_defaults(store.clone()),
            Arc::new(UnfilteredRepository(vec![
                ProductTaxRate::new(product("P1"), rate_id("t1")),
                ProductTaxRate::new(product("P1"), rate_id("t9")),
            ])),
        );

        let err = resolver.resolve(&product("P1"), &region_r1()).await.unwrap_err();

        assert!(err.is_unexpected_state());
        assert!(err.to_string().contains("t9"));
        assert_eq!(store.write_count(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn override_store_failure_propagates_without_caching() {
        let f = fixture(vec![]);
        f.overrides.set_unavailable(true);

        let err = f.resolver.resolve(&product("P1"), &region_r1()).await.unwrap_err();

        assert!(err.is_repository());
        assert_eq!(f.store.write_count(), 0);
    }

    #[tokio::test]
    async fn zero_rate_definition_is_kept() {
        let region = Region::new(RegionId::new("R3").unwrap(), "Zero", Decimal::ZERO)
            .unwrap()
            .with_tax_rate(TaxRateDefinition::new(rate_id("z"), Decimal::ZERO, "exempt", "EX"));
        let f = fixture(vec![ProductTaxRate::new(product("P1"), rate_id("z"))]);

        let rates = f.resolver.resolve(&product("P1"), &region).await.unwrap();

        assert_eq!(rates.rates(), &[TaxServiceRate::new(Decimal::ZERO, "exempt", "EX")]);
    }

    #[tokio::test]
    async fn blank_definition_code_is_passed_through() {
        let region = Region::new(RegionId::new("R1").unwrap(), "Region One", Decimal::from(10))
            .unwrap()
            .with_tax_rate(TaxRateDefinition::new(rate_id("t1"), Decimal::from(5), "Exempt", ""));
        let f = fixture(vec![ProductTaxRate::new(product("P1"), rate_id("t1"))]);

        let first = f.resolver.resolve(&product("P1"), &region).await.unwrap();
        let second = f.resolver.resolve(&product("P1"), &region).await.unwrap();

        assert_eq!(first.rates(), &[TaxServiceRate::new(Decimal::from(5), "Exempt", "")]);
        assert_eq!(first, second);
        assert_eq!(f.overrides.list_calls(), 1);
    }

    #[tokio::test]
    async fn high_precision_rate_is_identical_on_cache_hit() {
        let precise = Decimal::from_str("7.1234567890123456789").unwrap();
        let region = Region::new(RegionId::new("R1").unwrap(), "Region One", Decimal::from(10))
            .unwrap()
            .with_tax_rate(TaxRateDefinition::new(rate_id("t1"), precise, "precise", "PRC"));
        let f = fixture(vec![ProductTaxRate::new(product("P1"), rate_id("t1"))]);

        let fresh = f.resolver.resolve(&product("P1"), &region).await.unwrap();
        let cached = f.resolver.resolve(&product("P1"), &region).await.unwrap();

        assert_eq!(fresh, cached);
        assert_eq!(cached.rates()[0].rate, precise);
        assert_eq!(f.overrides.list_calls(), 1);
    }

    proptest::proptest! {
        #[test]
        fn region_without_definitions_always_resolves_to_its_default(
            cents in 0u32..100_000,
            product_id in "[A-Za-z0-9_]{1,16}",
        ) {
            let default_rate = Decimal::new(i64::from(cents), 2);
            let region = Region::new(RegionId::new("R").unwrap(), "R", default_rate).unwrap();
            let f = fixture(vec![]);

            let rates = tokio_test::block_on(f.resolver.resolve(&product(&product_id), &region)).unwrap();

            proptest::prop_assert_eq!(rates, RateSet::default_for(default_rate));
            proptest::prop_assert_eq!(f.overrides.list_calls(), 0);
        }
    }
}
