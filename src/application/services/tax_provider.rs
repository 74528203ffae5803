//! # Tax Provider Service
//!
//! Entry point for rate resolution and tax line computation.
//!
//! A [`TaxProviderService`] is bound to one persistence scope. The base
//! instance uses the manager it was built with; [`TaxProviderService::with_transaction`]
//! derives an instance bound to a caller transaction that shares every other
//! dependency (cache, override store, strategy selector, event bus) with its
//! parent. Only `get_tax_lines` writes through the scope.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tax_provider::application::services::TaxProviderService;
//! use tax_provider::infrastructure::cache::InMemoryCacheStore;
//! use tax_provider::infrastructure::events::InMemoryEventBus;
//! use tax_provider::infrastructure::persistence::UnitOfWork;
//! use tax_provider::infrastructure::persistence::in_memory::{
//!     InMemoryProductTaxRateRepository, InMemoryUnitOfWork,
//! };
//!
//! let service = TaxProviderService::builder()
//!     .cache_store(Arc::new(InMemoryCacheStore::new()))
//!     .product_tax_rates(Arc::new(InMemoryProductTaxRateRepository::new()))
//!     .event_bus(Arc::new(InMemoryEventBus::new()))
//!     .manager(Arc::new(InMemoryUnitOfWork::new("base")))
//!     .build()
//!     .unwrap();
//!
//! let scoped = service.with_transaction(Some(Arc::new(InMemoryUnitOfWork::new("tx-1"))));
//! assert_eq!(scoped.active_manager().scope_id(), "tx-1");
//! assert_eq!(service.active_manager().scope_id(), "base");
//! ```

use crate::application::error::{ApplicationError, ApplicationResult, InfrastructureError};
use crate::application::services::rate_cache::{RateCache, RateCacheConfig};
use crate::application::services::rate_resolver::RateResolver;
use crate::application::services::tax_line_computer::TaxLineComputer;
use crate::application::services::tax_strategy::{
    SingleStrategySelector, TaxCalculationStrategy, TaxStrategySelector,
};
use crate::config::TaxProviderConfig;
use crate::domain::entities::order::TaxableOrder;
use crate::domain::entities::region::Region;
use crate::domain::entities::tax_line::TaxLine;
use crate::domain::value_objects::ids::{ProductId, RegionId};
use crate::domain::value_objects::tax_rate::RateSet;
use crate::infrastructure::cache::{CacheStore, RedisCacheStore};
use crate::infrastructure::events::EventBus;
use crate::infrastructure::persistence::postgres::PgProductTaxRateRepository;
use crate::infrastructure::persistence::{ProductTaxRateRepository, UnitOfWork};
use std::sync::Arc;
use tracing::{info, instrument};

/// Dependencies shared by a base service and every scope derived from it.
#[derive(Debug)]
struct SharedDependencies {
    manager: Arc<dyn UnitOfWork>,
    product_tax_rates: Arc<dyn ProductTaxRateRepository>,
    event_bus: Arc<dyn EventBus>,
    resolver: Arc<RateResolver>,
    computer: TaxLineComputer,
}

/// Tax rate resolution and tax line computation bound to a persistence scope.
#[derive(Debug)]
pub struct TaxProviderService {
    shared: Arc<SharedDependencies>,
    transaction_manager: Option<Arc<dyn UnitOfWork>>,
}

impl TaxProviderService {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> TaxProviderServiceBuilder {
        TaxProviderServiceBuilder::default()
    }

    /// Builds a service against Redis and Postgres using `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if Redis is unreachable and
    /// `ApplicationError::Repository` if the Postgres pool cannot connect.
    pub async fn connect(
        config: &TaxProviderConfig,
        manager: Arc<dyn UnitOfWork>,
        event_bus: Arc<dyn EventBus>,
    ) -> ApplicationResult<Arc<Self>> {
        config
            .validate()
            .map_err(|e| InfrastructureError::configuration(e.to_string()))?;

        let cache_store = RedisCacheStore::connect(&config.cache.url)
            .await
            .map_err(|e| InfrastructureError::cache(e.to_string()))?;
        let product_tax_rates = PgProductTaxRateRepository::connect(
            &config.database.url,
            config.database.max_connections,
        )
        .await?;

        info!(
            namespace = %config.cache.namespace,
            ttl_secs = config.cache.ttl_secs,
            "tax provider connected"
        );

        Self::builder()
            .cache_store(Arc::new(cache_store))
            .cache_config(RateCacheConfig::from(&config.cache))
            .product_tax_rates(Arc::new(product_tax_rates))
            .event_bus(event_bus)
            .manager(manager)
            .build()
    }

    /// Returns an instance bound to `transaction_manager`.
    ///
    /// `None` returns this instance unchanged. Otherwise the new instance
    /// shares every dependency with this one except the persistence scope.
    #[must_use]
    pub fn with_transaction(
        self: &Arc<Self>,
        transaction_manager: Option<Arc<dyn UnitOfWork>>,
    ) -> Arc<Self> {
        match transaction_manager {
            None => Arc::clone(self),
            Some(tx) => Arc::new(Self {
                shared: Arc::clone(&self.shared),
                transaction_manager: Some(tx),
            }),
        }
    }

    /// Returns the scope writes go through: the transaction if bound,
    /// otherwise the base manager.
    #[must_use]
    pub fn active_manager(&self) -> &Arc<dyn UnitOfWork> {
        self.transaction_manager
            .as_ref()
            .unwrap_or(&self.shared.manager)
    }

    /// Returns true if this instance is bound to a caller transaction.
    #[must_use]
    pub fn is_transaction_scoped(&self) -> bool {
        self.transaction_manager.is_some()
    }

    /// Returns true if both instances share the same dependencies.
    #[must_use]
    pub fn shares_dependencies_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Returns the strategy that calculates taxes for `region`.
    #[must_use]
    pub fn get_tax_provider(&self, region: &Region) -> Arc<dyn TaxCalculationStrategy> {
        self.shared.computer.selector().select(region)
    }

    /// Computes tax lines for `order` and creates them in the active scope.
    ///
    /// # Errors
    ///
    /// Returns the first rate resolution error, or the strategy error.
    #[instrument(skip_all, fields(order_id = %order.id(), scope = self.active_manager().scope_id()))]
    pub async fn get_tax_lines(&self, order: &TaxableOrder) -> ApplicationResult<Vec<TaxLine>> {
        let tax_lines = self.active_manager().tax_lines();
        self.shared
            .computer
            .compute_tax_lines(order, tax_lines.as_ref())
            .await
    }

    /// Returns the rates that apply to `product_id` in `region`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if the override store fails and
    /// `ApplicationError::UnexpectedState` if an override references a rate
    /// the region does not define.
    pub async fn get_region_rates_for_product(
        &self,
        product_id: &ProductId,
        region: &Region,
    ) -> ApplicationResult<RateSet> {
        self.shared.resolver.resolve(product_id, region).await
    }

    /// Returns the cache key for a product in a region.
    #[must_use]
    pub fn cache_key(&self, product_id: &ProductId, region_id: &RegionId) -> String {
        self.shared.resolver.cache().key(product_id, region_id)
    }

    /// Returns the rate cache.
    #[must_use]
    pub fn rate_cache(&self) -> &RateCache {
        self.shared.resolver.cache()
    }

    /// Returns the override store.
    #[must_use]
    pub fn product_tax_rates(&self) -> &Arc<dyn ProductTaxRateRepository> {
        &self.shared.product_tax_rates
    }

    /// Returns the event bus.
    #[must_use]
    pub fn event_bus(&self) -> &Arc<dyn EventBus> {
        &self.shared.event_bus
    }
}

/// Builder for [`TaxProviderService`].
///
/// The cache store, override store, event bus and base manager are
/// required. The strategy selector defaults to [`SingleStrategySelector`]
/// with the system strategy and the cache config to its defaults.
#[derive(Debug, Default)]
pub struct TaxProviderServiceBuilder {
    cache_store: Option<Arc<dyn CacheStore>>,
    cache_config: Option<RateCacheConfig>,
    product_tax_rates: Option<Arc<dyn ProductTaxRateRepository>>,
    event_bus: Option<Arc<dyn EventBus>>,
    manager: Option<Arc<dyn UnitOfWork>>,
    selector: Option<Arc<dyn TaxStrategySelector>>,
}

impl TaxProviderServiceBuilder {
    /// Sets the cache store.
    #[must_use]
    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Sets the cache namespace and TTL.
    #[must_use]
    pub fn cache_config(mut self, config: RateCacheConfig) -> Self {
        self.cache_config = Some(config);
        self
    }

    /// Sets the override store.
    #[must_use]
    pub fn product_tax_rates(mut self, repository: Arc<dyn ProductTaxRateRepository>) -> Self {
        self.product_tax_rates = Some(repository);
        self
    }

    /// Sets the event bus.
    #[must_use]
    pub fn event_bus(mut self, event_bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Sets the base persistence scope.
    #[must_use]
    pub fn manager(mut self, manager: Arc<dyn UnitOfWork>) -> Self {
        self.manager = Some(manager);
        self
    }

    /// Sets the strategy selector.
    #[must_use]
    pub fn selector(mut self, selector: Arc<dyn TaxStrategySelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Sets a single strategy for every region.
    #[must_use]
    pub fn strategy(self, strategy: Arc<dyn TaxCalculationStrategy>) -> Self {
        self.selector(Arc::new(SingleStrategySelector::new(strategy)))
    }

    /// Builds the base service.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` naming the first missing
    /// dependency.
    pub fn build(self) -> ApplicationResult<Arc<TaxProviderService>> {
        let cache_store = self
            .cache_store
            .ok_or_else(|| ApplicationError::configuration("cache store is required"))?;
        let product_tax_rates = self
            .product_tax_rates
            .ok_or_else(|| ApplicationError::configuration("product tax rate store is required"))?;
        let event_bus = self
            .event_bus
            .ok_or_else(|| ApplicationError::configuration("event bus is required"))?;
        let manager = self
            .manager
            .ok_or_else(|| ApplicationError::configuration("manager is required"))?;
        let selector = self
            .selector
            .unwrap_or_else(|| Arc::new(SingleStrategySelector::default()));

        let cache = RateCache::new(cache_store, self.cache_config.unwrap_or_default());
        let resolver = Arc::new(RateResolver::new(cache, Arc::clone(&product_tax_rates)));
        let computer = TaxLineComputer::new(Arc::clone(&resolver), selector);

        Ok(Arc::new(TaxProviderService {
            shared: Arc::new(SharedDependencies {
                manager,
                product_tax_rates,
                event_bus,
                resolver,
                computer,
            }),
            transaction_manager: None,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::line_item::{LineItem, ProductVariant};
    use crate::domain::entities::order::{OrderKind, TaxableOrderBuilder};
    use crate::domain::value_objects::ids::{LineItemId, OrderId, VariantId};
    use crate::infrastructure::cache::InMemoryCacheStore;
    use crate::infrastructure::events::InMemoryEventBus;
    use crate::infrastructure::persistence::in_memory::{
        InMemoryProductTaxRateRepository, InMemoryUnitOfWork,
    };
    use rust_decimal::Decimal;

    struct Fixture {
        base: Arc<InMemoryUnitOfWork>,
        event_bus: Arc<InMemoryEventBus>,
        service: Arc<TaxProviderService>,
    }

    fn fixture() -> Fixture {
        let base = Arc::new(InMemoryUnitOfWork::new("base"));
        let event_bus = Arc::new(InMemoryEventBus::new());
        let service = TaxProviderService::builder()
            .cache_store(Arc::new(InMemoryCacheStore::new()))
            .product_tax_rates(Arc::new(InMemoryProductTaxRateRepository::new()))
            .event_bus(event_bus.clone())
            .manager(base.clone())
            .build()
            .unwrap();
        Fixture {
            base,
            event_bus,
            service,
        }
    }

    fn region() -> Region {
        Region::new(RegionId::new("R1").unwrap(), "Region One", Decimal::from(10)).unwrap()
    }

    fn order() -> TaxableOrder {
        let item = LineItem::new(
            LineItemId::new("item_1").unwrap(),
            "Shirt",
            ProductVariant::new(VariantId::new("v1").unwrap(), ProductId::new("P1").unwrap()),
            Decimal::from(25),
            2,
        );
        TaxableOrderBuilder::new(OrderId::new("order_1").unwrap(), OrderKind::Order, region())
            .item(item)
            .build()
    }

    #[test]
    fn with_transaction_none_returns_same_instance() {
        let f = fixture();
        let same = f.service.with_transaction(None);
        assert!(Arc::ptr_eq(&same, &f.service));
    }

    #[test]
    fn with_transaction_shares_dependencies() {
        let f = fixture();
        let tx: Arc<dyn UnitOfWork> = Arc::new(InMemoryUnitOfWork::new("tx-1"));
        let scoped = f.service.with_transaction(Some(Arc::clone(&tx)));

        assert!(!Arc::ptr_eq(&scoped, &f.service));
        assert!(scoped.shares_dependencies_with(&f.service));
        assert!(scoped.is_transaction_scoped());
        assert!(!f.service.is_transaction_scoped());
        assert!(Arc::ptr_eq(scoped.active_manager(), &tx));
        assert!(Arc::ptr_eq(scoped.event_bus(), f.service.event_bus()));
        assert!(Arc::ptr_eq(
            scoped.product_tax_rates(),
            f.service.product_tax_rates()
        ));
    }

    #[tokio::test]
    async fn tax_lines_are_created_in_transaction_scope() {
        let f = fixture();
        let tx = Arc::new(InMemoryUnitOfWork::new("tx-1"));
        let scoped = f.service.with_transaction(Some(tx.clone()));

        let lines = scoped.get_tax_lines(&order()).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(tx.repository().created(), lines);
        assert_eq!(f.base.repository().created_count(), 0);
    }

    #[tokio::test]
    async fn base_instance_writes_through_base_manager() {
        let f = fixture();

        let lines = f.service.get_tax_lines(&order()).await.unwrap();

        assert_eq!(lines[0].rate(), Decimal::from(10));
        assert_eq!(lines[0].code(), "default");
        assert_eq!(f.base.repository().created_count(), 1);
    }

    #[tokio::test]
    async fn scopes_share_the_rate_cache() {
        let f = fixture();
        let scoped = f
            .service
            .with_transaction(Some(Arc::new(InMemoryUnitOfWork::new("tx-1"))));
        let product = ProductId::new("P1").unwrap();

        scoped
            .get_region_rates_for_product(&product, &region())
            .await
            .unwrap();

        let key = f.service.cache_key(&product, region().id());
        assert_eq!(key, "txrtcache:P1:R1");
        assert!(f.service.rate_cache().get(&product, region().id()).await.is_some());
    }

    #[tokio::test]
    async fn computation_emits_no_events() {
        let f = fixture();
        f.service.get_tax_lines(&order()).await.unwrap();
        assert!(f.event_bus.events().is_empty());
    }

    #[test]
    fn get_tax_provider_returns_system_strategy_by_default() {
        let f = fixture();
        assert_eq!(f.service.get_tax_provider(&region()).name(), "system");
    }

    #[test]
    fn builder_reports_missing_dependency() {
        let err = TaxProviderService::builder()
            .cache_store(Arc::new(InMemoryCacheStore::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert!(err.to_string().contains("product tax rate store"));
    }

    #[test]
    fn builder_applies_cache_config() {
        let service = TaxProviderService::builder()
            .cache_store(Arc::new(InMemoryCacheStore::new()))
            .cache_config(RateCacheConfig::default().with_namespace("rates"))
            .product_tax_rates(Arc::new(InMemoryProductTaxRateRepository::new()))
            .event_bus(Arc::new(InMemoryEventBus::new()))
            .manager(Arc::new(InMemoryUnitOfWork::new("base")))
            .build()
            .unwrap();

        let key = service.cache_key(&ProductId::new("P1").unwrap(), &RegionId::new("R1").unwrap());
        assert_eq!(key, "rates:P1:R1");
    }
}
