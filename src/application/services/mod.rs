//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`RateCache`]: best-effort cache of resolved rate sets
//! - [`RateResolver`]: cache, overrides, region default
//! - [`TaxCalculationStrategy`]: pluggable tax calculation
//! - [`TaxLineComputer`]: concurrent per-item resolution and strategy run
//! - [`TaxProviderService`]: transaction-scoped entry point

pub mod rate_cache;
pub mod rate_resolver;
pub mod tax_line_computer;
pub mod tax_provider;
pub mod tax_strategy;

pub use rate_cache::{DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL, RateCache, RateCacheConfig};
pub use rate_resolver::RateResolver;
pub use tax_line_computer::TaxLineComputer;
pub use tax_provider::{TaxProviderService, TaxProviderServiceBuilder};
pub use tax_strategy::{
    SingleStrategySelector, SystemTaxStrategy, TaxCalculationStrategy, TaxStrategySelector,
};
