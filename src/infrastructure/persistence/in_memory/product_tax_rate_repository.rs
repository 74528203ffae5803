//! # In-Memory Product Tax Rate Repository
//!
//! In-memory implementation of [`ProductTaxRateRepository`] for testing
//! without database dependencies.
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::entities::ProductTaxRate;
//! use tax_provider::domain::value_objects::{ProductId, TaxRateId};
//! use tax_provider::infrastructure::persistence::in_memory::InMemoryProductTaxRateRepository;
//!
//! let repo = InMemoryProductTaxRateRepository::new();
//! repo.insert(ProductTaxRate::new(
//!     ProductId::new("P1").unwrap(),
//!     TaxRateId::new("t1").unwrap(),
//! ));
//! assert_eq!(repo.len(), 1);
//! ```

use crate::domain::entities::product_tax_rate::ProductTaxRate;
use crate::infrastructure::persistence::traits::{
    ProductTaxRateFilter, ProductTaxRateRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory implementation of [`ProductTaxRateRepository`].
///
/// Keeps overrides in insertion order and counts `list` calls so tests can
/// assert that cached lookups never reach the store. Can be switched into a
/// failing mode to simulate an unreachable store.
#[derive(Debug, Default)]
pub struct InMemoryProductTaxRateRepository {
    rates: RwLock<Vec<ProductTaxRate>>,
    list_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryProductTaxRateRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `rates`.
    #[must_use]
    pub fn with_rates(rates: impl IntoIterator<Item = ProductTaxRate>) -> Self {
        let repo = Self::new();
        repo.rates.write().extend(rates);
        repo
    }

    /// Adds an override.
    pub fn insert(&self, rate: ProductTaxRate) {
        self.rates.write().push(rate);
    }

    /// Removes every override.
    pub fn clear(&self) {
        self.rates.write().clear();
    }

    /// Returns the number of stored overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.read().len()
    }

    /// Returns true if no overrides are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many times `list` was called.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Makes subsequent `list` calls fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductTaxRateRepository for InMemoryProductTaxRateRepository {
    async fn list(&self, filter: &ProductTaxRateFilter) -> RepositoryResult<Vec<ProductTaxRate>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::connection("override store unavailable"));
        }
        Ok(self
            .rates
            .read()
            .iter()
            .filter(|rate| filter.matches(rate))
            .cloned()
            .collect())
    }
}
