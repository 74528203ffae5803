//! # Repository Traits
//!
//! Port definitions for the persistence collaborators of the tax provider.
//!
//! # Available Ports
//!
//! - [`ProductTaxRateRepository`]: read access to product rate overrides
//! - [`TaxLineRepository`]: record factory for tax lines
//! - [`UnitOfWork`]: persistence scope (base handle or caller transaction)
//!
//! # Examples
//!
//! ```ignore
//! use tax_provider::infrastructure::persistence::{ProductTaxRateFilter, ProductTaxRateRepository};
//!
//! async fn overrides(repo: &dyn ProductTaxRateRepository, filter: &ProductTaxRateFilter) {
//!     let found = repo.list(filter).await.unwrap();
//!     println!("{} overrides", found.len());
//! }
//! ```

use crate::domain::entities::product_tax_rate::ProductTaxRate;
use crate::domain::entities::tax_line::{TaxLine, TaxLineFields};
use crate::domain::value_objects::ids::{ProductId, TaxRateId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// A stored row could not be mapped into a domain value.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Selector for [`ProductTaxRateRepository::list`].
///
/// Matches overrides of `product_id` whose rate ID is one of `rate_ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTaxRateFilter {
    /// Product to look up.
    pub product_id: ProductId,
    /// Candidate rate definition IDs.
    pub rate_ids: Vec<TaxRateId>,
}

impl ProductTaxRateFilter {
    /// Creates a filter.
    #[must_use]
    pub fn new(product_id: ProductId, rate_ids: Vec<TaxRateId>) -> Self {
        Self {
            product_id,
            rate_ids,
        }
    }

    /// Returns true if `rate` satisfies this filter.
    #[must_use]
    pub fn matches(&self, rate: &ProductTaxRate) -> bool {
        rate.product_id == self.product_id && self.rate_ids.contains(&rate.rate_id)
    }
}

/// Read access to product tax rate overrides.
#[async_trait]
pub trait ProductTaxRateRepository: Send + Sync + fmt::Debug {
    /// Lists overrides matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be queried.
    async fn list(&self, filter: &ProductTaxRateFilter) -> RepositoryResult<Vec<ProductTaxRate>>;
}

/// Factory for tax line records.
///
/// `create` only builds the record shape bound to the repository's scope;
/// committing it is the owner of the scope's business.
pub trait TaxLineRepository: Send + Sync + fmt::Debug {
    /// Builds a tax line from `fields`.
    fn create(&self, fields: TaxLineFields) -> TaxLine;
}

/// A persistence scope: either the base handle or a caller's transaction.
pub trait UnitOfWork: Send + Sync + fmt::Debug {
    /// Returns a label identifying the scope, for logging.
    fn scope_id(&self) -> &str;

    /// Returns the tax line repository bound to this scope.
    fn tax_lines(&self) -> Arc<dyn TaxLineRepository>;
}
