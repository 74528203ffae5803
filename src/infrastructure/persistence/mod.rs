//! # Persistence Layer
//!
//! Ports and adapters for the persistence collaborators.
//!
//! ## Repository Traits (Ports)
//!
//! - [`ProductTaxRateRepository`]: product rate override lookups
//! - [`TaxLineRepository`]: tax line record factory
//! - [`UnitOfWork`]: persistence scope a service instance is bound to
//!
//! ## Implementations
//!
//! - `in_memory`: in-memory implementations for testing
//! - `postgres`: PostgreSQL override store

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    ProductTaxRateFilter, ProductTaxRateRepository, RepositoryError, RepositoryResult,
    TaxLineRepository, UnitOfWork,
};
