//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Implementations
//!
//! - [`InMemoryProductTaxRateRepository`]: product rate overrides
//! - [`InMemoryUnitOfWork`]: persistence scope recording created tax lines
//! - [`InMemoryTaxLineRepository`]: the tax line factory behind it

pub mod product_tax_rate_repository;
pub mod unit_of_work;

pub use product_tax_rate_repository::InMemoryProductTaxRateRepository;
pub use unit_of_work::{InMemoryTaxLineRepository, InMemoryUnitOfWork};
