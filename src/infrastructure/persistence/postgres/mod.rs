//! # PostgreSQL Repositories
//!
//! sqlx-backed implementations of the persistence ports.

pub mod product_tax_rate_repository;

pub use product_tax_rate_repository::PgProductTaxRateRepository;
