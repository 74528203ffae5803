//! # Domain Layer
//!
//! Regions, rate definitions, overrides, orders and tax lines, plus the
//! value objects shared by every layer. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
