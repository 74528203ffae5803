//! # Application Layer
//!
//! Orchestrates rate resolution and tax line computation over the domain
//! model and the infrastructure ports.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, InfrastructureError};
