//! # Domain Errors
//!
//! Error types for domain invariant violations.
//!
//! # Examples
//!
//! ```
//! use tax_provider::domain::errors::DomainError;
//!
//! let err = DomainError::invalid_identifier("ProductId", "contains ':'");
//! assert!(err.to_string().contains("ProductId"));
//! ```

use thiserror::Error;

/// Error type for domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An identifier failed validation.
    #[error("invalid {kind}: {reason}")]
    InvalidIdentifier {
        /// Identifier type name.
        kind: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A tax rate value is out of range.
    #[error("invalid tax rate: {0}")]
    InvalidRate(String),

    /// A rate set violated its shape invariants.
    #[error("invalid rate set: {0}")]
    InvalidRateSet(String),
}

impl DomainError {
    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            reason: reason.into(),
        }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(message: impl Into<String>) -> Self {
        Self::InvalidRate(message.into())
    }

    /// Creates an invalid rate set error.
    #[must_use]
    pub fn invalid_rate_set(message: impl Into<String>) -> Self {
        Self::InvalidRateSet(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
