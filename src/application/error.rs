//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - Invalid domain values
//! ├── Infrastructure(InfrastructureError) - Cache, event bus, configuration
//! ├── Repository(RepositoryError)         - Override store failure
//! ├── UnexpectedState(String)             - Overrides inconsistent with region rates
//! ├── Strategy { .. }                     - Tax calculation strategy failure
//! └── Configuration(String)               - Missing or invalid wiring
//! ```
//!
//! Cache faults never reach this hierarchy from the rate cache: they are
//! recovered locally. Everything that concerns rate authority propagates.
//!
//! # Examples
//!
//! ```
//! use tax_provider::application::error::ApplicationError;
//! use tax_provider::infrastructure::persistence::RepositoryError;
//!
//! let err = ApplicationError::unexpected_state("rate t9 missing from region R1");
//! assert!(err.is_unexpected_state());
//!
//! let err: ApplicationError = RepositoryError::connection("refused").into();
//! assert!(err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::events::EventBusError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Cache store error.
    #[error("cache error: {0}")]
    Cache(String),

    /// Event bus error.
    #[error("event bus error: {0}")]
    EventBus(#[from] EventBusError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl InfrastructureError {
    /// Creates a cache error.
    #[must_use]
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Cache(_) => true,
            Self::EventBus(_) | Self::Configuration(_) => false,
        }
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from external systems.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// The override store failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Reference data is inconsistent and no safe rate can be produced.
    #[error("unexpected state: {0}")]
    UnexpectedState(String),

    /// The tax calculation strategy failed.
    #[error("tax strategy {strategy} failed: {message}")]
    Strategy {
        /// Strategy name.
        strategy: &'static str,
        /// Error message.
        message: String,
    },

    /// Service wiring is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Creates an unexpected state error.
    #[must_use]
    pub fn unexpected_state(message: impl Into<String>) -> Self {
        Self::UnexpectedState(message.into())
    }

    /// Creates a strategy error.
    #[must_use]
    pub fn strategy(strategy: &'static str, message: impl Into<String>) -> Self {
        Self::Strategy {
            strategy,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if reference data was found to be inconsistent.
    #[must_use]
    pub fn is_unexpected_state(&self) -> bool {
        matches!(self, Self::UnexpectedState(_))
    }

    /// Returns true if the override store could not be reached.
    #[must_use]
    pub fn is_repository(&self) -> bool {
        matches!(self, Self::Repository(_))
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Infrastructure(e) => e.is_retryable(),
            Self::Repository(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
