//! # Event Bus Trait
//!
//! Port for the event-notification bus shared by every scope of the tax
//! provider service.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for event publishing.
#[derive(Debug, Clone, Error)]
pub enum EventBusError {
    /// The bus rejected or could not deliver the event.
    #[error("event publish failed: {event_name} - {message}")]
    PublishFailed {
        /// Name of the event.
        event_name: String,
        /// Error message.
        message: String,
    },
}

impl EventBusError {
    /// Creates a publish failure.
    #[must_use]
    pub fn publish_failed(event_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PublishFailed {
            event_name: event_name.into(),
            message: message.into(),
        }
    }
}

/// Result type for event bus operations.
pub type EventBusResult<T> = Result<T, EventBusError>;

/// Event-notification bus.
#[async_trait]
pub trait EventBus: Send + Sync + fmt::Debug {
    /// Publishes `payload` under `event_name`.
    ///
    /// # Errors
    ///
    /// Returns `EventBusError` if the event cannot be delivered.
    async fn emit(&self, event_name: &str, payload: serde_json::Value) -> EventBusResult<()>;
}
