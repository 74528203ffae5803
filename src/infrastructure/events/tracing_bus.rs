//! # Tracing Event Bus
//!
//! [`EventBus`] that writes events to the `tracing` pipeline. Used when no
//! broker is wired in.

use crate::infrastructure::events::traits::{EventBus, EventBusResult};
use async_trait::async_trait;
use tracing::info;

/// Event bus that logs each event at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventBus;

impl TracingEventBus {
    /// Creates a new tracing event bus.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventBus for TracingEventBus {
    async fn emit(&self, event_name: &str, payload: serde_json::Value) -> EventBusResult<()> {
        info!(event = event_name, payload = %payload, "event emitted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emit_always_succeeds() {
        TracingEventBus::new()
            .emit("region.updated", serde_json::json!({"id": "R1"}))
            .await
            .unwrap();
    }
}
