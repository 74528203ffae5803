//! # In-Memory Event Bus
//!
//! [`EventBus`] that keeps every emitted event, for tests.

use crate::domain::value_objects::timestamp::Timestamp;
use crate::infrastructure::events::traits::{EventBus, EventBusResult};
use async_trait::async_trait;
use parking_lot::Mutex;

/// An event captured by [`InMemoryEventBus`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// Event name.
    pub name: String,
    /// Event payload.
    pub payload: serde_json::Value,
    /// When the event was emitted.
    pub emitted_at: Timestamp,
}

/// In-memory implementation of [`EventBus`].
#[derive(Debug, Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<RecordedEvent>>,
}

impl InMemoryEventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn emit(&self, event_name: &str, payload: serde_json::Value) -> EventBusResult<()> {
        self.events.lock().push(RecordedEvent {
            name: event_name.to_string(),
            payload,
            emitted_at: Timestamp::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_events_in_order() {
        let bus = InMemoryEventBus::new();
        bus.emit("tax_lines.created", serde_json::json!({"count": 2}))
            .await
            .unwrap();
        bus.emit("tax_lines.deleted", serde_json::json!({})).await.unwrap();

        let events = bus.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "tax_lines.created");
        assert_eq!(events[0].payload["count"], 2);
        assert_eq!(events[1].name, "tax_lines.deleted");
    }
}
