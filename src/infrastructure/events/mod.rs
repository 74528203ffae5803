//! # Event Bus
//!
//! - [`EventBus`]: port for the event-notification bus
//! - [`InMemoryEventBus`]: records events, for tests
//! - [`TracingEventBus`]: logs events through `tracing`

pub mod in_memory;
pub mod tracing_bus;
pub mod traits;

pub use in_memory::{InMemoryEventBus, RecordedEvent};
pub use tracing_bus::TracingEventBus;
pub use traits::{EventBus, EventBusError, EventBusResult};
