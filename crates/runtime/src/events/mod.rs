//! Topic-based event bus for interaction outcomes.
//!
//! The server publishes every committed interaction and every dropped
//! request; observers (UI, tests, audit logs) subscribe to the topics they
//! care about.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CommittedEvent, DroppedEvent};
