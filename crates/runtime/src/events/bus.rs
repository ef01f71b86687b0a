//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CommittedEvent, DroppedEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Interactions committed by the server
    Interaction,
    /// Requests dropped by the server
    Rejection,
}

/// Event wrapper that carries the typed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Committed(CommittedEvent),
    Dropped(DroppedEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Committed(_) => Topic::Interaction,
            Event::Dropped(_) => Topic::Rejection,
        }
    }
}

struct Channels {
    interaction: broadcast::Sender<Event>,
    rejection: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Interaction => &self.interaction,
            Topic::Rejection => &self.rejection,
        }
    }
}

/// Topic-based event bus
///
/// The topic set is closed, so every channel exists from construction and
/// neither publishing nor subscribing can fail.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                interaction: broadcast::channel(capacity).0,
                rejection: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic.
            tracing::trace!(target: "runtime::events", %topic, "event dropped, no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
