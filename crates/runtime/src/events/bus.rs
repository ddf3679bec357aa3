//! Topic-based event bus implementation.

use std::collections::HashMap;

use combat_core::StoreAction;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::CombatEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Store actions dispatched by the session
    Store,
    /// Turn resolution, scheduling and rejections
    Combat,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Store, Topic::Combat];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Store(StoreAction),
    Combat(CombatEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Store(_) => Topic::Store,
            Event::Combat(_) => Topic::Combat,
        }
    }
}

/// Topic-based event bus
///
/// Cloning shares the underlying channels. Publishing with no subscribers is
/// not an error.
#[derive(Clone)]
pub struct EventBus {
    store: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            store: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Store => &self.store,
            Topic::Combat => &self.combat,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_only_reach_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut store_rx = bus.subscribe(Topic::Store);
        let mut combat_rx = bus.subscribe(Topic::Combat);

        bus.publish(Event::Store(StoreAction::SetCombatActive(true)));

        let event = store_rx.recv().await.expect("store event");
        assert!(matches!(event, Event::Store(StoreAction::SetCombatActive(true))));
        assert!(combat_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Store(StoreAction::SetCombatActive(false)));
    }
}
