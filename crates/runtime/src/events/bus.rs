//! Topic-based event bus implementation.

use tokio::sync::broadcast;

use super::types::{AdvisorEvent, DecisionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Per-tick decisions and state changes
    Decision,
    /// Advisor queries and availability
    Advisor,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone)]
pub enum Event {
    Decision(Box<DecisionEvent>),
    Advisor(AdvisorEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Decision(_) => Topic::Decision,
            Event::Advisor(_) => Topic::Advisor,
        }
    }
}

/// Topic-based event bus
///
/// Cloning is cheap; clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    decision: broadcast::Sender<Event>,
    advisor: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    /// Creates a new event bus with specified capacity per topic
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            decision: broadcast::channel(capacity).0,
            advisor: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Decision => &self.decision,
            Topic::Advisor => &self.advisor,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {}", topic);
        }
    }

    pub fn publish_decision(&self, event: DecisionEvent) {
        self.publish(Event::Decision(Box::new(event)));
    }

    pub fn publish_advisor(&self, event: AdvisorEvent) {
        self.publish(Event::Advisor(event));
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
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
    use game_core::EntityId;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut advisor = bus.subscribe(Topic::Advisor);
        let mut decision = bus.subscribe(Topic::Decision);

        bus.publish_advisor(AdvisorEvent::Launched {
            agent: EntityId(1),
            at_ms: 5,
        });

        let event = advisor.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Advisor);
        assert!(decision.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish_advisor(AdvisorEvent::AvailabilityChanged { available: true });
    }
}
