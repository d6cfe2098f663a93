//! Topic-based event bus implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{Event, UnitMoved};
use crate::api::{MovementBroadcast, MovementNotice};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Unit position changes
    Movement,
    /// Cities founded
    Settlement,
    /// Units removed from play
    Lifecycle,
    /// Order queue progress
    Orders,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Movement,
        Topic::Settlement,
        Topic::Lifecycle,
        Topic::Orders,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

struct Channels {
    topics: [broadcast::Sender<Event>; 4],
    all: broadcast::Sender<Event>,
}

/// Topic-based event bus.
///
/// Publishing never blocks and never fails: events sent while nobody listens
/// are dropped.
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
        let channels = Channels {
            topics: Topic::ALL.map(|_| broadcast::channel(capacity).0),
            all: broadcast::channel(capacity).0,
        };
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its topic and to the all-events channel.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.topics[topic.index()]
            .send(event.clone())
            .is_err()
        {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
        let _ = self.channels.all.send(event);
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.topics[topic.index()].subscribe()
    }

    /// Subscribe to every event regardless of topic.
    pub fn subscribe_all(&self) -> broadcast::Receiver<Event> {
        self.channels.all.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovementBroadcast for EventBus {
    async fn unit_moved(&self, notice: MovementNotice) {
        self.publish(Event::UnitMoved(UnitMoved {
            game: notice.game,
            unit: notice.unit,
            position: notice.position,
            moves_left: notice.moves_left,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::OrderCompleted;
    use march_core::{Position, UnitId};

    #[tokio::test]
    async fn events_reach_topic_and_firehose_subscribers() {
        let bus = EventBus::with_capacity(8);
        let mut orders = bus.subscribe(Topic::Orders);
        let mut movement = bus.subscribe(Topic::Movement);
        let mut all = bus.subscribe_all();

        let event = Event::OrderCompleted(OrderCompleted {
            unit: UnitId(4),
            destination: Position::new(1, 2),
        });
        bus.publish(event.clone());

        assert_eq!(orders.recv().await.unwrap(), event);
        assert_eq!(all.recv().await.unwrap(), event);
        assert!(movement.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        EventBus::new().publish(Event::OrderCompleted(OrderCompleted {
            unit: UnitId(1),
            destination: Position::new(0, 0),
        }));
    }
}
