//! Event payloads published by the runtime.

use serde::{Deserialize, Serialize};

use march_core::{CityId, GameId, PlayerId, Position, UnitId};

use super::bus::Topic;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMoved {
    pub game: GameId,
    pub unit: UnitId,
    pub position: Position,
    pub moves_left: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityFounded {
    pub city: CityId,
    pub owner: PlayerId,
    pub name: String,
    pub position: Position,
    /// Unit consumed by the founding.
    pub founder: UnitId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDestroyed {
    pub unit: UnitId,
    pub owner: PlayerId,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub unit: UnitId,
    pub destination: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub unit: UnitId,
    pub position: Position,
    pub reason: String,
}

/// Event wrapper carrying every runtime notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    UnitMoved(UnitMoved),
    CityFounded(CityFounded),
    UnitDestroyed(UnitDestroyed),
    OrderCompleted(OrderCompleted),
    OrderCancelled(OrderCancelled),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::UnitMoved(_) => Topic::Movement,
            Event::CityFounded(_) => Topic::Settlement,
            Event::UnitDestroyed(_) => Topic::Lifecycle,
            Event::OrderCompleted(_) | Event::OrderCancelled(_) => Topic::Orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_their_variant_name() {
        let event = Event::OrderCancelled(OrderCancelled {
            unit: UnitId(3),
            position: Position::new(4, 5),
            reason: "No valid path to target".into(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["OrderCancelled"]["reason"], "No valid path to target");
        assert_eq!(event.topic(), Topic::Orders);

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
