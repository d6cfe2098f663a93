//! Topic-based event bus for runtime events.
//!
//! Events are published to topics; consumers subscribe to the topics they
//! need, or to every event at once.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{
    CityFounded, Event, OrderCancelled, OrderCompleted, UnitDestroyed, UnitMoved,
};
