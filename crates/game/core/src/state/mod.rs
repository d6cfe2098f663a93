//! Unit state as seen by the rules.
//!
//! Units are owned by an external unit store. The rules read them and describe
//! intended changes as [`ActionResult`](crate::action::ActionResult) deltas; the
//! owner applies and persists those deltas in one step.
mod common;
mod unit;

pub use common::{CityId, GameId, GovernmentId, PlayerId, Position, UnitId, UnitTypeId};
pub use unit::{Unit, UnitOrder};
