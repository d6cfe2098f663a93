//! Asynchronous collaborators the runtime calls out to.
//!
//! City creation and movement relay live outside the rules. Runtime users plug
//! in implementations that talk to their own services; the defaults keep
//! everything in-process.
use std::sync::Arc;

use async_trait::async_trait;
use march_core::{CityId, CityOracle, GameId, PlayerId, Position, UnitId};

use super::errors::CollaboratorError;
use crate::oracle::CityRegistry;

/// Creates cities on behalf of founding units.
///
/// Called with the unit's lock held; the unit is consumed only when this
/// returns `Ok`.
#[async_trait]
pub trait CityFounder: Send + Sync {
    async fn found_city(
        &self,
        game: GameId,
        player: PlayerId,
        name: &str,
        position: Position,
    ) -> Result<CityId, CollaboratorError>;
}

/// Position update sent after a unit moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MovementNotice {
    pub game: GameId,
    pub unit: UnitId,
    pub position: Position,
    pub moves_left: u32,
}

/// Fire-and-forget relay of unit movement to other subsystems.
#[async_trait]
pub trait MovementBroadcast: Send + Sync {
    async fn unit_moved(&self, notice: MovementNotice);
}

/// In-process founder that allocates ids from the shared [`CityRegistry`].
pub struct LocalCityFounder {
    registry: Arc<CityRegistry>,
}

impl LocalCityFounder {
    pub fn new(registry: Arc<CityRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl CityFounder for LocalCityFounder {
    async fn found_city(
        &self,
        _game: GameId,
        _player: PlayerId,
        _name: &str,
        position: Position,
    ) -> Result<CityId, CollaboratorError> {
        if self.registry.city_at(position).is_some() {
            return Err(CollaboratorError::Rejected(format!(
                "A city already exists at {position}"
            )));
        }
        Ok(self.registry.allocate_id())
    }
}

/// Broadcast that drops every notice.
pub struct SilentBroadcast;

#[async_trait]
impl MovementBroadcast for SilentBroadcast {
    async fn unit_moved(&self, _notice: MovementNotice) {}
}
