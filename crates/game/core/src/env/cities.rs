use crate::state::{CityId, PlayerId, Position};

/// Minimal view of a city used by movement and settlement checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityInfo {
    pub id: CityId,
    pub owner: PlayerId,
}

/// City lookup collaborator.
pub trait CityOracle: Send + Sync {
    fn city_at(&self, position: Position) -> Option<CityInfo>;

    /// Location hook for founding a city; by default the tile must be free.
    fn can_found_city_at(&self, position: Position, _founder: PlayerId) -> bool {
        self.city_at(position).is_none()
    }

    /// Returns true when `position` holds a city owned by someone other than `player`.
    fn is_enemy_city(&self, position: Position, player: PlayerId) -> bool {
        self.city_at(position)
            .is_some_and(|city| city.owner != player)
    }
}
