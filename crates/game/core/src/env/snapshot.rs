//! In-memory oracle implementations backed by plain data.
//!
//! Content loaders produce these snapshots and the runtime shares them behind
//! `Arc`s. They are also the fixtures used by the rules' own tests.

use std::collections::BTreeMap;

use super::{
    CityInfo, CityOracle, MapDimensions, MapOracle, OracleError, PlayerOracle, TerrainKind,
    UnitType, UnitTypeOracle,
};
use crate::state::{GovernmentId, PlayerId, Position, UnitTypeId};

/// Row-major terrain grid. `None` marks an unknown tile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSnapshot {
    pub dimensions: MapDimensions,
    pub tiles: Vec<Option<TerrainKind>>,
}

impl MapSnapshot {
    pub fn new(dimensions: MapDimensions, tiles: Vec<Option<TerrainKind>>) -> Self {
        Self { dimensions, tiles }
    }

    /// Creates a map where every tile has the same terrain.
    pub fn filled(dimensions: MapDimensions, terrain: TerrainKind) -> Self {
        Self::new(dimensions, vec![Some(terrain); dimensions.area()])
    }

    /// Overwrites a single tile. Out-of-bounds positions are ignored.
    pub fn set(&mut self, position: Position, terrain: Option<TerrainKind>) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = terrain;
        }
    }

    pub fn with_tile(mut self, position: Position, terrain: TerrainKind) -> Self {
        self.set(position, Some(terrain));
        self
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl MapOracle for MapSnapshot {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn terrain(&self, position: Position) -> Result<Option<TerrainKind>, OracleError> {
        let index = self
            .index(position)
            .ok_or(OracleError::PositionOutOfBounds(position))?;
        Ok(self.tiles.get(index).copied().flatten())
    }
}

/// Unit type catalog keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitTypeTable {
    types: BTreeMap<UnitTypeId, UnitType>,
}

impl UnitTypeTable {
    pub fn new(types: impl IntoIterator<Item = UnitType>) -> Self {
        Self {
            types: types.into_iter().map(|ty| (ty.id, ty)).collect(),
        }
    }

    pub fn insert(&mut self, unit_type: UnitType) {
        self.types.insert(unit_type.id, unit_type);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitType> {
        self.types.values()
    }
}

impl UnitTypeOracle for UnitTypeTable {
    fn unit_type(&self, id: UnitTypeId) -> Option<&UnitType> {
        self.types.get(&id)
    }

    fn unit_type_by_name(&self, name: &str) -> Option<&UnitType> {
        self.types
            .values()
            .find(|ty| ty.name.eq_ignore_ascii_case(name))
    }
}

/// Fixed set of cities keyed by tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySnapshot {
    cities: BTreeMap<Position, CityInfo>,
}

impl CitySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, position: Position, city: CityInfo) -> Self {
        self.cities.insert(position, city);
        self
    }
}

impl CityOracle for CitySnapshot {
    fn city_at(&self, position: Position) -> Option<CityInfo> {
        self.cities.get(&position).copied()
    }
}

/// Government of each player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSnapshot {
    governments: BTreeMap<PlayerId, GovernmentId>,
}

impl PlayerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_government(mut self, player: PlayerId, government: GovernmentId) -> Self {
        self.governments.insert(player, government);
        self
    }
}

impl PlayerOracle for PlayerSnapshot {
    fn government(&self, player: PlayerId) -> Option<GovernmentId> {
        self.governments.get(&player).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_snapshot_reports_out_of_bounds_and_unknown_tiles() {
        let mut map = MapSnapshot::filled(MapDimensions::new(4, 3), TerrainKind::Plains);
        map.set(Position::new(1, 1), None);

        assert_eq!(
            map.terrain(Position::new(3, 2)).unwrap(),
            Some(TerrainKind::Plains)
        );
        assert_eq!(map.terrain(Position::new(1, 1)).unwrap(), None);
        assert_eq!(
            map.terrain(Position::new(4, 0)),
            Err(OracleError::PositionOutOfBounds(Position::new(4, 0)))
        );
    }

    #[test]
    fn city_snapshot_detects_enemy_cities() {
        let cities = CitySnapshot::new().with_city(
            Position::new(2, 2),
            CityInfo {
                id: crate::state::CityId(1),
                owner: PlayerId(2),
            },
        );
        assert!(cities.is_enemy_city(Position::new(2, 2), PlayerId(1)));
        assert!(!cities.is_enemy_city(Position::new(2, 2), PlayerId(2)));
        assert!(!cities.can_found_city_at(Position::new(2, 2), PlayerId(2)));
        assert!(cities.can_found_city_at(Position::new(3, 2), PlayerId(1)));
    }
}
