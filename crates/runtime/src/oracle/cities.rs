use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use march_core::{CityId, CityInfo, CityOracle, Position};

use crate::api::{Result, RuntimeError};

#[derive(Default)]
struct Cities {
    by_tile: BTreeMap<Position, CityInfo>,
    names: BTreeSet<String>,
}

/// In-memory city lookup that also records cities founded during play.
///
/// Reads come from the rules (synchronously, through [`CityOracle`]) while the
/// runtime inserts newly founded cities, so the table sits behind a lock.
pub struct CityRegistry {
    cities: RwLock<Cities>,
    next_id: AtomicU32,
}

impl CityRegistry {
    pub fn new() -> Self {
        Self {
            cities: RwLock::new(Cities::default()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Seeds a pre-existing city, replacing any seeded on the same tile.
    pub fn with_city(self, position: Position, city: CityInfo, name: impl Into<String>) -> Self {
        let mut cities = self.write();
        self.insert(&mut cities, position, city, name.into());
        drop(cities);
        self
    }

    /// Hands out a fresh city id.
    pub fn allocate_id(&self) -> CityId {
        CityId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Stores a newly founded city.
    ///
    /// The tile is checked again under the write lock, so of two founders
    /// racing for one tile exactly one is recorded. Ids handed out later
    /// never collide with `city.id`.
    pub fn record(
        &self,
        position: Position,
        city: CityInfo,
        name: impl Into<String>,
    ) -> Result<()> {
        let mut cities = self.write();
        if cities.by_tile.contains_key(&position) {
            return Err(RuntimeError::CityExists(position));
        }
        self.insert(&mut cities, position, city, name.into());
        Ok(())
    }

    fn insert(&self, cities: &mut Cities, position: Position, city: CityInfo, name: String) {
        self.next_id.fetch_max(city.id.0.saturating_add(1), Ordering::Relaxed);
        cities.by_tile.insert(position, city);
        cities.names.insert(name);
    }

    pub fn is_name_taken(&self, name: &str) -> bool {
        self.read().names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.read().by_tile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Writers never leave the maps half-updated, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Cities> {
        self.cities.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cities> {
        self.cities.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CityOracle for CityRegistry {
    fn city_at(&self, position: Position) -> Option<CityInfo> {
        self.read().by_tile.get(&position).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use march_core::PlayerId;

    #[test]
    fn recorded_cities_are_visible_and_ids_advance() {
        let registry = CityRegistry::new().with_city(
            Position::new(3, 3),
            CityInfo {
                id: CityId(7),
                owner: PlayerId(2),
            },
            "Ur",
        );

        assert!(registry.is_enemy_city(Position::new(3, 3), PlayerId(1)));
        assert!(!registry.can_found_city_at(Position::new(3, 3), PlayerId(2)));
        assert!(registry.can_found_city_at(Position::new(4, 3), PlayerId(2)));
        assert!(registry.is_name_taken("Ur"));
        assert_eq!(registry.allocate_id(), CityId(8));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn second_city_on_a_tile_is_refused() {
        let registry = CityRegistry::new();
        let tile = Position::new(2, 2);
        let first = CityInfo {
            id: registry.allocate_id(),
            owner: PlayerId(1),
        };
        let second = CityInfo {
            id: registry.allocate_id(),
            owner: PlayerId(2),
        };

        registry.record(tile, first, "Ur").unwrap();
        let refused = registry.record(tile, second, "Uruk").unwrap_err();

        assert!(matches!(refused, RuntimeError::CityExists(pos) if pos == tile));
        assert_eq!(refused.to_string(), "A city already exists at (2, 2)");
        assert_eq!(registry.city_at(tile), Some(first));
        assert!(!registry.is_name_taken("Uruk"));
        assert_eq!(registry.len(), 1);
    }
}
