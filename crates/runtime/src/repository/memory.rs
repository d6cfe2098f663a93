//! In-memory UnitRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use march_core::{PlayerId, Position, Unit, UnitId};

use super::{RepositoryError, Result, UnitRepository};

/// In-memory implementation of [`UnitRepository`].
#[derive(Default)]
pub struct InMemoryUnitRepo {
    units: RwLock<BTreeMap<UnitId, Unit>>,
}

impl InMemoryUnitRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `units`.
    pub fn with_units(units: impl IntoIterator<Item = Unit>) -> Self {
        Self {
            units: RwLock::new(units.into_iter().map(|unit| (unit.id, unit)).collect()),
        }
    }

    fn filtered(&self, keep: impl Fn(&Unit) -> bool) -> Result<Vec<Unit>> {
        let units = self
            .units
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(units.values().filter(|unit| keep(unit)).cloned().collect())
    }
}

impl UnitRepository for InMemoryUnitRepo {
    fn insert(&self, unit: Unit) -> Result<()> {
        let mut units = self
            .units
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if units.contains_key(&unit.id) {
            return Err(RepositoryError::DuplicateUnit(unit.id));
        }
        units.insert(unit.id, unit);
        Ok(())
    }

    fn get(&self, id: UnitId) -> Result<Option<Unit>> {
        let units = self
            .units
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(units.get(&id).cloned())
    }

    fn save(&self, unit: &Unit) -> Result<()> {
        let mut units = self
            .units
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        units.insert(unit.id, unit.clone());
        Ok(())
    }

    fn remove(&self, id: UnitId) -> Result<()> {
        let mut units = self
            .units
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        units.remove(&id);
        Ok(())
    }

    fn units_of(&self, player: PlayerId) -> Result<Vec<Unit>> {
        self.filtered(|unit| unit.owner == player)
    }

    fn units_at(&self, position: Position) -> Result<Vec<Unit>> {
        self.filtered(|unit| unit.position == position)
    }

    fn list(&self) -> Result<Vec<Unit>> {
        self.filtered(|_| true)
    }
}
