//! Repository contract for loading and saving units.

use march_core::{PlayerId, Position, Unit, UnitId};

use super::Result;

/// Authoritative unit store.
///
/// Implementations must be safe to share between tasks; the runtime
/// serializes writes to any single unit itself.
pub trait UnitRepository: Send + Sync {
    /// Insert a new unit, failing if the id is already used.
    fn insert(&self, unit: Unit) -> Result<()>;

    fn get(&self, id: UnitId) -> Result<Option<Unit>>;

    /// Overwrite a unit with its updated state.
    fn save(&self, unit: &Unit) -> Result<()>;

    /// Remove a unit. Removing an unknown id is not an error.
    fn remove(&self, id: UnitId) -> Result<()>;

    /// All units owned by `player`, ordered by id.
    fn units_of(&self, player: PlayerId) -> Result<Vec<Unit>>;

    /// All units standing on `position`, ordered by id.
    fn units_at(&self, position: Position) -> Result<Vec<Unit>>;

    /// Every stored unit, ordered by id.
    fn list(&self) -> Result<Vec<Unit>>;
}
