//! Repository layer for dynamic runtime data.
//!
//! Units are the state that changes during play. The runtime loads a unit,
//! lets the rules compute an [`march_core::ActionResult`], applies it and
//! saves the unit back in one step. Static content lives in the oracles.

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryUnitRepo;
pub use traits::UnitRepository;
