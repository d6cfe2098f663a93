//! Content loaders for reading rules data from files.

pub mod actions;
pub mod config;
pub mod factory;
pub mod map;
pub mod names;
pub mod terrain;
pub mod units;

pub use actions::{ActionOverrides, ActionOverridesLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use names::CityNamesLoader;
pub use terrain::TerrainLoader;
pub use units::UnitTypeLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
