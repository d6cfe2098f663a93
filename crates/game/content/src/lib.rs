//! Data-driven rules content and loaders.
//!
//! This crate reads the static parts of a game from RON/TOML files:
//! - Game configuration (TOML)
//! - Terrain movement costs (TOML)
//! - Unit type catalog (RON)
//! - Map layouts (RON)
//! - Extra action requirements and city names (RON)
//!
//! Content is consumed by the runtime oracles and the rules; it never appears
//! in unit state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionOverrides, ActionOverridesLoader, CityNamesLoader, ConfigLoader, ContentFactory,
    MapLoader, TerrainLoader, UnitTypeLoader,
};
