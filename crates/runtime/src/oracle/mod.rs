//! Runtime wrappers around the read-only world oracles.
//!
//! Static content (map terrain, unit types, player governments) is shared
//! behind `Arc`s. Cities are the one mutable oracle: the [`CityRegistry`]
//! records cities founded during play so later moves and searches see them.
mod cities;

use std::sync::Arc;

use march_content::ContentFactory;
use march_core::{
    GameEnv, MapOracle, MapSnapshot, PcgRng, PlayerOracle, PlayerSnapshot, UnitTypeOracle,
    UnitTypeTable,
};

pub use cities::CityRegistry;

use crate::api::{Result, RuntimeError};

/// Manages all oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) map: Arc<dyn MapOracle>,
    pub(crate) unit_types: Arc<dyn UnitTypeOracle>,
    pub(crate) cities: Arc<CityRegistry>,
    pub(crate) players: Arc<dyn PlayerOracle>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(
        map: Arc<dyn MapOracle>,
        unit_types: Arc<dyn UnitTypeOracle>,
        cities: Arc<CityRegistry>,
        players: Arc<dyn PlayerOracle>,
    ) -> Self {
        Self {
            map,
            unit_types,
            cities,
            players,
            rng: PcgRng,
        }
    }

    /// Oracles over plain snapshots with no cities and no governments.
    pub fn from_snapshots(map: MapSnapshot, unit_types: UnitTypeTable) -> Self {
        Self::new(
            Arc::new(map),
            Arc::new(unit_types),
            Arc::new(CityRegistry::new()),
            Arc::new(PlayerSnapshot::new()),
        )
    }

    /// Loads `maps/{map}.ron` and the unit catalog from a content directory.
    pub fn from_content(factory: &ContentFactory, map: &str) -> Result<Self> {
        let map = factory
            .load_map(map)
            .map_err(|err| RuntimeError::Content(format!("{err:#}")))?;
        let unit_types = factory
            .load_unit_types()
            .map_err(|err| RuntimeError::Content(format!("{err:#}")))?;
        Ok(Self::from_snapshots(map, unit_types))
    }

    pub fn with_players(mut self, players: Arc<dyn PlayerOracle>) -> Self {
        self.players = players;
        self
    }

    pub fn with_cities(mut self, cities: Arc<CityRegistry>) -> Self {
        self.cities = cities;
        self
    }

    /// Borrows every oracle as the environment the rules consult.
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            self.map.as_ref(),
            self.unit_types.as_ref(),
            self.cities.as_ref(),
            self.players.as_ref(),
            &self.rng,
        )
    }

    pub fn map(&self) -> &dyn MapOracle {
        self.map.as_ref()
    }

    pub fn unit_types(&self) -> &dyn UnitTypeOracle {
        self.unit_types.as_ref()
    }

    pub fn cities(&self) -> &Arc<CityRegistry> {
        &self.cities
    }
}
