//! Traits describing read-only world data.
//!
//! Oracles expose map terrain, the unit type catalog, city lookups, player
//! governments and seeded randomness. The [`Env`] aggregate bundles them so the
//! rules can reach everything they need without coupling to concrete stores.
mod cities;
mod error;
mod map;
mod players;
mod rng;
mod snapshot;
mod unit_types;

pub use cities::{CityInfo, CityOracle};
pub use error::OracleError;
pub use map::{MapDimensions, MapOracle, TerrainCategory, TerrainKind};
pub use players::PlayerOracle;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use snapshot::{CitySnapshot, MapSnapshot, PlayerSnapshot, UnitTypeTable};
pub use unit_types::{UnitFlags, UnitType, UnitTypeOracle};

/// Aggregates the read-only oracles consulted by validation and execution.
pub struct Env<'a, M, U, C, P, R>
where
    M: MapOracle + ?Sized,
    U: UnitTypeOracle + ?Sized,
    C: CityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    unit_types: Option<&'a U>,
    cities: Option<&'a C>,
    players: Option<&'a P>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn UnitTypeOracle + 'a,
    dyn CityOracle + 'a,
    dyn PlayerOracle + 'a,
    dyn RngOracle + 'a,
>;

// Manual impls: the oracles are borrowed, so copying never requires `M: Clone`.
impl<M, U, C, P, R> Clone for Env<'_, M, U, C, P, R>
where
    M: MapOracle + ?Sized,
    U: UnitTypeOracle + ?Sized,
    C: CityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, U, C, P, R> Copy for Env<'_, M, U, C, P, R>
where
    M: MapOracle + ?Sized,
    U: UnitTypeOracle + ?Sized,
    C: CityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, M, U, C, P, R> Env<'a, M, U, C, P, R>
where
    M: MapOracle + ?Sized,
    U: UnitTypeOracle + ?Sized,
    C: CityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        unit_types: Option<&'a U>,
        cities: Option<&'a C>,
        players: Option<&'a P>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            map,
            unit_types,
            cities,
            players,
            rng,
        }
    }

    pub fn with_all(
        map: &'a M,
        unit_types: &'a U,
        cities: &'a C,
        players: &'a P,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(map),
            Some(unit_types),
            Some(cities),
            Some(players),
            Some(rng),
        )
    }

    /// Returns the MapOracle, or an error if not available.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    pub fn unit_types(&self) -> Result<&'a U, OracleError> {
        self.unit_types.ok_or(OracleError::UnitTypesNotAvailable)
    }

    /// City lookups are optional; a missing oracle means "no cities anywhere".
    pub fn cities(&self) -> Option<&'a C> {
        self.cities
    }

    /// Player lookups are only needed by government requirements.
    pub fn players(&self) -> Option<&'a P> {
        self.players
    }

    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, U, C, P, R> Env<'a, M, U, C, P, R>
where
    M: MapOracle + 'a,
    U: UnitTypeOracle + 'a,
    C: CityOracle + 'a,
    P: PlayerOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let unit_types: Option<&'a dyn UnitTypeOracle> = self.unit_types.map(|types| types as _);
        let cities: Option<&'a dyn CityOracle> = self.cities.map(|cities| cities as _);
        let players: Option<&'a dyn PlayerOracle> = self.players.map(|players| players as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, unit_types, cities, players, rng)
    }
}
