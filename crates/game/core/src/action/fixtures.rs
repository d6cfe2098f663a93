//! Shared test world for the action rules.

use super::{ActionExecutor, ActionValidator};
use crate::env::{
    CitySnapshot, Env, GameEnv, MapDimensions, MapSnapshot, PcgRng, PlayerSnapshot, TerrainKind,
    UnitFlags, UnitType, UnitTypeTable,
};
use crate::movement::MovementClass;
use crate::rules::Ruleset;
use crate::state::{PlayerId, Position, Unit, UnitId, UnitTypeId};

pub const WARRIORS: UnitTypeId = UnitTypeId(1);
pub const SETTLERS: UnitTypeId = UnitTypeId(2);
pub const WORKERS: UnitTypeId = UnitTypeId(3);
pub const HORSEMEN: UnitTypeId = UnitTypeId(4);

pub struct World {
    pub map: MapSnapshot,
    pub types: UnitTypeTable,
    pub cities: CitySnapshot,
    pub players: PlayerSnapshot,
    pub rng: PcgRng,
    pub rules: Ruleset,
}

impl World {
    /// Grassland map with the standard unit roster.
    pub fn flat(width: u32, height: u32) -> Self {
        Self {
            map: MapSnapshot::filled(MapDimensions::new(width, height), TerrainKind::Grassland),
            types: roster(),
            cities: CitySnapshot::new(),
            players: PlayerSnapshot::new(),
            rng: PcgRng,
            rules: Ruleset::default(),
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(
            &self.map,
            &self.types,
            &self.cities,
            &self.players,
            &self.rng,
        )
        .into_game_env()
    }

    pub fn validator(&self) -> ActionValidator<'_> {
        ActionValidator::new(&self.rules, self.env())
    }

    pub fn executor(&self) -> ActionExecutor<'_> {
        ActionExecutor::new(&self.rules, self.env())
    }
}

pub fn roster() -> UnitTypeTable {
    UnitTypeTable::new([
        UnitType::new(WARRIORS, "Warriors", MovementClass::Land).with_combat(1, 1, 10, 1),
        UnitType::new(SETTLERS, "Settlers", MovementClass::Land)
            .with_combat(0, 1, 20, 1)
            .with_flags(UnitFlags::FOUND_CITY | UnitFlags::NON_MILITARY),
        UnitType::new(WORKERS, "Workers", MovementClass::Land)
            .with_combat(0, 1, 10, 1)
            .with_flags(UnitFlags::BUILD_IMPROVEMENTS | UnitFlags::NON_MILITARY),
        UnitType::new(HORSEMEN, "Horsemen", MovementClass::Land)
            .with_move_rate(2)
            .with_combat(2, 1, 10, 1),
    ])
}

pub fn unit(id: u32, owner: u32, ty: UnitTypeId, (x, y): (i32, i32), moves: u32) -> Unit {
    Unit::new(UnitId(id), PlayerId(owner), ty, Position::new(x, y))
        .with_moves(moves)
        .with_health(10)
}
