#![allow(dead_code)]

use march_core::{
    MapDimensions, MapSnapshot, MovementClass, PlayerId, Position, TerrainKind, Unit, UnitFlags,
    UnitId, UnitType, UnitTypeId, UnitTypeTable,
};
use march_runtime::{OracleManager, Runtime, RuntimeBuilder, RuntimeConfig};

pub const WARRIORS: UnitTypeId = UnitTypeId(1);
pub const SETTLERS: UnitTypeId = UnitTypeId(2);
pub const HORSEMEN: UnitTypeId = UnitTypeId(3);
pub const TRIREME: UnitTypeId = UnitTypeId(4);

pub const HUMAN: PlayerId = PlayerId(1);
pub const RIVAL: PlayerId = PlayerId(2);

pub fn roster() -> UnitTypeTable {
    UnitTypeTable::new([
        UnitType::new(WARRIORS, "Warriors", MovementClass::Land).with_combat(1, 1, 10, 1),
        UnitType::new(SETTLERS, "Settlers", MovementClass::Land)
            .with_combat(0, 1, 20, 1)
            .with_flags(UnitFlags::FOUND_CITY | UnitFlags::NON_MILITARY),
        UnitType::new(HORSEMEN, "Horsemen", MovementClass::Land)
            .with_move_rate(2)
            .with_combat(2, 1, 10, 1),
        UnitType::new(TRIREME, "Trireme", MovementClass::Sea)
            .with_move_rate(3)
            .with_combat(1, 1, 10, 1),
    ])
}

/// Grassland map of the given size.
pub fn flat_map(width: u32, height: u32) -> MapSnapshot {
    MapSnapshot::filled(MapDimensions::new(width, height), TerrainKind::Grassland)
}

pub fn builder(map: MapSnapshot) -> RuntimeBuilder {
    Runtime::builder()
        .oracles(OracleManager::from_snapshots(map, roster()))
        .config(RuntimeConfig::default().with_seed(7))
}

pub fn runtime(map: MapSnapshot) -> Runtime {
    builder(map).build().expect("runtime should build")
}

/// Unit with full health and `moves` fragments left.
pub fn unit(id: u32, owner: PlayerId, ty: UnitTypeId, (x, y): (i32, i32), moves: u32) -> Unit {
    Unit::new(UnitId(id), owner, ty, Position::new(x, y))
        .with_moves(moves)
        .with_health(10)
}

pub fn load(runtime: &Runtime, id: u32) -> Unit {
    runtime
        .unit(UnitId(id))
        .expect("repository should be readable")
        .expect("unit should exist")
}
