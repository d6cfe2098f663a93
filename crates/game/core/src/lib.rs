//! Deterministic unit-action and movement rules.
//!
//! `march-core` defines the canonical rules (terrain costs, A* routing, the
//! action catalog, validation, execution and combat odds) as pure, synchronous
//! APIs. It performs no I/O: world data arrives through the oracle traits in
//! [`env`], and every action reports its effect as an [`ActionResult`] for the
//! caller to apply and persist.
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod movement;
pub mod path;
pub mod rules;
pub mod state;

pub use action::{
    ActionCatalog, ActionCategory, ActionDefinition, ActionError, ActionExecutor, ActionKind,
    ActionProbability, ActionRequest, ActionResult, ActionTarget, ActionValidator, ActorMovement,
    Execution, FoundCityRequest, Requirement, TargetShape,
};
pub use config::GameConfig;
pub use env::{
    CityInfo, CityOracle, CitySnapshot, Env, GameEnv, MapDimensions, MapOracle, MapSnapshot,
    OracleError, PcgRng, PlayerOracle, PlayerSnapshot, RngOracle, TerrainCategory, TerrainKind,
    UnitFlags, UnitType, UnitTypeOracle, UnitTypeTable,
};
pub use error::{ErrorSeverity, GameError};
pub use movement::{
    Direction, MoveCost, MovementClass, MovementProfile, TerrainCostModel, move_points_text,
};
pub use path::{PathFinder, PathResult, PathTile};
pub use rules::Ruleset;
pub use state::{
    CityId, GameId, GovernmentId, PlayerId, Position, Unit, UnitId, UnitOrder, UnitTypeId,
};
