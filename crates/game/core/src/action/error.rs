//! Action validation and execution errors.
//!
//! Display strings are shown to players as-is.

use super::ActionKind;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::UnitTypeId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("Unknown action type: {0}")]
    UnknownAction(String),

    #[error("Action {0} is not implemented")]
    NotImplemented(ActionKind),

    #[error("Action {0} requires a target")]
    MissingTarget(ActionKind),

    #[error("Invalid target coordinates")]
    InvalidTarget,

    #[error("Unit is already at the target location")]
    AlreadyAtTarget,

    #[error("Target is not adjacent to the unit")]
    NotAdjacent,

    #[error("Unit has no movement points left")]
    NoMovesLeft,

    #[error("Insufficient movement points for this move")]
    InsufficientMovement,

    #[error("No valid path to target")]
    NoPath,

    #[error("Unit cannot enter that terrain")]
    Impassable,

    #[error("Cannot move onto an enemy city")]
    EnemyCity,

    #[error("Unit is already fortified")]
    AlreadyFortified,

    #[error("Unit does not meet the requirements for {action}: {reason}")]
    RequirementNotMet { action: ActionKind, reason: String },

    #[error("Cannot found a city here")]
    InvalidCitySite,

    #[error("Roads can only be built on land")]
    InvalidRoadSite,

    #[error("Unit cannot attack")]
    CannotAttack,

    #[error("Target must be an adjacent enemy unit")]
    InvalidCombatTarget,

    #[error("Unknown unit type {0:?}")]
    UnknownUnitType(UnitTypeId),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// The city collaborator rejected the founding; carries its message.
    #[error("{0}")]
    CityFoundingFailed(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            Oracle(err) => err.severity(),
            UnknownUnitType(_) => ErrorSeverity::Internal,
            NoMovesLeft | InsufficientMovement | NoPath | CityFoundingFailed(_) => {
                ErrorSeverity::Recoverable
            }
            UnknownAction(_)
            | NotImplemented(_)
            | MissingTarget(_)
            | InvalidTarget
            | AlreadyAtTarget
            | NotAdjacent
            | Impassable
            | EnemyCity
            | AlreadyFortified
            | RequirementNotMet { .. }
            | InvalidCitySite
            | InvalidRoadSite
            | CannotAttack
            | InvalidCombatTarget => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            UnknownAction(_) => "ACTION_UNKNOWN",
            NotImplemented(_) => "ACTION_NOT_IMPLEMENTED",
            MissingTarget(_) => "ACTION_MISSING_TARGET",
            InvalidTarget => "ACTION_INVALID_TARGET",
            AlreadyAtTarget => "ACTION_ALREADY_AT_TARGET",
            NotAdjacent => "ACTION_NOT_ADJACENT",
            NoMovesLeft => "ACTION_NO_MOVES_LEFT",
            InsufficientMovement => "ACTION_INSUFFICIENT_MOVEMENT",
            NoPath => "ACTION_NO_PATH",
            Impassable => "ACTION_IMPASSABLE",
            EnemyCity => "ACTION_ENEMY_CITY",
            AlreadyFortified => "ACTION_ALREADY_FORTIFIED",
            RequirementNotMet { .. } => "ACTION_REQUIREMENT_NOT_MET",
            InvalidCitySite => "ACTION_INVALID_CITY_SITE",
            InvalidRoadSite => "ACTION_INVALID_ROAD_SITE",
            CannotAttack => "ACTION_CANNOT_ATTACK",
            InvalidCombatTarget => "ACTION_INVALID_COMBAT_TARGET",
            UnknownUnitType(_) => "ACTION_UNKNOWN_UNIT_TYPE",
            Oracle(err) => err.error_code(),
            CityFoundingFailed(_) => "ACTION_CITY_FOUNDING_FAILED",
        }
    }
}
