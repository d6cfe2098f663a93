//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors raised while consulting read-only world data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("UnitTypeOracle not available")]
    UnitTypesNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("position {0} is out of map bounds")]
    PositionOutOfBounds(Position),

    /// The backing provider failed; carries its message.
    #[error("terrain provider failed: {0}")]
    Provider(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PositionOutOfBounds(_) => ErrorSeverity::Validation,
            Self::Provider(_) => ErrorSeverity::Recoverable,
            Self::MapNotAvailable | Self::UnitTypesNotAvailable | Self::RngNotAvailable => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            Self::UnitTypesNotAvailable => "ORACLE_UNIT_TYPES_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            Self::PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
            Self::Provider(_) => "ORACLE_PROVIDER_FAILED",
        }
    }
}
