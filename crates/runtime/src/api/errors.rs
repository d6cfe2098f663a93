//! Unified error types surfaced by the runtime API.
//!
//! Action and pathfinding operations never fail; they report refusals through
//! [`march_core::ActionResult`] and [`march_core::PathResult`]. The errors
//! here cover setup, configuration and storage.
use thiserror::Error;

use march_core::{ErrorSeverity, GameError, Position, UnitId};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("failed to load content: {0}")]
    Content(String),

    /// Another city was recorded on the tile first.
    #[error("A city already exists at {0}")]
    CityExists(Position),

    /// The rules answered an order step with something other than a move.
    #[error("order step produced an unexpected outcome: {0}")]
    UnexpectedOutcome(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) | Self::InvalidEnv { .. } | Self::CityExists(_) => {
                ErrorSeverity::Validation
            }
            Self::MissingOracles
            | Self::Repository(_)
            | Self::Content(_)
            | Self::UnexpectedOutcome(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingOracles => "RUNTIME_MISSING_ORACLES",
            Self::UnitNotFound(_) => "RUNTIME_UNIT_NOT_FOUND",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::InvalidEnv { .. } => "RUNTIME_INVALID_ENV",
            Self::Content(_) => "RUNTIME_CONTENT",
            Self::CityExists(_) => "RUNTIME_CITY_EXISTS",
            Self::UnexpectedOutcome(_) => "RUNTIME_UNEXPECTED_OUTCOME",
        }
    }
}

/// Failure reported by an external collaborator such as the city service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The collaborator refused the request; the message is shown to players.
    #[error("{0}")]
    Rejected(String),
}
