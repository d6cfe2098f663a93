//! Error types raised by repository implementations.

use thiserror::Error;

use march_core::UnitId;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unit repository lock was poisoned")]
    LockPoisoned,

    #[error("unit {0} already exists")]
    DuplicateUnit(UnitId),

    #[error("storage backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
