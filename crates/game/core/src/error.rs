//! Classification shared by the rule errors.
//!
//! [`ActionError`](crate::ActionError) and [`OracleError`](crate::OracleError)
//! carry player-facing messages in `Display`; this trait adds what callers
//! need to route them: how bad the failure is and a stable code.

/// How a failed rule check should be treated by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The unit's circumstances may change next turn (movement, blocked route).
    Recoverable,
    /// The request itself is wrong for this unit or tile.
    Validation,
    /// World data or wiring is broken.
    Internal,
}

impl ErrorSeverity {
    /// Whether the failure points at broken data rather than a refused move.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal)
    }
}

pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable, screaming-snake identifier of the variant.
    fn error_code(&self) -> &'static str;
}
