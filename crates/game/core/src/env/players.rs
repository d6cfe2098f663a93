use crate::state::{GovernmentId, PlayerId};

/// Player lookup used by government requirements.
pub trait PlayerOracle: Send + Sync {
    fn government(&self, player: PlayerId) -> Option<GovernmentId>;
}
