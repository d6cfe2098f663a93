//! Public API surface for runtime consumers.
//!
//! Re-exports the error types and the collaborator traits so clients can
//! plug in their own city service or movement relay.
pub mod collaborators;
pub mod errors;

pub use collaborators::{
    CityFounder, LocalCityFounder, MovementBroadcast, MovementNotice, SilentBroadcast,
};
pub use errors::{CollaboratorError, Result, RuntimeError};
