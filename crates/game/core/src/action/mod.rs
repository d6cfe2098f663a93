//! Action catalog, validation and execution.
//!
//! - `kind`: [`ActionKind`] and [`ActionCategory`]
//! - `catalog`: immutable [`ActionCatalog`] of [`ActionDefinition`]s
//! - `requirement`: closed set of typed [`Requirement`] predicates
//! - `validator`: legality checks and success probabilities
//! - `executor`: state transitions, reported as [`ActionResult`] deltas
mod catalog;
mod error;
mod executor;
mod kind;
mod requirement;
mod result;
mod types;
mod validator;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{ActionCatalog, ActionDefinition, ActorMovement, TargetShape};
pub use error::ActionError;
pub use executor::{ActionExecutor, Execution, FoundCityRequest};
pub use kind::{ActionCategory, ActionKind};
pub use requirement::{Requirement, RequirementContext};
pub use result::{ActionProbability, ActionResult};
pub use types::{ActionRequest, ActionTarget};
pub use validator::ActionValidator;
