//! Async orchestration for unit actions, pathfinding and order queues.
//!
//! This crate wires the pure rules of `march-core` to mutable unit storage,
//! world oracles and external collaborators. Consumers embed [`Runtime`] to
//! query and execute actions, plan routes and continue queued orders at the
//! start of each turn.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, its builder and order processing
//! - [`api`] exposes errors and the collaborator traits clients implement
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] and [`repository`] provide data adapters
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

pub use api::{
    CityFounder, CollaboratorError, LocalCityFounder, MovementBroadcast, MovementNotice, Result,
    RuntimeError, SilentBroadcast,
};
pub use events::{
    CityFounded, Event, EventBus, OrderCancelled, OrderCompleted, Topic, UnitDestroyed, UnitMoved,
};
pub use oracle::{CityRegistry, OracleManager};
pub use repository::{InMemoryUnitRepo, RepositoryError, UnitRepository};
pub use runtime::{OrderIssue, OrderReport, Runtime, RuntimeBuilder, RuntimeConfig};
