//! Terrain cost model and movement arithmetic.
//!
//! Movement is tracked in fragments: one whole movement point equals
//! [`GameConfig::move_fragments`](crate::config::GameConfig::move_fragments)
//! fragments, which keeps diagonal (x1.5) costs integral.
mod class;
mod cost;
mod direction;
mod fragments;

pub use class::{MovementClass, MovementProfile};
pub use cost::{MoveCost, TerrainCostModel};
pub use direction::Direction;
pub use fragments::{diagonal_cost, move_points_text};
