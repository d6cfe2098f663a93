//! Grid route search.
mod astar;
mod result;

pub use astar::PathFinder;
pub use result::{PathResult, PathTile};
