//! Command implementations for the `march` binary.
//!
//! Each command owns its CLI args and execution logic.

mod path;
mod simulate;

pub use path::PathCommand;
pub use simulate::SimulateCommand;
