//! Combat odds and resolution.
//!
//! Each round the attacker lands a hit with probability `A / (A + D)` where
//! `A` and `D` are the veteran- and fortification-adjusted strengths. A hit
//! removes `hit_damage * firepower` HP from the other side. Combat ends when
//! either unit reaches zero HP.
mod odds;
mod resolve;

pub use odds::{CombatStrength, attack_odds, win_probability};
pub use resolve::{CombatOutcome, resolve_combat};
