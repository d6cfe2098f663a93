use super::CombatStrength;
use crate::env::{RngOracle, compute_seed};
use crate::state::UnitId;

/// Remaining HP of both sides after a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatOutcome {
    pub attacker_hp: u32,
    pub defender_hp: u32,
    pub rounds: u32,
}

impl CombatOutcome {
    pub fn attacker_won(&self) -> bool {
        self.defender_hp == 0 && self.attacker_hp > 0
    }
}

/// Plays out a fight round by round.
///
/// Every round draws from its own seed derived from `(game_seed, nonce,
/// attacker, round)`, so the same inputs always produce the same outcome.
pub fn resolve_combat<R>(
    strength: &CombatStrength,
    rng: &R,
    game_seed: u64,
    nonce: u64,
    attacker: UnitId,
) -> CombatOutcome
where
    R: RngOracle + ?Sized,
{
    let mut attacker_hp = strength.attacker_hp;
    let mut defender_hp = strength.defender_hp;
    let total = strength.attack_power.saturating_add(strength.defense_power);
    let mut rounds = 0u32;

    while attacker_hp > 0 && defender_hp > 0 {
        let seed = compute_seed(game_seed, nonce, attacker.0, rounds);
        if rng.chance(seed, strength.attack_power, total) {
            defender_hp = defender_hp.saturating_sub(strength.attacker_hit);
        } else {
            attacker_hp = attacker_hp.saturating_sub(strength.defender_hit);
        }
        rounds = rounds.wrapping_add(1);
    }

    CombatOutcome {
        attacker_hp,
        defender_hp,
        rounds,
    }
}
