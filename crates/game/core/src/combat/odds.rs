use crate::action::ActionProbability;
use crate::config::GameConfig;
use crate::env::UnitType;
use crate::state::Unit;

/// Adjusted strengths and hit values for one attacker/defender pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatStrength {
    pub attack_power: u32,
    pub defense_power: u32,
    pub attacker_hp: u32,
    pub defender_hp: u32,
    /// HP removed from the defender per attacker hit.
    pub attacker_hit: u32,
    /// HP removed from the attacker per defender hit.
    pub defender_hit: u32,
}

impl CombatStrength {
    pub fn new(
        attacker: &Unit,
        attacker_type: &UnitType,
        defender: &Unit,
        defender_type: &UnitType,
        config: &GameConfig,
    ) -> Self {
        Self::assuming_defender_level(
            attacker,
            attacker_type,
            defender,
            defender_type,
            defender.veteran_level,
            config,
        )
    }

    /// Same as [`new`](Self::new) but with the defender's veteran level replaced.
    pub fn assuming_defender_level(
        attacker: &Unit,
        attacker_type: &UnitType,
        defender: &Unit,
        defender_type: &UnitType,
        defender_level: u8,
        config: &GameConfig,
    ) -> Self {
        let attack_power = attacker_type
            .attack
            .saturating_mul(config.veteran_power(attacker.veteran_level));
        let mut defense_power = defender_type
            .defense
            .saturating_mul(config.veteran_power(defender_level));
        if defender.fortified {
            defense_power = defense_power.saturating_mul(config.fortify_bonus_pct) / 100;
        }

        Self {
            attack_power,
            defense_power,
            attacker_hp: attacker.health,
            defender_hp: defender.health,
            attacker_hit: config
                .hit_damage
                .saturating_mul(attacker_type.firepower)
                .max(1),
            defender_hit: config
                .hit_damage
                .saturating_mul(defender_type.firepower)
                .max(1),
        }
    }
}

/// Exact probability that the attacker wins, by dynamic programming over the
/// number of hits each side has landed.
pub fn win_probability(strength: &CombatStrength) -> f64 {
    if strength.attacker_hp == 0 {
        return 0.0;
    }
    if strength.defender_hp == 0 {
        return 1.0;
    }
    let total = strength.attack_power as f64 + strength.defense_power as f64;
    if total == 0.0 {
        return 0.0;
    }
    let p = strength.attack_power as f64 / total;
    let q = 1.0 - p;

    let (hits_to_win, hits_to_lose) = bounded_hits(
        strength.defender_hp.div_ceil(strength.attacker_hit) as usize,
        strength.attacker_hp.div_ceil(strength.defender_hit) as usize,
    );

    // row[j]: probability the fight is still running with the attacker at
    // the current hit count and the defender at j hits. Rows advance by
    // attacker hits, so memory is one row of `hits_to_lose`.
    let mut row = vec![0.0_f64; hits_to_lose];
    row[0] = 1.0;
    let mut win = 0.0;
    for i in 0..hits_to_win {
        let last = i + 1 == hits_to_win;
        let mut carry = 0.0;
        for cell in row.iter_mut() {
            let r = *cell + carry;
            carry = r * q;
            *cell = if last { 0.0 } else { r * p };
            if last {
                win += r * p;
            }
        }
    }
    win.clamp(0.0, 1.0)
}

/// Upper bound on DP states evaluated for one fight.
const MAX_COMBAT_STATES: usize = 1 << 22;

/// Scales both hit counts down by a common factor when the fight has more
/// states than [`MAX_COMBAT_STATES`]. The ratio between them is kept.
fn bounded_hits(to_win: usize, to_lose: usize) -> (usize, usize) {
    let states = to_win.saturating_mul(to_lose);
    if states <= MAX_COMBAT_STATES {
        return (to_win, to_lose);
    }
    let scale = (states as f64 / MAX_COMBAT_STATES as f64).sqrt().ceil() as usize;
    (to_win.div_ceil(scale), to_lose.div_ceil(scale))
}

/// Attack odds on the 0..=200 scale.
///
/// The defender's veteran level is hidden from the attacker, so `max` assumes
/// a green defender and `min` the highest veteran level.
pub fn attack_odds(
    attacker: &Unit,
    attacker_type: &UnitType,
    defender: &Unit,
    defender_type: &UnitType,
    config: &GameConfig,
) -> ActionProbability {
    let best = CombatStrength::assuming_defender_level(
        attacker,
        attacker_type,
        defender,
        defender_type,
        0,
        config,
    );
    let worst = CombatStrength::assuming_defender_level(
        attacker,
        attacker_type,
        defender,
        defender_type,
        GameConfig::MAX_VETERAN_LEVEL,
        config,
    );
    ActionProbability::new(
        to_scale(win_probability(&worst)),
        to_scale(win_probability(&best)),
    )
}

fn to_scale(probability: f64) -> u8 {
    (probability * f64::from(ActionProbability::CERTAIN_VALUE)).round() as u8
}
