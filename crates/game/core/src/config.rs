/// Ruleset constants and tunable parameters for movement and combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Fragments in one whole movement point.
    ///
    /// Diagonal steps cost 1.5x the destination's base cost, so the fragment
    /// count keeps that arithmetic integral.
    pub move_fragments: u32,

    /// Cost in fragments of a step taken by a unit that ignores terrain.
    pub igter_cost: u32,

    /// Upper bound for any unit's movement budget in fragments.
    pub max_move_fragments: u32,

    /// Defense multiplier (percent) applied to fortified defenders.
    pub fortify_bonus_pct: u32,

    /// Power multiplier (percent) per veteran level, indexed by level.
    pub veteran_power_pct: [u32; 4],

    /// HP removed per combat round hit, before firepower.
    pub hit_damage: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Highest veteran level a unit can reach.
    pub const MAX_VETERAN_LEVEL: u8 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_FRAGMENTS: u32 = 3;
    pub const DEFAULT_IGTER_COST: u32 = 1;
    pub const DEFAULT_MAX_MOVE_FRAGMENTS: u32 = 65535;
    pub const DEFAULT_FORTIFY_BONUS_PCT: u32 = 150;
    pub const DEFAULT_VETERAN_POWER_PCT: [u32; 4] = [100, 150, 175, 200];
    pub const DEFAULT_HIT_DAMAGE: u32 = 10;

    pub fn new() -> Self {
        Self {
            move_fragments: Self::DEFAULT_MOVE_FRAGMENTS,
            igter_cost: Self::DEFAULT_IGTER_COST,
            max_move_fragments: Self::DEFAULT_MAX_MOVE_FRAGMENTS,
            fortify_bonus_pct: Self::DEFAULT_FORTIFY_BONUS_PCT,
            veteran_power_pct: Self::DEFAULT_VETERAN_POWER_PCT,
            hit_damage: Self::DEFAULT_HIT_DAMAGE,
        }
    }

    /// Returns the veteran multiplier for `level`, clamped to the highest level.
    pub fn veteran_power(&self, level: u8) -> u32 {
        let index = level.min(Self::MAX_VETERAN_LEVEL) as usize;
        self.veteran_power_pct[index]
    }

    /// Converts whole movement points into fragments, clamped to the ruleset maximum.
    pub fn fragments_for(&self, move_points: u32) -> u32 {
        move_points
            .saturating_mul(self.move_fragments)
            .min(self.max_move_fragments)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
