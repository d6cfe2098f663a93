use strum::EnumCount;

use super::{MovementClass, MovementProfile, diagonal_cost};
use crate::config::GameConfig;
use crate::env::TerrainKind;

/// Fragment cost of entering a tile, or a refusal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveCost {
    Fragments(u32),
    Impassable,
}

impl MoveCost {
    pub const fn fragments(self) -> Option<u32> {
        match self {
            Self::Fragments(cost) => Some(cost),
            Self::Impassable => None,
        }
    }

    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Fragments(_))
    }

    /// Applies the diagonal multiplier, flooring to whole fragments.
    pub const fn diagonal(self) -> Self {
        match self {
            Self::Fragments(cost) => Self::Fragments(diagonal_cost(cost)),
            Self::Impassable => Self::Impassable,
        }
    }
}

/// Immutable terrain cost table shared by validation and pathfinding.
///
/// Base costs are stored in whole movement points per terrain and converted to
/// fragments on lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainCostModel {
    base_points: [u32; TerrainKind::COUNT],
    move_fragments: u32,
    igter_cost: u32,
}

impl TerrainCostModel {
    /// Builds the default table: flat and water 1 point, rough 2, very rough 3.
    pub fn new(config: &GameConfig) -> Self {
        let mut base_points = [1; TerrainKind::COUNT];
        for terrain in <TerrainKind as strum::IntoEnumIterator>::iter() {
            base_points[terrain.index()] = terrain.category().base_points();
        }
        Self {
            base_points,
            move_fragments: config.move_fragments.max(1),
            igter_cost: config.igter_cost,
        }
    }

    /// Overrides a terrain's base cost. Costs below one point are raised to one.
    pub fn set_base_points(&mut self, terrain: TerrainKind, points: u32) {
        self.base_points[terrain.index()] = points.max(1);
    }

    pub fn with_base_points(mut self, terrain: TerrainKind, points: u32) -> Self {
        self.set_base_points(terrain, points);
        self
    }

    pub fn base_points(&self, terrain: TerrainKind) -> u32 {
        self.base_points[terrain.index()]
    }

    pub fn move_fragments(&self) -> u32 {
        self.move_fragments
    }

    pub fn igter_cost(&self) -> u32 {
        self.igter_cost
    }

    /// Returns true if a unit of `class` may stand on `terrain`.
    pub fn is_native(&self, terrain: TerrainKind, class: MovementClass) -> bool {
        match class {
            MovementClass::Land => terrain.is_land(),
            MovementClass::Sea => terrain.is_water(),
            MovementClass::Amphibious | MovementClass::Air => true,
        }
    }

    /// Orthogonal cost of entering `terrain` for a unit of `class`.
    ///
    /// Air units pay the flat igter cost everywhere.
    pub fn cost(&self, terrain: TerrainKind, class: MovementClass) -> MoveCost {
        if !self.is_native(terrain, class) {
            return MoveCost::Impassable;
        }
        match class {
            MovementClass::Air => MoveCost::Fragments(self.igter_cost),
            _ => MoveCost::Fragments(self.base_points(terrain).saturating_mul(self.move_fragments)),
        }
    }

    /// Cost of one step into `terrain` for a concrete unit, diagonal included.
    pub fn step_cost(
        &self,
        terrain: TerrainKind,
        profile: &MovementProfile,
        diagonal: bool,
    ) -> MoveCost {
        let orthogonal = match self.cost(terrain, profile.class) {
            MoveCost::Fragments(_) if profile.ignores_terrain => {
                MoveCost::Fragments(self.igter_cost)
            }
            other => other,
        };
        if diagonal {
            orthogonal.diagonal()
        } else {
            orthogonal
        }
    }

    /// Cheapest possible orthogonal step for `profile`, used to scale the
    /// search heuristic so it never overestimates.
    pub fn min_step_cost(&self, profile: &MovementProfile) -> u32 {
        if profile.ignores_terrain || profile.class == MovementClass::Air {
            return self.igter_cost;
        }
        <TerrainKind as strum::IntoEnumIterator>::iter()
            .filter_map(|terrain| self.cost(terrain, profile.class).fragments())
            .min()
            .unwrap_or(self.move_fragments)
    }
}

impl Default for TerrainCostModel {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerId;

    fn profile(class: MovementClass, ignores_terrain: bool) -> MovementProfile {
        MovementProfile {
            class,
            ignores_terrain,
            move_rate_frags: 3,
            owner: PlayerId(1),
        }
    }

    #[test]
    fn default_table_scales_by_category() {
        let model = TerrainCostModel::default();
        assert_eq!(
            model.cost(TerrainKind::Grassland, MovementClass::Land),
            MoveCost::Fragments(3)
        );
        assert_eq!(
            model.cost(TerrainKind::Hills, MovementClass::Land),
            MoveCost::Fragments(6)
        );
        assert_eq!(
            model.cost(TerrainKind::Mountains, MovementClass::Land),
            MoveCost::Fragments(9)
        );
    }

    #[test]
    fn movement_class_gates_passability() {
        let model = TerrainCostModel::default();
        assert_eq!(
            model.cost(TerrainKind::Ocean, MovementClass::Land),
            MoveCost::Impassable
        );
        assert_eq!(
            model.cost(TerrainKind::Plains, MovementClass::Sea),
            MoveCost::Impassable
        );
        assert_eq!(
            model.cost(TerrainKind::Ocean, MovementClass::Sea),
            MoveCost::Fragments(3)
        );
        assert!(model.cost(TerrainKind::Lake, MovementClass::Amphibious).is_passable());
        assert!(model.cost(TerrainKind::Forest, MovementClass::Amphibious).is_passable());
        assert_eq!(
            model.cost(TerrainKind::Mountains, MovementClass::Air),
            MoveCost::Fragments(1)
        );
    }

    #[test]
    fn diagonal_step_is_floored_one_and_a_half() {
        let model = TerrainCostModel::default();
        let land = profile(MovementClass::Land, false);
        assert_eq!(
            model.step_cost(TerrainKind::Plains, &land, true),
            MoveCost::Fragments(4)
        );
        assert_eq!(
            model.step_cost(TerrainKind::Hills, &land, true),
            MoveCost::Fragments(9)
        );
        assert_eq!(
            model.step_cost(TerrainKind::Ocean, &land, true),
            MoveCost::Impassable
        );
    }

    #[test]
    fn igter_units_pay_flat_cost_on_native_terrain_only() {
        let model = TerrainCostModel::default();
        let igter = profile(MovementClass::Land, true);
        assert_eq!(
            model.step_cost(TerrainKind::Mountains, &igter, false),
            MoveCost::Fragments(1)
        );
        assert_eq!(
            model.step_cost(TerrainKind::Ocean, &igter, false),
            MoveCost::Impassable
        );
        assert_eq!(model.min_step_cost(&igter), 1);
        assert_eq!(model.min_step_cost(&profile(MovementClass::Land, false)), 3);
    }

    #[test]
    fn overrides_never_drop_below_one_point() {
        let model = TerrainCostModel::default()
            .with_base_points(TerrainKind::Swamp, 0)
            .with_base_points(TerrainKind::Glacier, 4);
        assert_eq!(model.base_points(TerrainKind::Swamp), 1);
        assert_eq!(
            model.cost(TerrainKind::Glacier, MovementClass::Land),
            MoveCost::Fragments(12)
        );
    }
}
