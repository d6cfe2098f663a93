use crate::config::GameConfig;
use crate::movement::{MovementClass, MovementProfile};
use crate::state::{PlayerId, UnitTypeId};

bitflags::bitflags! {
    /// Capability flags carried by a unit type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct UnitFlags: u32 {
        /// Can found a city on its tile.
        const FOUND_CITY = 1 << 0;
        /// Can build terrain improvements such as roads.
        const BUILD_IMPROVEMENTS = 1 << 1;
        /// Every native step costs the igter cost instead of terrain cost.
        const IGNORE_TERRAIN = 1 << 2;
        /// Cannot initiate combat.
        const NON_MILITARY = 1 << 3;
    }
}

/// Static definition of a unit type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitType {
    pub id: UnitTypeId,
    pub name: String,
    pub class: MovementClass,
    /// Movement per turn in whole points.
    pub move_rate: u32,
    pub attack: u32,
    pub defense: u32,
    pub hit_points: u32,
    pub firepower: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: UnitFlags,
}

impl UnitType {
    pub fn new(id: UnitTypeId, name: impl Into<String>, class: MovementClass) -> Self {
        Self {
            id,
            name: name.into(),
            class,
            move_rate: 1,
            attack: 0,
            defense: 1,
            hit_points: 10,
            firepower: 1,
            flags: UnitFlags::empty(),
        }
    }

    pub fn with_move_rate(mut self, points: u32) -> Self {
        self.move_rate = points;
        self
    }

    pub fn with_combat(mut self, attack: u32, defense: u32, hit_points: u32, firepower: u32) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.hit_points = hit_points;
        self.firepower = firepower;
        self
    }

    pub fn with_flags(mut self, flags: UnitFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn has_flag(&self, flag: UnitFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Full movement budget per turn in fragments.
    pub fn move_rate_frags(&self, config: &GameConfig) -> u32 {
        config.fragments_for(self.move_rate)
    }

    pub fn can_attack(&self) -> bool {
        self.attack > 0 && !self.has_flag(UnitFlags::NON_MILITARY)
    }

    /// Builds the movement profile used by path searches for a unit of this type.
    pub fn movement_profile(&self, owner: PlayerId, config: &GameConfig) -> MovementProfile {
        MovementProfile {
            class: self.class,
            ignores_terrain: self.has_flag(UnitFlags::IGNORE_TERRAIN),
            move_rate_frags: self.move_rate_frags(config),
            owner,
        }
    }
}

/// Unit type catalog lookup.
pub trait UnitTypeOracle: Send + Sync {
    fn unit_type(&self, id: UnitTypeId) -> Option<&UnitType>;

    fn unit_type_by_name(&self, name: &str) -> Option<&UnitType>;
}
