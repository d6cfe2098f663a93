use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::state::PlayerId;

/// Unit-type attribute deciding which terrains are passable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementClass {
    Land,
    Sea,
    Amphibious,
    Air,
}

/// Everything a path search needs to know about the moving unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementProfile {
    pub class: MovementClass,
    pub ignores_terrain: bool,
    /// Full movement per turn in fragments.
    pub move_rate_frags: u32,
    /// Owner, used to refuse entry into foreign cities.
    pub owner: PlayerId,
}
