use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

use super::ActionError;

/// Every action a unit can be asked to perform.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    /// Single step onto an adjacent tile.
    Move,
    /// Travel to any tile, continuing across turns.
    Goto,
    Fortify,
    Sentry,
    Wait,
    FoundCity,
    BuildRoad,
    Attack,
    Disband,
    Pillage,
}

impl ActionKind {
    /// Parses an action name such as `"found_city"`.
    pub fn parse(name: &str) -> Result<Self, ActionError> {
        name.trim()
            .parse()
            .map_err(|_| ActionError::UnknownAction(name.to_string()))
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Broad grouping used by clients to lay out action menus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCategory {
    Movement,
    Activity,
    Settlement,
    Improvement,
    Combat,
    Lifecycle,
}
