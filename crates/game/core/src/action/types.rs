use super::ActionKind;
use crate::state::{Position, Unit};

/// What an action is aimed at.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionTarget {
    Tile(Position),
    /// A snapshot of the targeted unit, supplied by the caller.
    Unit(Box<Unit>),
}

impl ActionTarget {
    pub fn position(&self) -> Position {
        match self {
            Self::Tile(position) => *position,
            Self::Unit(unit) => unit.position,
        }
    }

    pub fn unit(&self) -> Option<&Unit> {
        match self {
            Self::Unit(unit) => Some(unit),
            Self::Tile(_) => None,
        }
    }
}

/// A request to perform `kind`, as issued by a player or the order queue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub target: Option<ActionTarget>,
    /// Name for a city founded by this action; generated when absent.
    pub city_name: Option<String>,
}

impl ActionRequest {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            target: None,
            city_name: None,
        }
    }

    pub fn goto(target: Position) -> Self {
        Self::new(ActionKind::Goto).with_tile(target)
    }

    pub fn with_tile(mut self, position: Position) -> Self {
        self.target = Some(ActionTarget::Tile(position));
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.target = Some(ActionTarget::Unit(Box::new(unit)));
        self
    }

    pub fn with_city_name(mut self, name: impl Into<String>) -> Self {
        self.city_name = Some(name.into());
        self
    }

    pub fn target_position(&self) -> Option<Position> {
        self.target.as_ref().map(ActionTarget::position)
    }

    pub fn target_unit(&self) -> Option<&Unit> {
        self.target.as_ref().and_then(ActionTarget::unit)
    }
}
