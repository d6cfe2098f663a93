use super::{PlayerId, Position, UnitId, UnitTypeId};

/// A persisted, resumable instruction attached to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitOrder {
    /// Travel to the given tile, advancing one reachable step per turn.
    MoveTo(Position),
}

impl UnitOrder {
    pub fn destination(&self) -> Position {
        match self {
            Self::MoveTo(position) => *position,
        }
    }
}

/// Snapshot of a unit handed to the rules by the unit store.
///
/// The rules never mutate a unit in place; they return an
/// [`ActionResult`](crate::action::ActionResult) describing the new state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub unit_type: UnitTypeId,
    pub position: Position,
    /// Remaining movement in fragments.
    pub moves_left: u32,
    pub health: u32,
    pub veteran_level: u8,
    pub fortified: bool,
    pub sentried: bool,
    /// Pending orders, first entry is the active one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub orders: Vec<UnitOrder>,
}

impl Unit {
    /// Creates a unit with no movement, zero health and an empty order queue.
    ///
    /// Callers normally chain the `with_*` builders to fill in the rest.
    pub fn new(id: UnitId, owner: PlayerId, unit_type: UnitTypeId, position: Position) -> Self {
        Self {
            id,
            owner,
            unit_type,
            position,
            moves_left: 0,
            health: 0,
            veteran_level: 0,
            fortified: false,
            sentried: false,
            orders: Vec::new(),
        }
    }

    pub fn with_moves(mut self, fragments: u32) -> Self {
        self.moves_left = fragments;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    pub fn with_veteran_level(mut self, level: u8) -> Self {
        self.veteran_level = level;
        self
    }

    pub fn with_order(mut self, order: UnitOrder) -> Self {
        self.orders.push(order);
        self
    }

    pub fn fortified(mut self) -> Self {
        self.fortified = true;
        self
    }

    pub fn has_moves(&self) -> bool {
        self.moves_left > 0
    }

    pub fn current_order(&self) -> Option<&UnitOrder> {
        self.orders.first()
    }

    pub fn has_orders(&self) -> bool {
        !self.orders.is_empty()
    }
}
