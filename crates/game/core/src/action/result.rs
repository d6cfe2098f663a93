use crate::state::{CityId, Position, Unit, UnitOrder};

/// Confidence in an action's outcome on a 0..=200 scale, 200 meaning certain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionProbability {
    pub min: u8,
    pub max: u8,
}

impl ActionProbability {
    pub const CERTAIN_VALUE: u8 = 200;
    pub const CERTAIN: Self = Self::new(200, 200);
    pub const IMPOSSIBLE: Self = Self::new(0, 0);

    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

/// Value-type state delta produced by executing an action.
///
/// The unit store applies the delta with [`apply_to`](Self::apply_to) and
/// persists the unit in one step. Failed results carry only a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    pub new_position: Option<Position>,
    /// Fragments consumed.
    pub movement_cost: Option<u32>,
    pub actor_destroyed: bool,
    pub city_id: Option<CityId>,
    pub fortified: Option<bool>,
    pub sentried: Option<bool>,
    /// Order to keep on the unit after a partial journey.
    pub pending_order: Option<UnitOrder>,
    pub new_health: Option<u32>,
    pub target_health: Option<u32>,
    pub target_destroyed: bool,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.new_position = Some(position);
        self
    }

    pub fn with_cost(mut self, fragments: u32) -> Self {
        self.movement_cost = Some(fragments);
        self
    }

    pub fn with_pending_order(mut self, order: UnitOrder) -> Self {
        self.pending_order = Some(order);
        self
    }

    /// Applies the delta to `unit`. Failed results leave it untouched.
    ///
    /// Orders are not touched here; see [`supersede_orders`](Self::supersede_orders).
    pub fn apply_to(&self, unit: &mut Unit) {
        if !self.success {
            return;
        }
        if let Some(position) = self.new_position {
            unit.position = position;
        }
        if let Some(cost) = self.movement_cost {
            unit.moves_left = unit.moves_left.saturating_sub(cost);
        }
        if let Some(fortified) = self.fortified {
            unit.fortified = fortified;
        }
        if let Some(sentried) = self.sentried {
            unit.sentried = sentried;
        }
        if let Some(health) = self.new_health {
            unit.health = health;
        }
    }

    /// Replaces the unit's order queue after a player-issued action.
    ///
    /// A successful action clears the queue, leaving only its own pending
    /// order if it produced one.
    pub fn supersede_orders(&self, unit: &mut Unit) {
        if !self.success {
            return;
        }
        unit.orders.clear();
        unit.orders.extend(self.pending_order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerId, UnitId, UnitTypeId};

    fn unit() -> Unit {
        Unit::new(UnitId(1), PlayerId(1), UnitTypeId(1), Position::new(10, 10))
            .with_moves(6)
            .with_health(10)
            .with_order(UnitOrder::MoveTo(Position::new(30, 30)))
    }

    #[test]
    fn success_moves_and_charges() {
        let mut unit = unit();
        ActionResult::success("moved")
            .with_position(Position::new(11, 11))
            .with_cost(4)
            .apply_to(&mut unit);

        assert_eq!(unit.position, Position::new(11, 11));
        assert_eq!(unit.moves_left, 2);
        assert_eq!(unit.orders.len(), 1);
    }

    #[test]
    fn cost_never_drives_movement_negative() {
        let mut unit = unit();
        ActionResult::success("fortified")
            .with_cost(100)
            .apply_to(&mut unit);
        assert_eq!(unit.moves_left, 0);
    }

    #[test]
    fn failure_is_a_no_op() {
        let mut unit = unit();
        let before = unit.clone();
        let failed = ActionResult::failure("Invalid target coordinates");
        failed.apply_to(&mut unit);
        failed.supersede_orders(&mut unit);
        assert_eq!(unit, before);
    }

    #[test]
    fn player_actions_replace_the_queue() {
        let mut unit = unit();
        ActionResult::success("waiting").supersede_orders(&mut unit);
        assert!(unit.orders.is_empty());

        let order = UnitOrder::MoveTo(Position::new(5, 5));
        ActionResult::success("moving")
            .with_pending_order(order)
            .supersede_orders(&mut unit);
        assert_eq!(unit.orders, vec![order]);
    }
}
