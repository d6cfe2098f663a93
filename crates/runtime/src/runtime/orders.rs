//! Turn-start continuation of queued orders.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use march_core::{
    ActionError, ActionRequest, Execution, GameError, PlayerId, Position, Unit, UnitId,
};

use super::Runtime;
use crate::api::{Result, RuntimeError};
use crate::events::{Event, OrderCancelled, OrderCompleted};

/// A unit whose order was dropped, and why.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIssue {
    pub unit: UnitId,
    /// Stable error code, e.g. `ACTION_ENEMY_CITY`.
    pub code: String,
    pub reason: String,
}

impl OrderIssue {
    fn new(unit: UnitId, error: &dyn GameError) -> Self {
        Self {
            unit,
            code: error.error_code().to_string(),
            reason: error.to_string(),
        }
    }
}

/// What one call to [`Runtime::process_unit_orders`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReport {
    /// Units that moved and still have travelling to do.
    pub advanced: Vec<UnitId>,
    /// Units that reached their destination.
    pub completed: Vec<UnitId>,
    /// Units whose step was refused; their queue is cleared.
    pub cancelled: Vec<OrderIssue>,
    /// Units that hit an internal error; their queue is cleared.
    pub errored: Vec<OrderIssue>,
}

impl OrderReport {
    /// Number of units whose order was looked at.
    pub fn processed(&self) -> usize {
        self.advanced.len() + self.completed.len() + self.cancelled.len() + self.errored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed() == 0
    }
}

enum Progress {
    Advanced,
    Completed,
    Cancelled(ActionError),
}

impl Runtime {
    /// Advances the first queued order of every unit `player` owns.
    ///
    /// Each unit with movement left and a non-empty queue takes exactly one
    /// step toward its order's destination. Reaching the destination removes
    /// the order; a refused step clears the whole queue. A failure on one
    /// unit never stops the others.
    pub async fn process_unit_orders(&self, player: PlayerId) -> Result<OrderReport> {
        let units = self.inner.units.units_of(player)?;
        let mut report = OrderReport::default();

        for unit in units.into_iter().filter(|unit| unit.has_moves() && unit.has_orders()) {
            let id = unit.id;
            let _guard = self.inner.locks.lock(id).await;

            match self.continue_order(id).await {
                Ok(Some(Progress::Advanced)) => report.advanced.push(id),
                Ok(Some(Progress::Completed)) => report.completed.push(id),
                Ok(Some(Progress::Cancelled(err))) => {
                    report.cancelled.push(OrderIssue::new(id, &err))
                }
                Ok(None) => {}
                Err(err) => {
                    error!(
                        unit = %id,
                        x = unit.position.x,
                        y = unit.position.y,
                        code = err.error_code(),
                        error = %err,
                        "order processing failed"
                    );
                    self.drop_orders_after_error(id);
                    report.errored.push(OrderIssue::new(id, &err));
                }
            }
        }

        info!(
            player = %player,
            advanced = report.advanced.len(),
            completed = report.completed.len(),
            cancelled = report.cancelled.len(),
            errored = report.errored.len(),
            "processed unit orders"
        );
        Ok(report)
    }

    /// Restores full movement to every unit `player` owns.
    ///
    /// Returns how many units were refreshed. Units of unknown type are
    /// skipped.
    pub async fn refresh_movement(&self, player: PlayerId) -> Result<usize> {
        let config = &self.inner.rules.config;
        let mut refreshed = 0;

        for unit in self.inner.units.units_of(player)? {
            let _guard = self.inner.locks.lock(unit.id).await;
            let Some(mut unit) = self.inner.units.get(unit.id)? else {
                continue;
            };
            let Some(unit_type) = self.inner.oracles.unit_types().unit_type(unit.unit_type) else {
                warn!(unit = %unit.id, unit_type = ?unit.unit_type, "unknown unit type, movement not refreshed");
                continue;
            };
            unit.moves_left = unit_type.move_rate_frags(config);
            self.inner.units.save(&unit)?;
            refreshed += 1;
        }

        debug!(player = %player, refreshed, "movement refreshed");
        Ok(refreshed)
    }

    /// Takes one step of `id`'s first order. Caller holds the unit's lock.
    async fn continue_order(&self, id: UnitId) -> Result<Option<Progress>> {
        // Re-read under the lock; the listing may be stale.
        let Some(mut unit) = self.inner.units.get(id)? else {
            return Ok(None);
        };
        let Some(destination) = unit.current_order().map(|order| order.destination()) else {
            return Ok(None);
        };
        if !unit.has_moves() {
            return Ok(None);
        }
        if unit.position == destination {
            return self.complete_order(unit, destination).map(Some);
        }

        let execution = self
            .executor()
            .execute(&unit, &ActionRequest::goto(destination));
        let result = match execution {
            Ok(Execution::Done(result)) if result.success => result,
            Ok(Execution::Done(result)) => {
                return Err(RuntimeError::UnexpectedOutcome(result.message));
            }
            Ok(Execution::FoundCity(_)) => {
                return Err(RuntimeError::UnexpectedOutcome("city founding".to_string()));
            }
            Err(err) => return self.cancel_orders(unit, err).map(Some),
        };

        result.apply_to(&mut unit);
        let progress = if unit.position == destination {
            self.complete_order(unit.clone(), destination)?
        } else {
            self.inner.units.save(&unit)?;
            debug!(unit = %id, x = unit.position.x, y = unit.position.y, "order advanced");
            Progress::Advanced
        };
        self.announce_move(&unit).await;
        Ok(Some(progress))
    }

    fn complete_order(&self, mut unit: Unit, destination: Position) -> Result<Progress> {
        unit.orders.remove(0);
        self.inner.units.save(&unit)?;
        debug!(unit = %unit.id, x = destination.x, y = destination.y, "order completed");
        self.inner.events.publish(Event::OrderCompleted(OrderCompleted {
            unit: unit.id,
            destination,
        }));
        Ok(Progress::Completed)
    }

    /// Clears the queue after a refused step.
    ///
    /// Refusals the unit can run into in play are warnings; broken world
    /// data is logged as an error.
    fn cancel_orders(&self, mut unit: Unit, err: ActionError) -> Result<Progress> {
        unit.orders.clear();
        self.inner.units.save(&unit)?;

        let severity = err.severity();
        if severity.is_internal() {
            error!(
                unit = %unit.id,
                x = unit.position.x,
                y = unit.position.y,
                code = err.error_code(),
                %severity,
                reason = %err,
                "order cancelled"
            );
        } else {
            warn!(
                unit = %unit.id,
                x = unit.position.x,
                y = unit.position.y,
                code = err.error_code(),
                %severity,
                reason = %err,
                "order cancelled"
            );
        }

        self.inner.events.publish(Event::OrderCancelled(OrderCancelled {
            unit: unit.id,
            position: unit.position,
            reason: err.to_string(),
        }));
        Ok(Progress::Cancelled(err))
    }

    fn drop_orders_after_error(&self, id: UnitId) {
        let cleared = self.inner.units.get(id).and_then(|unit| match unit {
            Some(mut unit) => {
                unit.orders.clear();
                self.inner.units.save(&unit)
            }
            None => Ok(()),
        });
        if let Err(err) = cleared {
            error!(unit = %id, error = %err, "failed to clear orders after error");
        }
    }
}
