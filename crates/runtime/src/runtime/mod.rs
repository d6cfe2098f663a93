//! High-level runtime orchestrator.
//!
//! The runtime owns the ruleset, oracles, unit store and collaborators, and
//! exposes the operations a turn orchestrator drives: action queries and
//! execution, pathfinding and order continuation. Every mutation of a unit
//! runs under that unit's lock and is persisted in one step.
mod builder;
mod config;
mod locks;
mod naming;
mod orders;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use march_core::{
    ActionDefinition, ActionError, ActionExecutor, ActionKind, ActionProbability, ActionRequest,
    ActionResult, ActionValidator, CityInfo, Execution, FoundCityRequest, GameError, PathFinder,
    PathResult, Position, Ruleset, TargetShape, Unit, UnitId,
};

pub use builder::RuntimeBuilder;
pub use config::RuntimeConfig;
pub use orders::{OrderIssue, OrderReport};

use crate::api::{CityFounder, MovementBroadcast, MovementNotice, Result, RuntimeError};
use crate::events::{CityFounded, Event, EventBus, Topic, UnitDestroyed};
use crate::oracle::OracleManager;
use crate::repository::UnitRepository;
use locks::UnitLocks;

/// Main runtime that serves rule queries and applies actions to units.
///
/// Cloning is cheap; clones share all state.
#[derive(Clone)]
pub struct Runtime {
    inner: Arc<Inner>,
}

struct Inner {
    config: RuntimeConfig,
    rules: Ruleset,
    oracles: OracleManager,
    units: Arc<dyn UnitRepository>,
    founder: Arc<dyn CityFounder>,
    broadcast: Arc<dyn MovementBroadcast>,
    events: EventBus,
    locks: UnitLocks,
    nonce: AtomicU64,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    pub fn rules(&self) -> &Ruleset {
        &self.inner.rules
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.inner.oracles
    }

    pub fn units(&self) -> &Arc<dyn UnitRepository> {
        &self.inner.units
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Subscribe to runtime events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.inner.events.subscribe(topic)
    }

    /// Adds a unit to the store.
    pub fn spawn_unit(&self, unit: Unit) -> Result<()> {
        debug!(unit = %unit.id, player = %unit.owner, x = unit.position.x, y = unit.position.y, "spawning unit");
        self.inner.units.insert(unit)?;
        Ok(())
    }

    pub fn unit(&self, id: UnitId) -> Result<Option<Unit>> {
        Ok(self.inner.units.get(id)?)
    }

    /// Catalog entry for an action name, or `None` when the name is unknown.
    pub fn action_definition(&self, action: &str) -> Option<&ActionDefinition> {
        let kind = ActionKind::parse(action).ok()?;
        Some(self.inner.rules.catalog.get(kind))
    }

    /// Whether `unit` may perform `action` right now.
    ///
    /// Unknown units and action names are simply not performable.
    pub fn can_unit_perform_action(
        &self,
        unit: UnitId,
        action: &str,
        target: Option<Position>,
    ) -> bool {
        match self.prepare(unit, action, target) {
            Ok((actor, request)) => self.validator().can_perform(&actor, &request),
            Err(_) => false,
        }
    }

    /// Success range of `action` on the 0..=200 scale.
    pub fn action_probability(
        &self,
        unit: UnitId,
        action: &str,
        target: Option<Position>,
    ) -> ActionProbability {
        match self.prepare(unit, action, target) {
            Ok((actor, request)) => self.validator().probability(&actor, &request),
            Err(_) => ActionProbability::IMPOSSIBLE,
        }
    }

    /// Parses `action`, resolves the target and executes it.
    ///
    /// For unit-targeted actions such as attacks, `target` names the tile and
    /// the strongest foreign unit standing there becomes the target.
    pub async fn execute_action(
        &self,
        unit: UnitId,
        action: &str,
        target: Option<Position>,
    ) -> ActionResult {
        match self.prepare(unit, action, target) {
            Ok((_, request)) => self.execute_request(unit, request).await,
            Err(err) => ActionResult::failure(err),
        }
    }

    /// Executes a fully built request as a player-issued action.
    ///
    /// Never fails: refusals and internal errors both come back as a failed
    /// [`ActionResult`]. On success the result is applied, replaces the
    /// unit's order queue and is saved before this returns.
    pub async fn execute_request(&self, unit: UnitId, request: ActionRequest) -> ActionResult {
        let target = request.target_unit().map(|target| target.id);
        let guard = match target {
            Some(target) => self.inner.locks.lock_pair(unit, target).await,
            None => self.inner.locks.lock(unit).await,
        };

        let result = match self.execute_locked(unit, request).await {
            Ok(result) => result,
            Err(err) => {
                error!(unit = %unit, code = err.error_code(), error = %err, "action execution failed");
                ActionResult::failure(err.to_string())
            }
        };

        // Waiters queued on a destroyed unit's mutex wake to find it gone;
        // its entry is dropped only once nobody holds it.
        drop(guard);
        if result.success {
            if result.actor_destroyed {
                self.inner.locks.forget(unit);
            }
            if let Some(target) = target.filter(|_| result.target_destroyed) {
                self.inner.locks.forget(target);
            }
        }
        result
    }

    /// Route for `unit` to `target`, using the unit's movement class.
    ///
    /// Never fails; unknown units and unreachable targets give an invalid
    /// result.
    pub fn find_path(&self, unit: UnitId, target: Position) -> PathResult {
        let actor = match self.inner.units.get(unit) {
            Ok(Some(actor)) => actor,
            Ok(None) => return PathResult::invalid(),
            Err(err) => {
                warn!(unit = %unit, error = %err, "failed to load unit for pathfinding");
                return PathResult::invalid();
            }
        };
        let Some(unit_type) = self.inner.oracles.unit_types().unit_type(actor.unit_type) else {
            return PathResult::invalid();
        };

        let rules = &self.inner.rules;
        let profile = unit_type.movement_profile(actor.owner, &rules.config);
        let cities: &dyn march_core::CityOracle = self.inner.oracles.cities().as_ref();
        PathFinder::new(&rules.terrain, self.inner.oracles.map())
            .with_cities(Some(cities))
            .find_path(actor.position, target, &profile)
    }

    fn validator(&self) -> ActionValidator<'_> {
        ActionValidator::new(&self.inner.rules, self.inner.oracles.as_game_env())
    }

    fn executor(&self) -> ActionExecutor<'_> {
        let nonce = self.inner.nonce.fetch_add(1, Ordering::Relaxed);
        ActionExecutor::new(&self.inner.rules, self.inner.oracles.as_game_env())
            .with_seed(self.inner.config.game_seed, nonce)
    }

    /// Loads the actor and turns an action name plus tile into a request.
    ///
    /// Errors are the user-facing refusal messages.
    fn prepare(
        &self,
        unit: UnitId,
        action: &str,
        target: Option<Position>,
    ) -> std::result::Result<(Unit, ActionRequest), String> {
        let kind = ActionKind::parse(action).map_err(|err| err.to_string())?;
        let actor = self
            .inner
            .units
            .get(unit)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| RuntimeError::UnitNotFound(unit).to_string())?;

        let request = ActionRequest::new(kind);
        let Some(position) = target else {
            return Ok((actor, request));
        };
        if self.inner.rules.catalog.get(kind).target != TargetShape::Unit {
            return Ok((actor, request.with_tile(position)));
        }

        let defender = self
            .defender_at(&actor, position)
            .map_err(|err| err.to_string())?;
        let request = match defender {
            Some(defender) => request.with_unit(defender),
            None => request.with_tile(position),
        };
        Ok((actor, request))
    }

    /// Strongest unit on `position` not owned by the actor's player.
    fn defender_at(&self, actor: &Unit, position: Position) -> Result<Option<Unit>> {
        let types = self.inner.oracles.unit_types();
        let defender = self
            .inner
            .units
            .units_at(position)?
            .into_iter()
            .filter(|unit| unit.owner != actor.owner)
            .max_by_key(|unit| {
                let defense = types.unit_type(unit.unit_type).map_or(0, |ty| ty.defense);
                (defense, unit.health)
            });
        Ok(defender)
    }

    async fn execute_locked(&self, unit: UnitId, mut request: ActionRequest) -> Result<ActionResult> {
        let actor = self
            .inner
            .units
            .get(unit)?
            .ok_or(RuntimeError::UnitNotFound(unit))?;

        // Re-read the target under its lock; the caller's copy may be stale.
        if let Some(target) = request.target_unit().map(|target| target.id) {
            match self.inner.units.get(target)? {
                Some(fresh) => request = request.with_unit(fresh),
                None => {
                    return Ok(ActionResult::failure(
                        ActionError::InvalidCombatTarget.to_string(),
                    ));
                }
            }
        }

        let execution = self.executor().execute(&actor, &request);
        let result = match execution {
            Ok(Execution::Done(result)) => result,
            Ok(Execution::FoundCity(pending)) => self.found_city(&pending).await,
            Err(err) => {
                debug!(
                    unit = %unit,
                    action = %request.kind,
                    code = err.error_code(),
                    reason = %err,
                    "action refused"
                );
                return Ok(ActionResult::failure(err.to_string()));
            }
        };

        self.commit(actor, &request, &result).await?;
        Ok(result)
    }

    async fn found_city(&self, pending: &FoundCityRequest) -> ActionResult {
        let registry = self.inner.oracles.cities();
        let name = naming::city_name(
            pending.name.as_deref(),
            &self.inner.rules.city_names,
            registry,
        );

        let founded = self
            .inner
            .founder
            .found_city(self.inner.config.game_id, pending.owner, &name, pending.position)
            .await;

        let recorded = founded.map_err(|err| err.to_string()).and_then(|city| {
            let info = CityInfo {
                id: city,
                owner: pending.owner,
            };
            registry
                .record(pending.position, info, name.clone())
                .map(|()| city)
                .map_err(|err| err.to_string())
        });

        match recorded {
            Ok(city) => {
                info!(
                    unit = %pending.unit,
                    player = %pending.owner,
                    city = %city,
                    x = pending.position.x,
                    y = pending.position.y,
                    "city founded"
                );
                self.inner.events.publish(Event::CityFounded(CityFounded {
                    city,
                    owner: pending.owner,
                    name: name.clone(),
                    position: pending.position,
                    founder: pending.unit,
                }));
                pending.complete(city, &name)
            }
            Err(reason) => {
                warn!(unit = %pending.unit, reason = %reason, "city founding rejected");
                pending.failed(reason)
            }
        }
    }

    /// Applies a successful result to the actor and its target and saves both.
    async fn commit(&self, mut actor: Unit, request: &ActionRequest, result: &ActionResult) -> Result<()> {
        if !result.success {
            return Ok(());
        }

        if let Some(defender) = request.target_unit() {
            if result.target_destroyed {
                self.destroy(defender)?;
            } else if let Some(health) = result.target_health {
                let mut defender = defender.clone();
                defender.health = health;
                self.inner.units.save(&defender)?;
            }
        }

        if result.actor_destroyed {
            return self.destroy(&actor);
        }

        result.apply_to(&mut actor);
        result.supersede_orders(&mut actor);
        self.inner.units.save(&actor)?;

        if result.new_position.is_some() {
            self.announce_move(&actor).await;
        }
        Ok(())
    }

    fn destroy(&self, unit: &Unit) -> Result<()> {
        self.inner.units.remove(unit.id)?;
        debug!(unit = %unit.id, player = %unit.owner, "unit removed from play");
        self.inner.events.publish(Event::UnitDestroyed(UnitDestroyed {
            unit: unit.id,
            owner: unit.owner,
            position: unit.position,
        }));
        Ok(())
    }

    async fn announce_move(&self, unit: &Unit) {
        self.inner
            .broadcast
            .unit_moved(MovementNotice {
                game: self.inner.config.game_id,
                unit: unit.id,
                position: unit.position,
                moves_left: unit.moves_left,
            })
            .await;
    }
}
