use super::{ActionError, ActionKind, ActionRequest, ActionResult, ActionValidator};
use crate::combat::{CombatStrength, resolve_combat};
use crate::env::{GameEnv, UnitType};
use crate::movement::{Direction, MoveCost};
use crate::path::PathFinder;
use crate::rules::Ruleset;
use crate::state::{CityId, PlayerId, Position, Unit, UnitId, UnitOrder};

/// Outcome of [`ActionExecutor::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Execution {
    /// The action completed synchronously.
    Done(ActionResult),
    /// The action is validated and waits on the city collaborator.
    FoundCity(FoundCityRequest),
}

/// Validated city founding, to be completed once the collaborator answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundCityRequest {
    pub unit: UnitId,
    pub owner: PlayerId,
    pub position: Position,
    /// Name supplied with the request, if any.
    pub name: Option<String>,
}

impl FoundCityRequest {
    /// Result once the collaborator produced `city`. The settler is consumed.
    pub fn complete(&self, city: CityId, name: &str) -> ActionResult {
        ActionResult {
            actor_destroyed: true,
            city_id: Some(city),
            ..ActionResult::success(format!("Founded {name} at {}", self.position))
        }
    }

    /// Result when the collaborator refused; the unit is left untouched.
    pub fn failed(&self, message: impl Into<String>) -> ActionResult {
        ActionResult::failure(ActionError::CityFoundingFailed(message.into()).to_string())
    }
}

/// Performs validated actions and reports their effect as an [`ActionResult`].
pub struct ActionExecutor<'a> {
    validator: ActionValidator<'a>,
    game_seed: u64,
    nonce: u64,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(rules: &'a Ruleset, env: GameEnv<'a>) -> Self {
        Self {
            validator: ActionValidator::new(rules, env),
            game_seed: 0,
            nonce: 0,
        }
    }

    /// Seeds combat rolls. `nonce` must differ between actions of one game.
    pub fn with_seed(mut self, game_seed: u64, nonce: u64) -> Self {
        self.game_seed = game_seed;
        self.nonce = nonce;
        self
    }

    pub fn validator(&self) -> &ActionValidator<'a> {
        &self.validator
    }

    /// Re-validates and performs `request` for `unit`.
    ///
    /// Never mutates `unit`. Errors describe why the action was refused.
    pub fn execute(&self, unit: &Unit, request: &ActionRequest) -> Result<Execution, ActionError> {
        let unit_type = self.validator.validate(unit, request)?;

        let result = match request.kind {
            ActionKind::Move | ActionKind::Goto => {
                let target = request
                    .target_position()
                    .ok_or(ActionError::MissingTarget(request.kind))?;
                self.goto(unit, unit_type, request.kind, target)?
            }
            ActionKind::Fortify => ActionResult {
                fortified: Some(true),
                sentried: unit.sentried.then_some(false),
                ..ActionResult::success("Unit fortified").with_cost(unit.moves_left)
            },
            ActionKind::Sentry => ActionResult {
                sentried: Some(true),
                ..ActionResult::success("Unit sentried").with_cost(unit.moves_left)
            },
            ActionKind::Wait => ActionResult::success("Unit is waiting"),
            ActionKind::BuildRoad => {
                ActionResult::success("Road construction started").with_cost(unit.moves_left)
            }
            ActionKind::Disband => ActionResult {
                actor_destroyed: true,
                ..ActionResult::success("Unit disbanded")
            },
            ActionKind::FoundCity => {
                return Ok(Execution::FoundCity(FoundCityRequest {
                    unit: unit.id,
                    owner: unit.owner,
                    position: unit.position,
                    name: request.city_name.clone(),
                }));
            }
            ActionKind::Attack => self.attack(unit, unit_type, request)?,
            ActionKind::Pillage => return Err(ActionError::NotImplemented(request.kind)),
        };

        Ok(Execution::Done(result))
    }

    /// Moves one step toward `target`.
    ///
    /// Adjacent targets are priced directly; farther ones take the first step
    /// of an A* route and leave a pending order for the rest.
    fn goto(
        &self,
        unit: &Unit,
        unit_type: &UnitType,
        kind: ActionKind,
        target: Position,
    ) -> Result<ActionResult, ActionError> {
        let env = self.validator.env();
        let rules = self.validator.rules();
        let map = env.map()?;

        if !map.contains(target) {
            return Err(ActionError::InvalidTarget);
        }
        if target == unit.position {
            return Err(ActionError::AlreadyAtTarget);
        }

        let profile = unit_type.movement_profile(unit.owner, &rules.config);

        if let Some(direction) = Direction::between(unit.position, target) {
            if env
                .cities()
                .is_some_and(|cities| cities.is_enemy_city(target, unit.owner))
            {
                return Err(ActionError::EnemyCity);
            }
            let terrain = map.terrain(target)?.ok_or(ActionError::Impassable)?;
            let cost = match rules
                .terrain
                .step_cost(terrain, &profile, direction.is_diagonal())
            {
                MoveCost::Fragments(cost) => cost,
                MoveCost::Impassable => return Err(ActionError::Impassable),
            };
            if unit.moves_left < cost {
                return Err(ActionError::InsufficientMovement);
            }
            return Ok(moved(unit, target, cost));
        }

        if kind == ActionKind::Move {
            return Err(ActionError::NotAdjacent);
        }

        let path = PathFinder::new(&rules.terrain, map)
            .with_cities(env.cities())
            .find_path(unit.position, target, &profile);
        let step = path.first_step().ok_or(ActionError::NoPath)?;
        if unit.moves_left < step.cost {
            return Err(ActionError::InsufficientMovement);
        }

        let mut result = moved(unit, step.position, step.cost);
        if step.position != target {
            result.message = format!(
                "Moved to {} on the way to {} ({} turns remaining)",
                step.position,
                target,
                path.estimated_turns
            );
            result.pending_order = Some(UnitOrder::MoveTo(target));
        }
        Ok(result)
    }

    fn attack(
        &self,
        unit: &Unit,
        unit_type: &UnitType,
        request: &ActionRequest,
    ) -> Result<ActionResult, ActionError> {
        let env = self.validator.env();
        let config = &self.validator.rules().config;
        let defender = request
            .target_unit()
            .ok_or(ActionError::InvalidCombatTarget)?;
        let defender_type = self.validator.unit_type(defender)?;

        let strength = CombatStrength::new(unit, unit_type, defender, defender_type, config);
        let outcome = resolve_combat(&strength, env.rng()?, self.game_seed, self.nonce, unit.id);

        let message = if outcome.attacker_won() {
            format!("Defeated enemy unit {} at {}", defender.id, defender.position)
        } else {
            format!("Lost the attack against {}", defender.position)
        };

        Ok(ActionResult {
            new_health: Some(outcome.attacker_hp),
            target_health: Some(outcome.defender_hp),
            target_destroyed: outcome.defender_hp == 0,
            actor_destroyed: outcome.attacker_hp == 0,
            fortified: unit.fortified.then_some(false),
            sentried: unit.sentried.then_some(false),
            ..ActionResult::success(message).with_cost(config.move_fragments.min(unit.moves_left))
        })
    }
}

fn moved(unit: &Unit, position: Position, cost: u32) -> ActionResult {
    ActionResult {
        fortified: unit.fortified.then_some(false),
        sentried: unit.sentried.then_some(false),
        ..ActionResult::success(format!("Moved to {position}"))
            .with_position(position)
            .with_cost(cost)
    }
}
