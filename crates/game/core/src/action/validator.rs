use super::{ActionDefinition, ActionError, ActionKind, ActionProbability, ActionRequest};
use super::{RequirementContext, TargetShape};
use crate::combat::attack_odds;
use crate::env::{GameEnv, UnitType};
use crate::rules::Ruleset;
use crate::state::{Position, Unit};

/// Decides whether a unit may perform an action and how likely it is to succeed.
#[derive(Clone, Copy)]
pub struct ActionValidator<'a> {
    rules: &'a Ruleset,
    env: GameEnv<'a>,
}

impl<'a> ActionValidator<'a> {
    pub fn new(rules: &'a Ruleset, env: GameEnv<'a>) -> Self {
        Self { rules, env }
    }

    pub fn rules(&self) -> &'a Ruleset {
        self.rules
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    pub fn definition(&self, kind: ActionKind) -> &'a ActionDefinition {
        self.rules.catalog.get(kind)
    }

    pub fn unit_type(&self, unit: &Unit) -> Result<&'a UnitType, ActionError> {
        self.env
            .unit_types()?
            .unit_type(unit.unit_type)
            .ok_or(ActionError::UnknownUnitType(unit.unit_type))
    }

    pub fn can_perform(&self, unit: &Unit, request: &ActionRequest) -> bool {
        self.check(unit, request).is_ok()
    }

    /// Like [`can_perform`](Self::can_perform) but explains the refusal.
    pub fn check(&self, unit: &Unit, request: &ActionRequest) -> Result<(), ActionError> {
        self.validate(unit, request).map(|_| ())
    }

    /// Probability of success on the 0..=200 scale.
    ///
    /// Only combat yields a genuine range; every other legal action is certain.
    pub fn probability(&self, unit: &Unit, request: &ActionRequest) -> ActionProbability {
        let Ok(unit_type) = self.validate(unit, request) else {
            return ActionProbability::IMPOSSIBLE;
        };
        match request.kind {
            ActionKind::Attack => {
                let Some(target) = request.target_unit() else {
                    return ActionProbability::IMPOSSIBLE;
                };
                let Ok(target_type) = self.unit_type(target) else {
                    return ActionProbability::IMPOSSIBLE;
                };
                attack_odds(unit, unit_type, target, target_type, &self.rules.config)
            }
            ActionKind::Pillage => ActionProbability::IMPOSSIBLE,
            _ => ActionProbability::CERTAIN,
        }
    }

    /// Runs generic requirements, then the action-specific predicate.
    pub(crate) fn validate(
        &self,
        unit: &Unit,
        request: &ActionRequest,
    ) -> Result<&'a UnitType, ActionError> {
        let unit_type = self.unit_type(unit)?;
        let definition = self.definition(request.kind);

        match definition.target {
            TargetShape::None => {}
            TargetShape::Tile if request.target.is_none() => {
                return Err(ActionError::MissingTarget(request.kind));
            }
            TargetShape::Tile => {}
            TargetShape::Unit if request.target.is_none() => {
                return Err(ActionError::MissingTarget(request.kind));
            }
            TargetShape::Unit if request.target_unit().is_none() => {
                return Err(ActionError::InvalidCombatTarget);
            }
            TargetShape::Unit => {}
        }

        let ctx = RequirementContext {
            unit,
            unit_type,
            target: request.target.as_ref(),
            players: self.env.players(),
        };
        if let Some(failed) = definition
            .requirements
            .iter()
            .find(|req| !req.is_satisfied(&ctx))
        {
            return Err(ActionError::RequirementNotMet {
                action: request.kind,
                reason: failed.describe(),
            });
        }

        self.check_specific(unit, unit_type, request)?;
        Ok(unit_type)
    }

    fn check_specific(
        &self,
        unit: &Unit,
        unit_type: &UnitType,
        request: &ActionRequest,
    ) -> Result<(), ActionError> {
        match request.kind {
            ActionKind::Fortify => {
                if unit.fortified {
                    return Err(ActionError::AlreadyFortified);
                }
                require_moves(unit)
            }
            ActionKind::Sentry | ActionKind::Wait => require_moves(unit),
            ActionKind::Move | ActionKind::Goto => require_moves(unit),
            ActionKind::FoundCity => {
                require_moves(unit)?;
                self.check_city_site(unit)
            }
            ActionKind::BuildRoad => {
                if self.is_land(unit.position)? {
                    Ok(())
                } else {
                    Err(ActionError::InvalidRoadSite)
                }
            }
            ActionKind::Attack => {
                require_moves(unit)?;
                if !unit_type.can_attack() {
                    return Err(ActionError::CannotAttack);
                }
                match request.target_unit() {
                    Some(target)
                        if target.owner != unit.owner
                            && unit.position.is_adjacent(target.position) =>
                    {
                        Ok(())
                    }
                    _ => Err(ActionError::InvalidCombatTarget),
                }
            }
            ActionKind::Disband | ActionKind::Pillage => Ok(()),
        }
    }

    fn check_city_site(&self, unit: &Unit) -> Result<(), ActionError> {
        if !self.is_land(unit.position)? {
            return Err(ActionError::InvalidCitySite);
        }
        let allowed = self
            .env
            .cities()
            .is_none_or(|cities| cities.can_found_city_at(unit.position, unit.owner));
        if allowed {
            Ok(())
        } else {
            Err(ActionError::InvalidCitySite)
        }
    }

    fn is_land(&self, position: Position) -> Result<bool, ActionError> {
        let map = self.env.map()?;
        if !map.contains(position) {
            return Ok(false);
        }
        Ok(map.terrain(position)?.is_some_and(|terrain| terrain.is_land()))
    }
}

fn require_moves(unit: &Unit) -> Result<(), ActionError> {
    if unit.has_moves() {
        Ok(())
    } else {
        Err(ActionError::NoMovesLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::fixtures::{self, SETTLERS, WARRIORS, World};
    use crate::action::Requirement;
    use crate::env::{CityInfo, TerrainKind};
    use crate::state::{CityId, PlayerId};

    #[test]
    fn fortify_needs_movement() {
        let world = World::flat(10, 10);
        let validator = world.validator();
        let exhausted = fixtures::unit(1, 1, WARRIORS, (3, 3), 0);
        let ready = fixtures::unit(2, 1, WARRIORS, (3, 3), 3);

        let fortify = ActionRequest::new(ActionKind::Fortify);
        assert!(!validator.can_perform(&exhausted, &fortify));
        assert!(validator.can_perform(&ready, &fortify));
        assert!(!validator.can_perform(&ready.clone().fortified(), &fortify));
    }

    #[test]
    fn wait_and_sentry_need_movement() {
        let world = World::flat(10, 10);
        let validator = world.validator();
        let exhausted = fixtures::unit(1, 1, WARRIORS, (3, 3), 0);
        for kind in [ActionKind::Wait, ActionKind::Sentry] {
            assert_eq!(
                validator.check(&exhausted, &ActionRequest::new(kind)),
                Err(ActionError::NoMovesLeft)
            );
        }
    }

    #[test]
    fn goto_requires_a_target() {
        let world = World::flat(10, 10);
        let validator = world.validator();
        let unit = fixtures::unit(1, 1, WARRIORS, (3, 3), 3);
        assert_eq!(
            validator.check(&unit, &ActionRequest::new(ActionKind::Goto)),
            Err(ActionError::MissingTarget(ActionKind::Goto))
        );
        assert!(validator.can_perform(&unit, &ActionRequest::goto(Position::new(5, 5))));
    }

    #[test]
    fn found_city_requires_capability_land_and_free_tile() {
        let mut world = World::flat(10, 10);
        world.map.set(Position::new(0, 0), Some(TerrainKind::Ocean));
        world.cities = world.cities.clone().with_city(
            Position::new(5, 5),
            CityInfo {
                id: CityId(1),
                owner: PlayerId(2),
            },
        );
        let validator = world.validator();
        let found = ActionRequest::new(ActionKind::FoundCity);

        let settlers = fixtures::unit(1, 1, SETTLERS, (3, 3), 3);
        assert!(validator.can_perform(&settlers, &found));

        let warriors = fixtures::unit(2, 1, WARRIORS, (3, 3), 3);
        assert!(matches!(
            validator.check(&warriors, &found),
            Err(ActionError::RequirementNotMet { .. })
        ));

        let occupied = fixtures::unit(3, 1, SETTLERS, (5, 5), 3);
        assert_eq!(
            validator.check(&occupied, &found),
            Err(ActionError::InvalidCitySite)
        );

        let at_sea = fixtures::unit(4, 1, SETTLERS, (0, 0), 3);
        assert_eq!(
            validator.check(&at_sea, &found),
            Err(ActionError::InvalidCitySite)
        );

        let tired = fixtures::unit(5, 1, SETTLERS, (3, 3), 0);
        assert!(!validator.can_perform(&tired, &found));
    }

    #[test]
    fn build_road_needs_workers() {
        let world = World::flat(10, 10);
        let validator = world.validator();
        let road = ActionRequest::new(ActionKind::BuildRoad);
        assert!(validator.can_perform(&fixtures::unit(1, 1, fixtures::WORKERS, (1, 1), 0), &road));
        assert!(!validator.can_perform(&fixtures::unit(2, 1, WARRIORS, (1, 1), 3), &road));
    }

    #[test]
    fn attack_needs_adjacent_enemy() {
        let world = World::flat(10, 10);
        let validator = world.validator();
        let attacker = fixtures::unit(1, 1, WARRIORS, (3, 3), 3);
        let enemy = fixtures::unit(2, 2, WARRIORS, (4, 3), 3);
        let friend = fixtures::unit(3, 1, WARRIORS, (4, 3), 3);
        let far_enemy = fixtures::unit(4, 2, WARRIORS, (6, 3), 3);

        let attack = |target: &Unit| ActionRequest::new(ActionKind::Attack).with_unit(target.clone());
        assert!(validator.can_perform(&attacker, &attack(&enemy)));
        assert!(!validator.can_perform(&attacker, &attack(&friend)));
        assert_eq!(
            validator.check(&attacker, &attack(&far_enemy)),
            Err(ActionError::InvalidCombatTarget)
        );

        let settlers = fixtures::unit(5, 1, SETTLERS, (3, 3), 3);
        assert!(!validator.can_perform(&settlers, &attack(&enemy)));
    }

    #[test]
    fn probabilities() {
        let world = World::flat(10, 10);
        let validator = world.validator();
        let unit = fixtures::unit(1, 1, WARRIORS, (3, 3), 3);
        let exhausted = fixtures::unit(2, 1, WARRIORS, (3, 3), 0);
        let enemy = fixtures::unit(3, 2, WARRIORS, (4, 4), 3);

        let fortify = ActionRequest::new(ActionKind::Fortify);
        assert_eq!(validator.probability(&unit, &fortify), ActionProbability::CERTAIN);
        assert_eq!(
            validator.probability(&exhausted, &fortify),
            ActionProbability::IMPOSSIBLE
        );
        assert_eq!(
            validator.probability(&unit, &ActionRequest::goto(Position::new(7, 7))),
            ActionProbability::CERTAIN
        );

        let odds = validator.probability(
            &unit,
            &ActionRequest::new(ActionKind::Attack).with_unit(enemy),
        );
        assert!(odds.min < odds.max);
        assert!(odds.max <= ActionProbability::CERTAIN_VALUE);
    }

    #[test]
    fn content_requirements_are_enforced() {
        let mut world = World::flat(10, 10);
        world.rules.catalog = world
            .rules
            .catalog
            .clone()
            .with_requirements(ActionKind::Fortify, [Requirement::MinVeteranLevel(1)]);
        let validator = world.validator();
        let green = fixtures::unit(1, 1, WARRIORS, (3, 3), 3);
        let veteran = green.clone().with_veteran_level(1);
        let fortify = ActionRequest::new(ActionKind::Fortify);

        assert!(!validator.can_perform(&green, &fortify));
        assert!(validator.can_perform(&veteran, &fortify));
    }
}
