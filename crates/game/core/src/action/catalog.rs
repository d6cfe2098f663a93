use strum::{EnumCount, IntoEnumIterator};

use super::{ActionCategory, ActionKind, Requirement};
use crate::env::UnitFlags;

/// What kind of target an action takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetShape {
    None,
    Tile,
    Unit,
}

/// Whether performing the action relocates the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorMovement {
    Stays,
    MovesToTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub kind: ActionKind,
    pub category: ActionCategory,
    pub requirements: Vec<Requirement>,
    pub target: TargetShape,
    pub consumes_actor: bool,
    pub movement: ActorMovement,
}

impl ActionDefinition {
    /// Built-in definition of `kind`.
    pub fn builtin(kind: ActionKind) -> Self {
        use ActionCategory as Cat;
        use ActorMovement::*;

        let (category, target, consumes_actor, movement, requirements) = match kind {
            ActionKind::Move | ActionKind::Goto => {
                (Cat::Movement, TargetShape::Tile, false, MovesToTarget, vec![])
            }
            ActionKind::Fortify | ActionKind::Sentry | ActionKind::Wait => {
                (Cat::Activity, TargetShape::None, false, Stays, vec![])
            }
            ActionKind::FoundCity => (
                Cat::Settlement,
                TargetShape::None,
                true,
                Stays,
                vec![Requirement::HasFlags(UnitFlags::FOUND_CITY)],
            ),
            ActionKind::BuildRoad => (
                Cat::Improvement,
                TargetShape::None,
                false,
                Stays,
                vec![Requirement::HasFlags(UnitFlags::BUILD_IMPROVEMENTS)],
            ),
            ActionKind::Pillage => (Cat::Improvement, TargetShape::None, false, Stays, vec![]),
            ActionKind::Attack => (
                Cat::Combat,
                TargetShape::Unit,
                false,
                Stays,
                vec![
                    Requirement::LacksFlags(UnitFlags::NON_MILITARY),
                    Requirement::TargetForeign,
                ],
            ),
            ActionKind::Disband => (Cat::Lifecycle, TargetShape::None, true, Stays, vec![]),
        };

        Self {
            kind,
            category,
            requirements,
            target,
            consumes_actor,
            movement,
        }
    }
}

/// Immutable table of action definitions, one per [`ActionKind`].
///
/// Built once at startup and shared read-only by validation and execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionCatalog {
    definitions: Vec<ActionDefinition>,
}

impl ActionCatalog {
    pub fn standard() -> Self {
        let definitions: Vec<_> = ActionKind::iter().map(ActionDefinition::builtin).collect();
        debug_assert_eq!(definitions.len(), ActionKind::COUNT);
        Self { definitions }
    }

    /// Appends extra requirements to `kind`. Built-in requirements are kept.
    pub fn with_requirements(
        mut self,
        kind: ActionKind,
        requirements: impl IntoIterator<Item = Requirement>,
    ) -> Self {
        self.definitions[kind.index()]
            .requirements
            .extend(requirements);
        self
    }

    pub fn get(&self, kind: ActionKind) -> &ActionDefinition {
        &self.definitions[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.definitions.iter()
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_entry() {
        let catalog = ActionCatalog::standard();
        assert_eq!(catalog.iter().count(), ActionKind::COUNT);
        for kind in ActionKind::iter() {
            assert_eq!(catalog.get(kind).kind, kind);
        }
    }

    #[test]
    fn shapes_and_consumption() {
        let catalog = ActionCatalog::standard();
        let goto = catalog.get(ActionKind::Goto);
        assert_eq!(goto.target, TargetShape::Tile);
        assert_eq!(goto.movement, ActorMovement::MovesToTarget);

        let found = catalog.get(ActionKind::FoundCity);
        assert!(found.consumes_actor);
        assert_eq!(found.category, ActionCategory::Settlement);

        assert_eq!(catalog.get(ActionKind::Attack).target, TargetShape::Unit);
        assert!(catalog.get(ActionKind::Disband).consumes_actor);
        assert!(!catalog.get(ActionKind::Wait).consumes_actor);
    }

    #[test]
    fn extra_requirements_are_appended() {
        let catalog = ActionCatalog::standard()
            .with_requirements(ActionKind::FoundCity, [Requirement::MinVeteranLevel(1)]);
        let reqs = &catalog.get(ActionKind::FoundCity).requirements;
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0], Requirement::HasFlags(UnitFlags::FOUND_CITY));
        assert_eq!(reqs[1], Requirement::MinVeteranLevel(1));
    }
}
