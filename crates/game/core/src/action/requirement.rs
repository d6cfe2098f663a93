use super::ActionTarget;
use crate::env::{PlayerOracle, UnitFlags, UnitType};
use crate::movement::MovementClass;
use crate::state::{GovernmentId, PlayerId, Unit, UnitTypeId};

/// Typed precondition attached to an action definition.
///
/// Requirements are conjunctive: every one must hold for the action to be legal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    UnitTypeAllowed(Vec<UnitTypeId>),
    UnitTypeDenied(Vec<UnitTypeId>),
    HasFlags(UnitFlags),
    LacksFlags(UnitFlags),
    MovementClass(Vec<MovementClass>),
    MinVeteranLevel(u8),
    /// The owner's government must be one of these.
    Government(Vec<GovernmentId>),
    Player(Vec<PlayerId>),
    /// The target must be a unit owned by another player.
    TargetForeign,
}

/// Inputs a requirement may inspect.
pub struct RequirementContext<'a> {
    pub unit: &'a Unit,
    pub unit_type: &'a UnitType,
    pub target: Option<&'a ActionTarget>,
    pub players: Option<&'a dyn PlayerOracle>,
}

impl Requirement {
    pub fn is_satisfied(&self, ctx: &RequirementContext<'_>) -> bool {
        match self {
            Self::UnitTypeAllowed(ids) => ids.contains(&ctx.unit_type.id),
            Self::UnitTypeDenied(ids) => !ids.contains(&ctx.unit_type.id),
            Self::HasFlags(flags) => ctx.unit_type.flags.contains(*flags),
            Self::LacksFlags(flags) => !ctx.unit_type.flags.intersects(*flags),
            Self::MovementClass(classes) => classes.contains(&ctx.unit_type.class),
            Self::MinVeteranLevel(level) => ctx.unit.veteran_level >= *level,
            Self::Government(governments) => government_matches(governments, ctx),
            Self::Player(players) => players.contains(&ctx.unit.owner),
            Self::TargetForeign => target_is_foreign(ctx),
        }
    }

    /// Short reason shown when this requirement fails.
    pub fn describe(&self) -> String {
        match self {
            Self::UnitTypeAllowed(_) => "unit type is not allowed".into(),
            Self::UnitTypeDenied(_) => "unit type is excluded".into(),
            Self::HasFlags(flags) => format!("unit type lacks {}", flag_names(*flags)),
            Self::LacksFlags(flags) => format!("unit type has {}", flag_names(*flags)),
            Self::MovementClass(_) => "movement class is not allowed".into(),
            Self::MinVeteranLevel(level) => format!("veteran level {level} required"),
            Self::Government(_) => "government does not allow it".into(),
            Self::Player(_) => "player is not allowed".into(),
            Self::TargetForeign => "target must belong to another player".into(),
        }
    }
}

fn government_matches(governments: &[GovernmentId], ctx: &RequirementContext<'_>) -> bool {
    ctx.players
        .and_then(|players| players.government(ctx.unit.owner))
        .is_some_and(|government| governments.contains(&government))
}

fn target_is_foreign(ctx: &RequirementContext<'_>) -> bool {
    ctx.target
        .and_then(ActionTarget::unit)
        .is_some_and(|target| target.owner != ctx.unit.owner)
}

fn flag_names(flags: UnitFlags) -> String {
    flags
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(" | ")
}
