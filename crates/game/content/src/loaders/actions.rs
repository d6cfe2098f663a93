//! Extra action requirements.
//!
//! Content can tighten the built-in catalog but never loosen it:
//!
//! ```ron
//! {
//!     found_city: [MinVeteranLevel(0), LacksFlags("IGNORE_TERRAIN")],
//!     attack: [MovementClass([land, sea])],
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use march_core::{ActionCatalog, ActionKind, Requirement};

use crate::loaders::{LoadResult, read_file};

/// Requirements to append per action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOverrides {
    extra: BTreeMap<ActionKind, Vec<Requirement>>,
}

impl ActionOverrides {
    pub fn is_empty(&self) -> bool {
        self.extra.is_empty()
    }

    /// Appends every override to `catalog`.
    pub fn apply(self, catalog: ActionCatalog) -> ActionCatalog {
        self.extra
            .into_iter()
            .fold(catalog, |catalog, (kind, requirements)| {
                catalog.with_requirements(kind, requirements)
            })
    }
}

pub struct ActionOverridesLoader;

impl ActionOverridesLoader {
    pub fn load(path: &Path) -> LoadResult<ActionOverrides> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ActionOverrides> {
        let extra: BTreeMap<ActionKind, Vec<Requirement>> =
            ron::from_str(content).context("Failed to parse action overrides RON")?;
        Ok(ActionOverrides { extra })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use march_core::UnitFlags;

    #[test]
    fn overrides_append_to_builtin_requirements() {
        let overrides = ActionOverridesLoader::parse(
            r#"{ found_city: [MinVeteranLevel(1)], fortify: [LacksFlags("NON_MILITARY")] }"#,
        )
        .unwrap();
        let catalog = overrides.apply(ActionCatalog::standard());

        assert_eq!(
            catalog.get(ActionKind::FoundCity).requirements,
            vec![
                Requirement::HasFlags(UnitFlags::FOUND_CITY),
                Requirement::MinVeteranLevel(1),
            ]
        );
        assert_eq!(
            catalog.get(ActionKind::Fortify).requirements,
            vec![Requirement::LacksFlags(UnitFlags::NON_MILITARY)]
        );
    }

    #[test]
    fn unknown_action_names_fail() {
        assert!(ActionOverridesLoader::parse("{ teleport: [] }").is_err());
    }

    #[test]
    fn empty_map_is_fine() {
        assert!(ActionOverridesLoader::parse("{}").unwrap().is_empty());
    }
}
