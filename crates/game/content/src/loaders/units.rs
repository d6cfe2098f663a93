//! Unit type catalog loader.
//!
//! ```ron
//! [
//!     (id: 1, name: "Warriors", class: land, move_rate: 1, attack: 1, defense: 1),
//!     (id: 2, name: "Settlers", class: land, defense: 1, hit_points: 20,
//!      flags: "FOUND_CITY | NON_MILITARY"),
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use march_core::{MovementClass, UnitFlags, UnitType, UnitTypeId, UnitTypeTable};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct UnitTypeRon {
    id: u16,
    name: String,
    class: MovementClass,
    #[serde(default = "one")]
    move_rate: u32,
    #[serde(default)]
    attack: u32,
    #[serde(default = "one")]
    defense: u32,
    #[serde(default = "ten")]
    hit_points: u32,
    #[serde(default = "one")]
    firepower: u32,
    #[serde(default)]
    flags: UnitFlags,
}

fn one() -> u32 {
    1
}

fn ten() -> u32 {
    10
}

impl From<UnitTypeRon> for UnitType {
    fn from(ron: UnitTypeRon) -> Self {
        UnitType::new(UnitTypeId(ron.id), ron.name, ron.class)
            .with_move_rate(ron.move_rate)
            .with_combat(ron.attack, ron.defense, ron.hit_points, ron.firepower)
            .with_flags(ron.flags)
    }
}

pub struct UnitTypeLoader;

impl UnitTypeLoader {
    pub fn load(path: &Path) -> LoadResult<UnitTypeTable> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses a catalog, rejecting duplicate ids or names.
    pub fn parse(content: &str) -> LoadResult<UnitTypeTable> {
        let entries: Vec<UnitTypeRon> =
            ron::from_str(content).context("Failed to parse unit types RON")?;

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        let mut table = UnitTypeTable::default();
        for entry in entries {
            anyhow::ensure!(ids.insert(entry.id), "Duplicate unit type id {}", entry.id);
            anyhow::ensure!(
                names.insert(entry.name.to_ascii_lowercase()),
                "Duplicate unit type name '{}'",
                entry.name
            );
            table.insert(entry.into());
        }
        Ok(table)
    }
}
