//! Content selection shared by every command.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;

use march_content::{ContentFactory, MapLoader, UnitTypeLoader};
use march_core::{MapSnapshot, Position, Ruleset, UnitType, UnitTypeOracle, UnitTypeTable};

/// Where rules, map and unit types come from.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// Map layout (RON). Defaults to the bundled continent map
    #[arg(long, value_name = "RON")]
    map: Option<PathBuf>,

    /// Unit type catalog (RON). Defaults to the bundled roster
    #[arg(long, value_name = "RON")]
    units: Option<PathBuf>,

    /// Directory holding config.toml, terrain.toml and optional overrides
    #[arg(long, value_name = "DIR", env = "MARCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Unit type to move, by name (case-insensitive)
    #[arg(long, value_name = "NAME", default_value = "Warriors")]
    unit_type: String,
}

/// Everything a command needs, loaded from disk.
pub struct Content {
    pub rules: Ruleset,
    pub map: MapSnapshot,
    pub unit_types: UnitTypeTable,
    pub unit_type: UnitType,
}

impl ContentArgs {
    pub fn load(&self) -> Result<Content> {
        let factory = match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };

        let rules = factory
            .load_ruleset()
            .with_context(|| format!("Failed to load rules from {}", factory.data_dir().display()))?;
        let map = match &self.map {
            Some(path) => MapLoader::load(path)?,
            None => factory.load_map("continent")?,
        };
        let unit_types = match &self.units {
            Some(path) => UnitTypeLoader::load(path)?,
            None => factory.load_unit_types()?,
        };

        let unit_type = unit_types
            .unit_type_by_name(&self.unit_type)
            .cloned()
            .ok_or_else(|| {
                let known: Vec<_> = unit_types.iter().map(|ty| ty.name.as_str()).collect();
                anyhow!(
                    "Unknown unit type {:?} (known: {})",
                    self.unit_type,
                    known.join(", ")
                )
            })?;

        Ok(Content {
            rules,
            map,
            unit_types,
            unit_type,
        })
    }
}

/// Parses `x,y` into a position.
pub fn parse_position(value: &str) -> std::result::Result<Position, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {value:?}"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate in {value:?}"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate in {value:?}"))?;
    Ok(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse_with_optional_spaces() {
        assert_eq!(parse_position("3,4"), Ok(Position::new(3, 4)));
        assert_eq!(parse_position(" -1 , 7"), Ok(Position::new(-1, 7)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,4").is_err());
    }
}
