//! Terrain movement cost loader.
//!
//! ```toml
//! [move_cost]
//! grassland = 1
//! hills = 2
//! mountains = 3
//! ```
//!
//! Terrains not listed keep the cost of their category.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use march_core::{GameConfig, TerrainCostModel, TerrainKind};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct TerrainTableToml {
    #[serde(default)]
    move_cost: BTreeMap<String, u32>,
}

pub struct TerrainLoader;

impl TerrainLoader {
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<TerrainCostModel> {
        let content = read_file(path)?;
        Self::parse(&content, config).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str, config: &GameConfig) -> LoadResult<TerrainCostModel> {
        let table: TerrainTableToml =
            toml::from_str(content).context("Failed to parse terrain TOML")?;

        let mut model = TerrainCostModel::new(config);
        for (name, points) in table.move_cost {
            let terrain = TerrainKind::from_str(&name)
                .map_err(|_| anyhow!("Unknown terrain '{name}' in move_cost"))?;
            model.set_base_points(terrain, points);
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use march_core::{MoveCost, MovementClass};

    #[test]
    fn overrides_listed_terrains_only() {
        let config = GameConfig::default();
        let model = TerrainLoader::parse("[move_cost]\nswamp = 3\nforest = 1\n", &config).unwrap();

        assert_eq!(model.base_points(TerrainKind::Swamp), 3);
        assert_eq!(model.base_points(TerrainKind::Forest), 1);
        assert_eq!(model.base_points(TerrainKind::Mountains), 3);
        assert_eq!(
            model.cost(TerrainKind::Swamp, MovementClass::Land),
            MoveCost::Fragments(9)
        );
    }

    #[test]
    fn unknown_terrain_is_an_error() {
        let err = TerrainLoader::parse("[move_cost]\nlava = 5\n", &GameConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("lava"));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let model = TerrainLoader::parse("", &GameConfig::default()).unwrap();
        assert_eq!(model, TerrainCostModel::default());
    }
}
