//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use march_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files. Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        anyhow::ensure!(
            config.move_fragments > 0,
            "move_fragments must be at least 1"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("move_fragments = 9\nhit_damage = 20\n").unwrap();
        assert_eq!(config.move_fragments, 9);
        assert_eq!(config.hit_damage, 20);
        assert_eq!(config.igter_cost, GameConfig::DEFAULT_IGTER_COST);
        assert_eq!(
            config.veteran_power_pct,
            GameConfig::DEFAULT_VETERAN_POWER_PCT
        );
    }

    #[test]
    fn zero_fragments_rejected() {
        assert!(ConfigLoader::parse("move_fragments = 0").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fortify_bonus_pct = 200\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.fortify_bonus_pct, 200);
    }
}
