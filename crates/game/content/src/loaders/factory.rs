//! Content factory for building the ruleset and oracles from data files.

use std::path::{Path, PathBuf};

use march_core::{ActionCatalog, GameConfig, MapSnapshot, Ruleset, UnitTypeTable};

use crate::loaders::{
    ActionOverridesLoader, CityNamesLoader, ConfigLoader, LoadResult, MapLoader, TerrainLoader,
    UnitTypeLoader,
};

/// Content factory that loads all rules content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── terrain.toml
/// ├── units.ron
/// ├── actions.ron     (optional)
/// ├── cities.ron      (optional)
/// └── maps/
///     └── continent.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Data bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_unit_types(&self) -> LoadResult<UnitTypeTable> {
        UnitTypeLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapSnapshot> {
        let path = self.data_dir.join("maps").join(format!("{map_name}.ron"));
        MapLoader::load(&path)
    }

    /// Builds the full ruleset: config, terrain costs, catalog with overrides
    /// and city names. Optional files that are absent are skipped.
    pub fn load_ruleset(&self) -> LoadResult<Ruleset> {
        let config = self.load_config()?;
        let terrain = TerrainLoader::load(&self.data_dir.join("terrain.toml"), &config)?;

        let mut catalog = ActionCatalog::standard();
        let actions = self.data_dir.join("actions.ron");
        if actions.exists() {
            catalog = ActionOverridesLoader::load(&actions)?.apply(catalog);
        }

        let cities = self.data_dir.join("cities.ron");
        let names = if cities.exists() {
            CityNamesLoader::load(&cities)?
        } else {
            Vec::new()
        };

        Ok(Ruleset::new(config)
            .with_terrain(terrain)
            .with_catalog(catalog)
            .with_city_names(names))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use march_core::{ActionKind, MapOracle, TerrainKind, UnitTypeOracle};

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let rules = factory.load_ruleset().unwrap();
        assert_eq!(rules.config.move_fragments, 3);
        assert!(!rules.city_names.is_empty());
        assert_eq!(rules.terrain.base_points(TerrainKind::Mountains), 3);
        assert!(!rules.catalog.get(ActionKind::FoundCity).requirements.is_empty());

        let types = factory.load_unit_types().unwrap();
        assert!(types.unit_type_by_name("Settlers").is_some());

        let map = factory.load_map("continent").unwrap();
        assert!(map.dimensions().area() > 0);
    }

    #[test]
    fn optional_files_may_be_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        std::fs::write(dir.path().join("terrain.toml"), "").unwrap();

        let rules = ContentFactory::new(dir.path()).load_ruleset().unwrap();
        assert!(rules.city_names.is_empty());
        assert_eq!(rules.catalog, ActionCatalog::standard());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_ruleset().unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
