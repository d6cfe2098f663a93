use crate::action::ActionCatalog;
use crate::config::GameConfig;
use crate::movement::TerrainCostModel;

/// Process-wide rules loaded once at startup and shared read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ruleset {
    pub config: GameConfig,
    pub terrain: TerrainCostModel,
    pub catalog: ActionCatalog,
    /// Names handed out to cities founded without an explicit name.
    pub city_names: Vec<String>,
}

impl Ruleset {
    pub fn new(config: GameConfig) -> Self {
        let terrain = TerrainCostModel::new(&config);
        Self {
            config,
            terrain,
            catalog: ActionCatalog::standard(),
            city_names: Vec::new(),
        }
    }

    pub fn with_terrain(mut self, terrain: TerrainCostModel) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_city_names(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.city_names = names.into_iter().collect();
        self
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
