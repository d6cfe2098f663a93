use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use march_content::ContentFactory;
use march_core::Ruleset;

use super::locks::UnitLocks;
use super::{Inner, Runtime, RuntimeConfig};
use crate::api::{CityFounder, LocalCityFounder, MovementBroadcast, Result, RuntimeError};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{InMemoryUnitRepo, UnitRepository};

/// Builder for [`Runtime`] with flexible configuration.
///
/// Only the oracles are required. The ruleset defaults to the standard rules,
/// units to an empty in-memory store, city founding to the in-process
/// [`LocalCityFounder`], and movement is relayed onto the runtime's
/// [`EventBus`].
pub struct RuntimeBuilder {
    config: Option<RuntimeConfig>,
    rules: Option<Ruleset>,
    oracles: Option<OracleManager>,
    units: Option<Arc<dyn UnitRepository>>,
    founder: Option<Arc<dyn CityFounder>>,
    broadcast: Option<Arc<dyn MovementBroadcast>>,
}

impl RuntimeBuilder {
    pub(super) fn new() -> Self {
        Self {
            config: None,
            rules: None,
            oracles: None,
            units: None,
            founder: None,
            broadcast: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn rules(mut self, rules: Ruleset) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Loads the ruleset, unit catalog and `maps/{map}.ron` from a content
    /// directory.
    pub fn content(mut self, factory: &ContentFactory, map: &str) -> Result<Self> {
        let rules = factory
            .load_ruleset()
            .map_err(|err| RuntimeError::Content(format!("{err:#}")))?;
        self.oracles = Some(OracleManager::from_content(factory, map)?);
        self.rules = Some(rules);
        Ok(self)
    }

    pub fn units(mut self, units: impl UnitRepository + 'static) -> Self {
        self.units = Some(Arc::new(units));
        self
    }

    /// Share an existing unit store.
    pub fn unit_repository(mut self, units: Arc<dyn UnitRepository>) -> Self {
        self.units = Some(units);
        self
    }

    pub fn city_founder(mut self, founder: impl CityFounder + 'static) -> Self {
        self.founder = Some(Arc::new(founder));
        self
    }

    pub fn movement_broadcast(mut self, broadcast: impl MovementBroadcast + 'static) -> Self {
        self.broadcast = Some(Arc::new(broadcast));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let config = self.config.unwrap_or_default();
        let events = EventBus::with_capacity(config.event_buffer_size);

        let founder = self.founder.unwrap_or_else(|| {
            Arc::new(LocalCityFounder::new(Arc::clone(oracles.cities()))) as Arc<dyn CityFounder>
        });
        let broadcast = self
            .broadcast
            .unwrap_or_else(|| Arc::new(events.clone()) as Arc<dyn MovementBroadcast>);
        let units = self
            .units
            .unwrap_or_else(|| Arc::new(InMemoryUnitRepo::new()) as Arc<dyn UnitRepository>);

        tracing::debug!(game = %config.game_id, "runtime built");

        Ok(Runtime {
            inner: Arc::new(Inner {
                config,
                rules: self.rules.unwrap_or_default(),
                oracles,
                units,
                founder,
                broadcast,
                events,
                locks: UnitLocks::default(),
                nonce: AtomicU64::new(0),
            }),
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
