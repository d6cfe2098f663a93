use march_core::GameId;

use crate::api::{Result, RuntimeError};

/// Runtime configuration shared across the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Game identifier handed to collaborators.
    pub game_id: GameId,
    /// Seed for combat rolls. Combine with the action nonce before use.
    pub game_seed: u64,
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const GAME_ID_VAR: &'static str = "MARCH_GAME_ID";
    pub const GAME_SEED_VAR: &'static str = "MARCH_GAME_SEED";
    pub const EVENT_BUFFER_VAR: &'static str = "MARCH_EVENT_BUFFER";

    pub const DEFAULT_EVENT_BUFFER: usize = 100;

    /// Reads `MARCH_GAME_ID`, `MARCH_GAME_SEED` and `MARCH_EVENT_BUFFER`.
    ///
    /// Unset variables fall back to the defaults; a missing seed is drawn at
    /// random.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(id) = parse_var(&lookup, Self::GAME_ID_VAR)? {
            config.game_id = GameId(id);
        }
        if let Some(seed) = parse_var(&lookup, Self::GAME_SEED_VAR)? {
            config.game_seed = seed;
        }
        if let Some(size) = parse_var::<usize>(&lookup, Self::EVENT_BUFFER_VAR)? {
            config.event_buffer_size = size.max(1);
        }
        Ok(config)
    }

    pub fn with_game_id(mut self, game_id: GameId) -> Self {
        self.game_id = game_id;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.game_seed = seed;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_id: GameId(1),
            game_seed: rand::random(),
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| RuntimeError::InvalidEnv {
            var,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("MARCH_GAME_ID", "42"),
            ("MARCH_GAME_SEED", "7"),
            ("MARCH_EVENT_BUFFER", "16"),
        ]))
        .unwrap();

        assert_eq!(config.game_id, GameId(42));
        assert_eq!(config.game_seed, 7);
        assert_eq!(config.event_buffer_size, 16);
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[("MARCH_GAME_SEED", " ")])).unwrap();
        assert_eq!(config.game_id, GameId(1));
        assert_eq!(config.event_buffer_size, RuntimeConfig::DEFAULT_EVENT_BUFFER);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = RuntimeConfig::from_lookup(lookup(&[("MARCH_GAME_ID", "abc")])).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InvalidEnv { var: "MARCH_GAME_ID", .. }
        ));
    }
}
