//! Engine configuration
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a playable reference setup. Hosts may layer environment overrides
//! on top with [`EngineConfig::with_env`].

use serde::{Deserialize, Serialize};

use crate::scoring::HardDropScoring;
use crate::types::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};

/// Seed used when none is configured
pub const DEFAULT_SEED: u32 = 1;

/// Construction parameters for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rows including the floor row
    pub height: usize,
    /// Columns including both walls
    pub width: usize,
    /// Level the session starts at; the level never drops below it
    pub start_level: u32,
    /// Shape generator seed; `None` lets the host pick one
    pub seed: Option<u32>,
    pub hard_drop: HardDropScoring,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_FIELD_HEIGHT,
            width: DEFAULT_FIELD_WIDTH,
            start_level: 0,
            seed: None,
            hard_drop: HardDropScoring::None,
        }
    }
}

impl EngineConfig {
    /// Apply `BLOCKTRIS_*` environment overrides
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    ///
    /// Recognized keys: `BLOCKTRIS_HEIGHT`, `BLOCKTRIS_WIDTH`,
    /// `BLOCKTRIS_START_LEVEL`, `BLOCKTRIS_SEED`. Unparseable values are
    /// ignored and the existing setting is kept.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        if let Some(height) = parse("BLOCKTRIS_HEIGHT") {
            self.height = height as usize;
        }
        if let Some(width) = parse("BLOCKTRIS_WIDTH") {
            self.width = width as usize;
        }
        if let Some(level) = parse("BLOCKTRIS_START_LEVEL").and_then(|v| u32::try_from(v).ok()) {
            self.start_level = level;
        }
        if let Some(seed) = parse("BLOCKTRIS_SEED").and_then(|v| u32::try_from(v).ok()) {
            self.seed = Some(seed);
        }
        self
    }

    /// Configured seed or [`DEFAULT_SEED`]
    pub fn seed_or_default(&self) -> u32 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_reference_field() {
        let config = EngineConfig::default();
        assert_eq!(config.height, 23);
        assert_eq!(config.width, 12);
        assert_eq!(config.start_level, 0);
        assert_eq!(config.seed, None);
        assert_eq!(config.hard_drop, HardDropScoring::None);
        assert_eq!(config.seed_or_default(), DEFAULT_SEED);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"start_level": 3, "hard_drop": {"per_cell": 2}}"#).unwrap();
        assert_eq!(config.start_level, 3);
        assert_eq!(config.hard_drop, HardDropScoring::PerCell(2));
        assert_eq!(config.height, 23);
    }

    #[test]
    fn overrides_replace_and_ignore_garbage() {
        let vars: HashMap<&str, &str> = [
            ("BLOCKTRIS_HEIGHT", "30"),
            ("BLOCKTRIS_WIDTH", "wide"),
            ("BLOCKTRIS_SEED", " 42 "),
        ]
        .into_iter()
        .collect();

        let config = EngineConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.height, 30);
        assert_eq!(config.width, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.start_level, 0);
    }
}
