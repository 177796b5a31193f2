//! Search configuration and difficulty presets.
//!
//! `SearchConfig` carries everything an engine needs besides the rules:
//! depth, time budget, seed, and the sizes used by the stats sampler.
//! `Difficulty` maps the four level settings to board sizes and depths.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_depth must be at least 1")]
    DepthTooLow,
    #[error("stats_sample_depth must be at least 1")]
    SampleDepthTooLow,
}

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched below each root move.
    pub max_depth: u32,

    /// Wall-clock budget per search in milliseconds.
    /// Nodes reached after the budget is spent are scored statically.
    pub time_budget_ms: u64,

    /// Random seed for root shuffling and tie-breaks.
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Depth cap for the stats sampling search.
    pub stats_sample_depth: u32,

    /// Pruning events kept in a stats sample.
    pub max_pruning_events: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            time_budget_ms: 5_000,
            seed: None,
            stats_sample_depth: 3,
            max_pruning_events: 10,
        }
    }
}

impl SearchConfig {
    /// Defaults for the exhaustive row-game search (full 3x3 depth).
    #[must_use]
    pub fn for_minimax() -> Self {
        Self {
            max_depth: 9,
            ..Self::default()
        }
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with custom max depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Create a new config with a custom time budget.
    #[must_use]
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Time budget as a `Duration`.
    #[must_use]
    pub fn time_budget(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.time_budget_ms)
    }

    /// Check the values an engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::DepthTooLow);
        }
        if self.stats_sample_depth == 0 {
            return Err(ConfigError::SampleDepthTooLow);
        }
        Ok(())
    }
}

/// Level difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Board size and search depth for one game at one difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub board_size: usize,
    pub max_depth: u32,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Row-game preset.
    #[must_use]
    pub const fn row_game(self) -> Preset {
        match self {
            Self::Easy => Preset { board_size: 3, max_depth: 1 },
            Self::Medium => Preset { board_size: 3, max_depth: 3 },
            Self::Hard => Preset { board_size: 3, max_depth: 9 },
            // 4x4 is too wide for a full-depth search
            Self::Expert => Preset { board_size: 4, max_depth: 4 },
        }
    }

    /// Race-game preset.
    #[must_use]
    pub const fn race_game(self) -> Preset {
        match self {
            Self::Easy => Preset { board_size: 5, max_depth: 2 },
            Self::Medium => Preset { board_size: 6, max_depth: 3 },
            Self::Hard => Preset { board_size: 6, max_depth: 4 },
            Self::Expert => Preset { board_size: 7, max_depth: 5 },
        }
    }
}

impl Preset {
    /// Apply this preset's depth to a config.
    #[must_use]
    pub fn config(self, base: SearchConfig) -> SearchConfig {
        base.with_max_depth(self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.time_budget_ms, 5_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.stats_sample_depth, 3);
        assert_eq!(config.max_pruning_events, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_seed(123)
            .with_max_depth(6)
            .with_time_budget_ms(250);

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.time_budget(), std::time::Duration::from_millis(250));
    }

    #[test]
    fn test_validate() {
        let config = SearchConfig::default().with_max_depth(0);
        assert_eq!(config.validate(), Err(ConfigError::DepthTooLow));

        let config = SearchConfig {
            stats_sample_depth: 0,
            ..SearchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SampleDepthTooLow));
    }

    #[test]
    fn test_presets_grow_with_difficulty() {
        for pair in Difficulty::ALL.windows(2) {
            assert!(pair[0].race_game().max_depth <= pair[1].race_game().max_depth);
            assert!(pair[0].race_game().board_size <= pair[1].race_game().board_size);
        }
        assert_eq!(Difficulty::Expert.row_game().board_size, 4);
        assert_eq!(Difficulty::Hard.row_game().config(SearchConfig::default()).max_depth, 9);
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::for_minimax().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
