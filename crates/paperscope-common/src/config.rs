//! Engine configuration.
//! Reads paperscope.toml from the current directory or the path in PAPERSCOPE_CONFIG.
//! A missing file is not an error: every value has a default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PaperscopeError, Result};

pub const CONFIG_ENV_VAR: &str = "PAPERSCOPE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "paperscope.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub tiers: TierConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum papers returned by a batch.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Batches larger than this are scored on the rayon pool.
    /// 0 disables parallel scoring.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_max_results() -> usize { 50 }
fn default_parallel_threshold() -> usize { 10 }

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

// ── Tiers ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Minimum total score for the "core" tier.
    #[serde(default = "default_core_threshold")]
    pub core: f64,

    /// Minimum total score for the "explore" tier.
    #[serde(default = "default_explore_threshold")]
    pub explore: f64,
}

fn default_core_threshold() -> f64 { 7.0 }
fn default_explore_threshold() -> f64 { 5.0 }

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            core: default_core_threshold(),
            explore: default_explore_threshold(),
        }
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Used when a profile's exploration level is NaN or infinite.
    #[serde(default = "default_exploration_level")]
    pub default_exploration_level: f64,
}

fn default_exploration_level() -> f64 { 0.5 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_exploration_level: default_exploration_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load from `PAPERSCOPE_CONFIG` or `paperscope.toml`; defaults if neither exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).exists() {
            tracing::debug!("No config at {path}, using defaults");
            return Ok(Self::default());
        }
        Self::from_path(&path)
    }

    /// Load from a file, picking the format from the extension.
    pub fn from_path(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yaml::from_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        config.validate()?;
        tracing::info!("Configuration loaded from {path}");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Tier thresholds must be ordered and inside the score range.
    pub fn validate(&self) -> Result<()> {
        let TierConfig { core, explore } = self.tiers;
        if !(1.0..=10.0).contains(&explore) || !(1.0..=10.0).contains(&core) {
            return Err(PaperscopeError::Config(format!(
                "tier thresholds must lie in [1, 10] (core={core}, explore={explore})"
            )));
        }
        if explore > core {
            return Err(PaperscopeError::Config(format!(
                "explore threshold {explore} is above core threshold {core}"
            )));
        }
        if !(0.0..=1.0).contains(&self.scoring.default_exploration_level) {
            return Err(PaperscopeError::Config(format!(
                "scoring.default_exploration_level must lie in [0, 1] (got {})",
                self.scoring.default_exploration_level
            )));
        }
        if self.batch.max_results == 0 {
            return Err(PaperscopeError::Config("batch.max_results must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.batch.max_results, 50);
        assert_eq!(config.tiers.core, 7.0);
        assert_eq!(config.tiers.explore, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("[batch]\nmax_results = 20\n").unwrap();
        assert_eq!(config.batch.max_results, 20);
        assert_eq!(config.batch.parallel_threshold, 10);
        assert_eq!(config.tiers, TierConfig::default());
        assert_eq!(config.scoring.default_exploration_level, 0.5);
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example = include_str!("../../../paperscope.example.toml");
        assert_eq!(EngineConfig::from_toml_str(example).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_inverted_tiers_rejected() {
        let err = EngineConfig::from_toml_str("[tiers]\ncore = 4.0\nexplore = 6.0\n");
        assert!(matches!(err, Err(PaperscopeError::Config(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = EngineConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
