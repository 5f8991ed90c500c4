//! Agent configuration.
//!
//! Every tunable of the heuristics lives here with its default; a JSON file
//! may override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Tunables for the turn heuristics and the side files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Workers per citytile at or above which new cities are considered.
    pub build_ratio: f64,
    /// A city's fuel per tile must exceed this before it is expanded.
    pub fuel_per_tile_threshold: f64,
    /// How many identical recent positions mark a unit as stuck.
    pub stuck_window: usize,
    /// Turn on which the stats file is written.
    pub final_turn: u32,
    pub log_path: PathBuf,
    pub stats_path: PathBuf,
    /// Seed for stuck-unit moves; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            build_ratio: 0.75,
            fuel_per_tile_threshold: 300.0,
            stuck_window: 3,
            final_turn: 359,
            log_path: PathBuf::from("agent.log"),
            stats_path: PathBuf::from("agent.txt"),
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Loads a config from a JSON file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AgentConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the heuristics cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stuck_window < 2 {
            return Err(ConfigError::Invalid(format!(
                "stuck_window must be at least 2, got {}",
                self.stuck_window
            )));
        }
        if !self.build_ratio.is_finite() || self.build_ratio < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "build_ratio must be a non-negative number, got {}",
                self.build_ratio
            )));
        }
        if !self.fuel_per_tile_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "fuel_per_tile_threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let config = AgentConfig::default();
        assert_eq!(config.build_ratio, 0.75);
        assert_eq!(config.fuel_per_tile_threshold, 300.0);
        assert_eq!(config.stuck_window, 3);
        assert_eq!(config.final_turn, 359);
        assert_eq!(config.log_path, PathBuf::from("agent.log"));
        assert_eq!(config.stats_path, PathBuf::from("agent.txt"));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"build_ratio": 1.5, "seed": 7}"#).unwrap();
        assert_eq!(config.build_ratio, 1.5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.stuck_window, 3);
    }

    #[test]
    fn validate_rejects_tiny_stuck_window() {
        let config = AgentConfig {
            stuck_window: 1,
            ..AgentConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("luxbot-config-does-not-exist.json");
        assert!(matches!(AgentConfig::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join(format!("luxbot-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"final_turn": 10}"#).unwrap();
        let config = AgentConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.final_turn, 10);
    }
}
