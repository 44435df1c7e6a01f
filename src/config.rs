//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::analysis::Thresholds;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub analysis: Thresholds,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Entry store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_entries_file")]
    pub entries_file: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("carelog").to_string_lossy().to_string())
        .unwrap_or_else(|| "./carelog_data".to_string())
}

fn default_entries_file() -> String {
    "entries.jsonl".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            entries_file: default_entries_file(),
        }
    }
}

impl StoreConfig {
    /// Full path to the entries file
    pub fn entries_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.entries_file)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("carelog").join("config.toml")),
            Some(PathBuf::from("./carelog.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("CARELOG_DATA_DIR") {
            self.store.data_dir = data_dir;
        }
        if let Ok(level) = std::env::var("CARELOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CARELOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            analysis: Thresholds::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# carelog configuration
#
# Environment variables override these settings:
# - CARELOG_DATA_DIR
# - CARELOG_LOG_LEVEL
# - CARELOG_LOG_FORMAT

[store]
# Directory for the journal data
data_dir = "~/.local/share/carelog"

# Journal file name inside the data directory
entries_file = "entries.jsonl"

[analysis]
# Analyzer cutoffs. Every key is optional; omitted keys keep their
# built-in defaults. A few commonly tuned ones:
#
# min_entries_for_insights = 5
# high_pain_level = 7.0
# anomaly_z = 2.0
# trigger_window_hours = 24

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for the terminal) or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.store.entries_file, "entries.jsonl");
        assert_eq!(config.analysis.min_entries_for_insights, 5);
    }

    #[test]
    fn test_generated_config_parses() {
        // The shipped template must stay loadable
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_analysis_override() {
        let config: Config =
            toml::from_str("[analysis]\nhigh_pain_level = 6.0\n").unwrap();
        assert!((config.analysis.high_pain_level - 6.0).abs() < f64::EPSILON);
        assert_eq!(config.analysis.min_trigger_entries, 15);
    }

    #[test]
    fn test_entries_path() {
        let store = StoreConfig {
            data_dir: "/tmp/carelog".to_string(),
            entries_file: "entries.jsonl".to_string(),
        };
        assert_eq!(
            store.entries_path(),
            PathBuf::from("/tmp/carelog/entries.jsonl")
        );
    }
}
