//! Configuration file support for vlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/vlog/config.toml`.

use crate::{Error, Level, Logger, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Logger configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Verbosity threshold. Left unset, the logger keeps its default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Output destination configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Append to this file instead of the console
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("vlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Apply this configuration to a logger.
    ///
    /// Only configured values are touched: with no `level` the logger keeps
    /// whatever it had, including the unset default.
    pub fn apply(&self, logger: &Logger) -> Result<()> {
        if let Some(level) = self.level {
            logger.set_level(level);
        }
        if let Some(ref file) = self.output.file {
            if file.as_os_str().is_empty() {
                return Err(Error::Config("output.file must not be empty".into()));
            }
            logger.set_file_sink(file)?;
        }
        Ok(())
    }
}
