use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::wizard::NavigationPolicy;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub host: HostConfig,
    pub navigation: NavigationConfig,
    pub data: DataConfig,
}

/// Terminal host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Gate polling interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Wizard launched when none is named on the command line.
    pub default_wizard: String,
}

/// Wizard navigation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    /// Fail on out-of-range transition overrides instead of falling back to
    /// the sequential page. Unset means strict in debug builds only.
    pub strict_transitions: Option<bool>,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            default_wizard: "map".to_string(),
        }
    }
}

impl HostConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

impl NavigationConfig {
    pub fn policy(&self) -> NavigationPolicy {
        match self.strict_transitions {
            Some(strict_transitions) => NavigationPolicy { strict_transitions },
            None => NavigationPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/campaign-wizard/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("campaign-wizard"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Directory for rotated log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("campaign-wizard").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
