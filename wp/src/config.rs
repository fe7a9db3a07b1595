//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use planclient::BackendSettings;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured base URL
pub const BASE_URL_ENV: &str = "WEEKENDPLAN_BASE_URL";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Planner backend connection
    pub backend: BackendConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .weekendplan.yml
        let local_config = PathBuf::from(".weekendplan.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/weekendplan/weekendplan.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("weekendplan").join("weekendplan.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Planner backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Application name in the session path
    #[serde(rename = "app-name")]
    pub app_name: String,

    /// User identifier in the session path
    #[serde(rename = "user-id")]
    pub user_id: String,

    /// Deadline for the whole two-step exchange, in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            app_name: "weekend_planner".to_string(),
            user_id: "web_user".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl BackendConfig {
    /// Resolve into client settings, applying the `WEEKENDPLAN_BASE_URL`
    /// override - the one environment knob the app supports.
    pub fn settings(&self) -> BackendSettings {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone());

        BackendSettings {
            base_url,
            app_name: self.app_name.clone(),
            user_id: self.user_id.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}
