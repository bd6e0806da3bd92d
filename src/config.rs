//! Application-level configuration loading, including schedule-size limits.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "COURTSIDE_BACK_CONFIG_PATH";

/// Upper bounds applied when validating event configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleLimits {
    /// Largest team roster a single event may schedule.
    pub max_teams: u32,
    /// Largest number of round-robin cycles per event.
    pub max_pools: u32,
    /// Largest number of courts per event.
    pub max_courts: u32,
}

impl Default for ScheduleLimits {
    fn default() -> Self {
        Self {
            max_teams: 64,
            max_pools: 16,
            max_courts: 16,
        }
    }
}

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    limits: ScheduleLimits,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        limits = ?config.limits,
                        "loaded schedule limits from config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Schedule-size limits applied during event validation.
    pub fn limits(&self) -> ScheduleLimits {
        self.limits
    }
}

/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    max_teams: Option<u32>,
    #[serde(default)]
    max_pools: Option<u32>,
    #[serde(default)]
    max_courts: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = ScheduleLimits::default();
        Self {
            limits: ScheduleLimits {
                max_teams: value.max_teams.unwrap_or(defaults.max_teams),
                max_pools: value.max_pools.unwrap_or(defaults.max_pools),
                max_courts: value.max_courts.unwrap_or(defaults.max_courts),
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
