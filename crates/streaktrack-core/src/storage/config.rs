//! TOML-based application configuration.
//!
//! Stores the eligibility window bounds, the tier ladder and leaderboard
//! settings at `<data dir>/config.toml`. Every section has full defaults,
//! so an empty file (or none at all) yields the canonical behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::engine::EligibilityWindow;
use crate::error::ConfigError;
use crate::tier::TierTable;

/// Leaderboard presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// How many top streak holders to show
    #[serde(default = "default_leaderboard_size")]
    pub size: usize,
}

fn default_leaderboard_size() -> usize {
    5
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            size: default_leaderboard_size(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: EligibilityWindow,
    #[serde(default)]
    pub tiers: TierTable,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("<data dir>"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a value as a display string by dot-separated key,
    /// e.g. `window.min_hours`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = json.pointer(&dot_to_pointer(key))?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key and persist.
    ///
    /// The replacement is parsed against the existing value's type; object
    /// and array values (the tier ladder) take JSON.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value does not parse as
    /// the expected type, or saving fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        let slot = json
            .pointer_mut(&dot_to_pointer(key))
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        *slot = parse_as_existing(slot, value).map_err(|message| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        })?;

        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }
}

fn dot_to_pointer(key: &str) -> String {
    format!("/{}", key.replace('.', "/"))
}

fn parse_as_existing(
    existing: &serde_json::Value,
    value: &str,
) -> Result<serde_json::Value, String> {
    match existing {
        serde_json::Value::Bool(_) => value
            .parse::<bool>()
            .map(serde_json::Value::Bool)
            .map_err(|_| format!("cannot parse '{value}' as bool")),
        serde_json::Value::Number(_) => {
            if let Ok(n) = value.parse::<u64>() {
                Ok(serde_json::Value::Number(n.into()))
            } else if let Ok(n) = value.parse::<f64>() {
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| format!("cannot parse '{value}' as number"))
            } else {
                Err(format!("cannot parse '{value}' as number"))
            }
        }
        serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
            serde_json::from_str(value).map_err(|e| e.to_string())
        }
        _ => Ok(serde_json::Value::String(value.to_string())),
    }
}
