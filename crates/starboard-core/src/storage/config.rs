//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Which profile the board runs as (persisted or ephemeral, with or
//!   without the skill prompt)
//! - Whether clearing asks for confirmation
//! - How goal completion is acknowledged
//! - Row label text
//!
//! Configuration is stored at `~/.config/starboard/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::wizard::WizardProfile;

/// How the presentation layer acknowledges a completed board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStyle {
    /// Show the goal with "Clear" and "Cancel" actions.
    #[default]
    OfferClear,
    /// Show the goal with a single "OK"; no reset from here.
    Acknowledge,
}

/// Board behavior profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Save the board after every mutation.
    #[serde(default = "default_true")]
    pub persistence_enabled: bool,
    /// Ask for a skill label between goal and token count.
    #[serde(default = "default_true")]
    pub skill_step_enabled: bool,
    /// Ask "Are you sure?" before clearing.
    #[serde(default = "default_true")]
    pub confirm_clear: bool,
    #[serde(default)]
    pub completion: CompletionStyle,
}

/// Row label text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Label shown on earned rows. Unearned rows show the skill label.
    #[serde(default = "default_earned_label")]
    pub earned: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/starboard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
}

fn default_true() -> bool {
    true
}
fn default_earned_label() -> String {
    "Earned!".into()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            persistence_enabled: true,
            skill_step_enabled: true,
            confirm_clear: true,
            completion: CompletionStyle::default(),
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            earned: default_earned_label(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the value does not fit the field.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Set a config value by key and save to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Wizard profile selected by this configuration.
    pub fn wizard_profile(&self) -> WizardProfile {
        WizardProfile {
            skill_step_enabled: self.profile.skill_step_enabled,
        }
    }
}
