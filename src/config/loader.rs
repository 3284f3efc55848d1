//! Configuration file loading with precedence handling.

use super::keybindings::KeyBindingSettings;
use crate::model::KeyAction;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LAYERLIST_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV_VAR: &str = "LAYERLIST_LOG_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/layerlist/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Key binding overrides.
    #[serde(default)]
    pub keybinding: Option<KeyBindingSection>,
}

/// `[keybinding]` table.
///
/// ```toml
/// [keybinding]
/// page-up = "pgup, ctrl+u"
/// compare-all = "ctrl+a"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct KeyBindingSection {
    /// Binding for [`KeyAction::PageUp`].
    #[serde(default)]
    pub page_up: Option<String>,
    /// Binding for [`KeyAction::PageDown`].
    #[serde(default)]
    pub page_down: Option<String>,
    /// Binding for [`KeyAction::CompareAll`].
    #[serde(default)]
    pub compare_all: Option<String>,
    /// Binding for [`KeyAction::CompareLayer`].
    #[serde(default)]
    pub compare_layer: Option<String>,
}

impl KeyBindingSection {
    /// Configured value for `action`, if any.
    pub fn value_for(&self, action: KeyAction) -> Option<&str> {
        let value = match action {
            KeyAction::PageUp => &self.page_up,
            KeyAction::PageDown => &self.page_down,
            KeyAction::CompareAll => &self.compare_all,
            KeyAction::CompareLayer => &self.compare_layer,
        };
        value.as_deref()
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Key bindings handed to the layer list at setup.
    pub key_bindings: KeyBindingSettings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            key_bindings: KeyBindingSettings::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/layerlist/layerlist.log` on Linux, or the platform
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("layerlist").join("layerlist.log")
    } else {
        PathBuf::from("layerlist.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/layerlist/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("layerlist").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LAYERLIST_CONFIG` environment variable
/// 3. Default path `~/.config/layerlist/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// Each key binding present in the file replaces the default for that action;
/// absent ones keep their defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let mut key_bindings = defaults.key_bindings;
    if let Some(section) = &config.keybinding {
        for action in KeyAction::ALL {
            if let Some(value) = section.value_for(action) {
                key_bindings.set(action.config_name(), value);
            }
        }
    }

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        key_bindings,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LAYERLIST_LOG_FILE`: Override log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(LOG_FILE_ENV_VAR) {
        config.log_file_path = PathBuf::from(path);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    log_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
