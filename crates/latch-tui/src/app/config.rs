//! Preferences persisted across sessions
//!
//! Holds the auto-lock timeout and the colour theme. The passcode itself
//! lives in its own file next to this one.

use std::fs;
use std::path::{Path, PathBuf};

use latch_core::DEFAULT_AUTO_LOCK;
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under the user config dir
const CONFIG_DIR_NAME: &str = "latch";

/// Colour theme selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeChoice {
    #[default]
    Dark,
    HighContrast,
}

/// Configuration that persists across sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatchConfig {
    /// Auto-lock timeout in seconds
    #[serde(default = "default_auto_lock")]
    pub auto_lock: u32,

    #[serde(default)]
    pub theme: ThemeChoice,
}

fn default_auto_lock() -> u32 {
    DEFAULT_AUTO_LOCK
}

impl Default for LatchConfig {
    fn default() -> Self {
        Self {
            auto_lock: default_auto_lock(),
            theme: ThemeChoice::Dark,
        }
    }
}

impl LatchConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then the platform default
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Config file inside `dir`
    pub fn file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    /// Load configuration from `path`
    ///
    /// Returns the defaults if the file doesn't exist or can't be parsed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to `path`, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LatchConfig::default();
        assert_eq!(config.auto_lock, 3600);
        assert_eq!(config.theme, ThemeChoice::Dark);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = LatchConfig::file_in(&dir.path().join("nested"));

        let config = LatchConfig {
            auto_lock: 300,
            theme: ThemeChoice::HighContrast,
        };
        config.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"high-contrast\""));
        assert_eq!(LatchConfig::load_from(&path), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: LatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LatchConfig::default());

        let config: LatchConfig = serde_json::from_str(r#"{"auto_lock": 60}"#).unwrap();
        assert_eq!(config.auto_lock, 60);
        assert_eq!(config.theme, ThemeChoice::Dark);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = LatchConfig::file_in(dir.path());
        fs::write(&path, "not json").unwrap();

        assert_eq!(LatchConfig::load_from(&path), LatchConfig::default());
        assert_eq!(
            LatchConfig::load_from(&dir.path().join("absent.json")),
            LatchConfig::default()
        );
    }
}
