//! Configuration settings for pomo.
//!
//! Settings are loaded from `~/.pomo/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::PomoError;
use crate::features::focus::{
    SessionDefaults, DEFAULT_LIST_LIMIT, DEFAULT_PLANNED_MINUTES, DEFAULT_SESSION_NAME,
};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Session defaults.
    pub session: SessionConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Owner used when none is given on the command line.
    #[serde(default)]
    pub owner: Option<String>,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Defaults for new sessions and listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name given to sessions created without one.
    #[serde(default = "default_session_name")]
    pub default_name: String,
    /// Planned duration in minutes for sessions created without one.
    #[serde(default = "default_planned_minutes")]
    pub planned_duration_minutes: u32,
    /// Number of sessions shown by `pomo list`.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_session_name() -> String {
    DEFAULT_SESSION_NAME.to_string()
}

const fn default_planned_minutes() -> u32 {
    DEFAULT_PLANNED_MINUTES
}

const fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            owner: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_name: default_session_name(),
            planned_duration_minutes: default_planned_minutes(),
            list_limit: default_list_limit(),
        }
    }
}

impl SessionConfig {
    /// Convert to tracker defaults, replacing unusable values.
    #[must_use]
    pub fn to_defaults(&self) -> SessionDefaults {
        let name = self.default_name.trim();
        SessionDefaults {
            name: if name.is_empty() {
                default_session_name()
            } else {
                name.to_string()
            },
            planned_duration: if self.planned_duration_minutes == 0 {
                default_planned_minutes()
            } else {
                self.planned_duration_minutes
            },
            list_limit: self.list_limit,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, PomoError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomoError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomoError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PomoError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomoError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert!(config.general.owner.is_none());
        assert_eq!(config.session.default_name, "Focus task");
        assert_eq!(config.session.planned_duration_minutes, 25);
        assert_eq!(config.session.list_limit, 50);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.general.owner = Some("alice".to_string());
        config.session.planned_duration_minutes = 30;

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.general.owner.as_deref(), Some("alice"));
        assert_eq!(loaded.session.planned_duration_minutes, 30);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
session:
  planned_duration_minutes: 45
general:
  default_output: json
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.session.planned_duration_minutes, 45);
        assert_eq!(config.general.default_output, OutputFormat::Json);
        // Missing fields fall back to defaults
        assert_eq!(config.session.list_limit, 50);
        assert_eq!(config.general.color, ColorSetting::Auto);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session: [not, a, map]").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, PomoError::Config(_)));
    }

    #[test]
    fn test_session_config_to_defaults() {
        let config = SessionConfig {
            default_name: "  ".to_string(),
            planned_duration_minutes: 0,
            list_limit: 10,
        };
        let defaults = config.to_defaults();

        assert_eq!(defaults.name, "Focus task");
        assert_eq!(defaults.planned_duration, 25);
        assert_eq!(defaults.list_limit, 10);
    }
}
