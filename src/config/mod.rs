//! Configuration management for nerkit
//!
//! Settings come from a TOML file, then `NERKIT_*` environment variables,
//! then command line flags (applied by the binary).

use crate::error::{NerError, Result};
use crate::model::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Which model to load and where to look for model definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models_dir: Option<PathBuf>,
}

/// How results are printed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: String, // "plain" or "json"
    #[serde(default)]
    pub show_offsets: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "plain".to_string(),
            show_offsets: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NerError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| NerError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| NerError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: NERKIT_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::vars());
    }

    /// Apply `NERKIT_`-prefixed key/value overrides; unknown or invalid keys are logged and skipped
    pub fn apply_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix("NERKIT_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "MODEL__NAME" => {
                self.model.name = value.to_string();
            }
            "MODEL__MODELS_DIR" => {
                self.model.models_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "OUTPUT__FORMAT" => {
                self.output.format = value.to_string();
            }
            "OUTPUT__SHOW_OFFSETS" => {
                self.output.show_offsets =
                    value.parse().map_err(|_| NerError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as boolean", value),
                    })?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NerError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("nerkit").join("config.toml"))
    }

    /// Get the default directory searched for model definitions
    pub fn default_models_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NerError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("nerkit").join("models"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: SCHEMA_VERSION.to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            model: ModelConfig {
                name: DEFAULT_MODEL.to_string(),
                models_dir: None,
            },
            output: OutputConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.model.models_dir = Some(dir.path().join("models"));
        config.output.show_offsets = true;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.model.models_dir, Some(dir.path().join("models")));
        assert!(loaded.output.show_offsets);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(&dir.path().join("absent.toml")),
            Err(NerError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_output_section_optional() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[_meta]\nschema_version = \"1.0.0\"\n\n[model]\nname = \"en_core_rules\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output.format, "plain");
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[_meta]\nschema_version = \"9.9.9\"\n\n[model]\nname = \"\"\n",
        )
        .unwrap();

        match Config::load(&path) {
            Err(NerError::ConfigValidation { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("expected ConfigValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[
            ("NERKIT_MODEL__NAME", "custom"),
            ("NERKIT_MODEL__MODELS_DIR", "/opt/models"),
            ("NERKIT_OUTPUT__FORMAT", "json"),
            ("NERKIT_OUTPUT__SHOW_OFFSETS", "true"),
            ("OTHER_VAR", "ignored"),
        ]));

        assert_eq!(config.model.name, "custom");
        assert_eq!(config.model.models_dir, Some(PathBuf::from("/opt/models")));
        assert_eq!(config.output.format, "json");
        assert!(config.output.show_offsets);
    }

    #[test]
    fn test_invalid_override_is_skipped() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("NERKIT_OUTPUT__SHOW_OFFSETS", "maybe")]));
        assert!(!config.output.show_offsets);
    }
}
