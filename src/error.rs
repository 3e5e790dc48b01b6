use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nerkit
#[derive(Error, Debug)]
pub enum NerError {
    /// The named model is not installed or its definition is unusable
    #[error("Failed to load model '{name}': {reason}")]
    ModelLoad { name: String, reason: String },

    /// Extraction was attempted with a handle that holds no model
    #[error("Model is not loaded")]
    ModelUnavailable,

    /// The model failed while analyzing text, or returned spans that break its contract
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NerError {
    pub fn model_load(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for nerkit operations
pub type Result<T> = std::result::Result<T, NerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_load_message() {
        let err = NerError::model_load("en_core_web_sm", "model is not installed");
        assert_eq!(
            err.to_string(),
            "Failed to load model 'en_core_web_sm': model is not installed"
        );
    }

    #[test]
    fn test_extraction_error_messages() {
        assert_eq!(NerError::ModelUnavailable.to_string(), "Model is not loaded");
        assert_eq!(
            NerError::Analysis("span 2..40 (ORG) is outside text of 5 bytes".to_string())
                .to_string(),
            "Analysis failed: span 2..40 (ORG) is outside text of 5 bytes"
        );
    }
}
