use crate::config::{Config, SCHEMA_VERSION};
use crate::error::{NerError, Result, ValidationError};
use crate::output::FORMATS;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every problem found
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_model(config, &mut errors);
        Self::validate_output(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(NerError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_model(config: &Config, errors: &mut Vec<ValidationError>) {
        let name = config.model.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::new(
                "model.name",
                "Model name cannot be empty",
            ));
        } else if name.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "model.name",
                format!("Model name must not contain path separators: {}", name),
            ));
        }

        // The directory may not exist yet; only an empty path is wrong
        if let Some(dir) = &config.model.models_dir {
            if dir.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "model.models_dir",
                    "Models directory path cannot be empty",
                ));
            }
        }
    }

    fn validate_output(config: &Config, errors: &mut Vec<ValidationError>) {
        let format = &config.output.format;
        if !FORMATS.contains(&format.as_str()) {
            errors.push(ValidationError::new(
                "output.format",
                format!("Format must be one of {:?}, got '{}'", FORMATS, format),
            ));
        }
    }
}
