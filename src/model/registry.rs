//! Model lookup by name

use super::{Analyzer, ModelHandle, RuleModel};
use crate::error::{NerError, Result};
use crate::patterns::ModelDefinition;
use std::path::Path;

/// Model used when neither config nor CLI names one
pub const DEFAULT_MODEL: &str = "en_core_rules";

/// Definitions compiled into the binary, as (name, TOML source)
pub const BUNDLED_MODELS: &[(&str, &str)] = &[(
    "en_core_rules",
    include_str!("../../config-templates/en_core_rules.toml"),
)];

/// Load a model by name.
///
/// `<models_dir>/<name>.toml` takes precedence over a bundled definition of
/// the same name.
pub fn load_model(name: &str, models_dir: Option<&Path>) -> Result<ModelHandle> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NerError::model_load(name, "model name is empty"));
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(NerError::model_load(name, "model name must be a plain identifier"));
    }

    let definition = find_definition(name, models_dir)?;
    if definition.meta.name != name {
        tracing::debug!(
            "Model file for '{}' declares name '{}'",
            name,
            definition.meta.name
        );
    }

    let model = RuleModel::from_definition(&definition)?;
    tracing::info!(
        "Loaded model '{}' v{} ({} gazetteers, {} patterns)",
        model.name(),
        model.version(),
        model.gazetteer_count(),
        model.pattern_count()
    );

    Ok(ModelHandle::from_analyzer(model))
}

fn find_definition(name: &str, models_dir: Option<&Path>) -> Result<ModelDefinition> {
    if let Some(dir) = models_dir {
        let path = dir.join(format!("{}.toml", name));
        if path.is_file() {
            tracing::debug!("Reading model definition from {:?}", path);
            return ModelDefinition::from_file(&path)
                .map_err(|e| NerError::model_load(name, e.to_string()));
        }
    }

    let (_, source) = BUNDLED_MODELS
        .iter()
        .find(|(bundled, _)| *bundled == name)
        .ok_or_else(|| NerError::model_load(name, "model is not installed"))?;

    ModelDefinition::from_toml_str(source).map_err(|e| NerError::model_load(name, e.to_string()))
}

/// Names of every model `load_model` could find, sorted
pub fn available_models(models_dir: Option<&Path>) -> Result<Vec<String>> {
    let mut names: Vec<String> = BUNDLED_MODELS
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();

    if let Some(dir) = models_dir {
        if dir.is_dir() {
            let entries = std::fs::read_dir(dir).map_err(|e| NerError::Io {
                source: e,
                context: format!("Failed to read models directory: {:?}", dir),
            })?;
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_string());
                    }
                }
            }
        }
    }

    names.sort();
    names.dedup();
    Ok(names)
}
