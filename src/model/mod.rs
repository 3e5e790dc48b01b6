//! NER model collaborator
//!
//! This module provides:
//! - The `Analyzer` trait every model implements
//! - `ModelHandle`, the loaded-model capability passed into extraction
//! - Model loading by name (bundled definitions and a models directory)
//! - `RuleModel`, the gazetteer and pattern based model shipped with the crate

use crate::error::{NerError, Result};
use std::fmt;
use std::sync::Arc;

mod registry;
mod rule;

pub use registry::{available_models, load_model, BUNDLED_MODELS, DEFAULT_MODEL};
pub use rule::RuleModel;

/// A span as reported by a model, in byte offsets into the analyzed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub surface_text: String,
}

impl RawSpan {
    pub fn new(
        start: usize,
        end: usize,
        label: impl Into<String>,
        surface_text: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            surface_text: surface_text.into(),
        }
    }
}

/// Analysis entry point of an NER model.
///
/// Implementations must be safe for concurrent read-only use; the extractor
/// never mutates a model.
pub trait Analyzer: Send + Sync {
    /// Name the model was loaded under
    fn name(&self) -> &str;

    /// Label vocabulary the model can produce
    fn labels(&self) -> Vec<String>;

    /// Find entity spans in `text`
    fn analyze(&self, text: &str) -> Result<Vec<RawSpan>>;
}

/// Handle to a loaded model.
///
/// Cloning shares the underlying model. The default handle holds nothing and
/// every extraction through it fails with `NerError::ModelUnavailable`.
#[derive(Clone, Default)]
pub struct ModelHandle {
    inner: Option<Arc<dyn Analyzer>>,
}

impl ModelHandle {
    /// Handle that holds no model
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Wrap any analyzer implementation
    pub fn from_analyzer<A: Analyzer + 'static>(analyzer: A) -> Self {
        Self {
            inner: Some(Arc::new(analyzer)),
        }
    }

    pub fn from_arc(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            inner: Some(analyzer),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.as_deref().map(|a| a.name())
    }

    /// Borrow the model, failing if none is loaded
    pub fn analyzer(&self) -> Result<&dyn Analyzer> {
        self.inner.as_deref().ok_or(NerError::ModelUnavailable)
    }

    /// Drop this handle's reference to the model
    pub fn unload(&mut self) {
        self.inner = None;
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model", &self.name())
            .finish()
    }
}
