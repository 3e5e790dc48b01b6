//! Entity extraction and document statistics
//!
//! This module provides:
//! - Stateless extraction through an injected `ModelHandle`
//! - The `Entity` and `Document` value types returned to callers
//! - Label counts per document

mod extractor;
mod summary;

pub use extractor::{extract, extract_by_label, extract_entities, labels, Document, Entity};
pub use summary::DocumentSummary;
