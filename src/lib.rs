//! nerkit - named entity extraction over pluggable NER models
//!
//! Callers load a model by name, pass the resulting `ModelHandle` into
//! `extract`, and get back a `Document` with entities in text order. The
//! bundled rule model covers common English news and business text; any
//! other `Analyzer` implementation can be wrapped in a handle instead.

pub mod cli;
pub mod config;
pub mod demo;
pub mod entities;
pub mod error;
pub mod model;
pub mod output;
pub mod patterns;

pub use entities::{extract, extract_entities, Document, Entity};
pub use error::{NerError, Result};
pub use model::{load_model, Analyzer, ModelHandle, RawSpan};
