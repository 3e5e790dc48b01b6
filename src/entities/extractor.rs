//! Entity extraction through an injected model handle
//!
//! The model's spans are mapped into `Entity` values right at the boundary;
//! nothing past this module sees `RawSpan`.

use crate::entities::DocumentSummary;
use crate::error::{NerError, Result};
use crate::model::{ModelHandle, RawSpan};
use serde::{Deserialize, Serialize};

/// Extracted entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Surface form as it appears in the source text
    pub text: String,
    /// Category tag from the model's vocabulary (ORG, GPE, MONEY, ...)
    pub label: String,
    /// Character offset of the first character
    pub start: usize,
    /// Character offset one past the last character
    pub end: usize,
}

/// Source text together with the entities found in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub entities: Vec<Entity>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Entities carrying `label`, in document order
    pub fn with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.label == label)
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from_entities(&self.entities)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// Run the model over `text` and return the resulting document.
///
/// Entities are sorted by start offset; empty text yields an empty document
/// without calling the model.
pub fn extract(handle: &ModelHandle, text: &str) -> Result<Document> {
    let analyzer = handle.analyzer()?;

    if text.is_empty() {
        return Ok(Document {
            text: String::new(),
            entities: Vec::new(),
        });
    }

    let spans = analyzer.analyze(text).map_err(|e| match e {
        NerError::Analysis(_) => e,
        other => NerError::Analysis(other.to_string()),
    })?;

    tracing::debug!(
        "Model '{}' returned {} spans for {} bytes",
        analyzer.name(),
        spans.len(),
        text.len()
    );

    let mut spans = spans
        .into_iter()
        .map(|span| check_span(text, span))
        .collect::<Result<Vec<_>>>()?;

    // Stable, so equal starts keep the model's order
    spans.sort_by_key(|s| s.start);

    // Starts are non-decreasing, so char offsets are counted in one pass
    let mut byte_pos = 0;
    let mut char_pos = 0;
    let entities = spans
        .into_iter()
        .map(|span| {
            char_pos += text[byte_pos..span.start].chars().count();
            byte_pos = span.start;
            to_entity(text, span, char_pos)
        })
        .collect();

    Ok(Document {
        text: text.to_string(),
        entities,
    })
}

/// Extract and return only the entity list
pub fn extract_entities(handle: &ModelHandle, text: &str) -> Result<Vec<Entity>> {
    extract(handle, text).map(|doc| doc.entities)
}

/// Extract entities with a specific label, e.g. "ORG" or "MONEY"
pub fn extract_by_label(handle: &ModelHandle, text: &str, label: &str) -> Result<Vec<Entity>> {
    Ok(extract_entities(handle, text)?
        .into_iter()
        .filter(|e| e.label == label)
        .collect())
}

/// Unique labels found in text, sorted
pub fn labels(handle: &ModelHandle, text: &str) -> Result<Vec<String>> {
    let mut labels: Vec<String> = extract_entities(handle, text)?
        .into_iter()
        .map(|e| e.label)
        .collect();
    labels.sort();
    labels.dedup();
    Ok(labels)
}

fn check_span(text: &str, span: RawSpan) -> Result<RawSpan> {
    let RawSpan {
        start, end, label, ..
    } = &span;

    if start >= end || *end > text.len() {
        return Err(NerError::Analysis(format!(
            "span {}..{} ({}) is outside text of {} bytes",
            start,
            end,
            label,
            text.len()
        )));
    }
    if !text.is_char_boundary(*start) || !text.is_char_boundary(*end) {
        return Err(NerError::Analysis(format!(
            "span {}..{} ({}) splits a character",
            start, end, label
        )));
    }
    Ok(span)
}

/// Map a checked span whose start lies `char_start` characters into `text`
fn to_entity(text: &str, span: RawSpan, char_start: usize) -> Entity {
    let surface = &text[span.start..span.end];
    if surface != span.surface_text {
        tracing::debug!(
            "Model surface '{}' differs from source '{}', using source",
            span.surface_text,
            surface
        );
    }

    Entity {
        text: surface.to_string(),
        label: span.label,
        start: char_start,
        end: char_start + surface.chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Analyzer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns the configured spans verbatim and counts calls
    struct Scripted {
        spans: Vec<RawSpan>,
        calls: Arc<AtomicUsize>,
    }

    impl Analyzer for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn labels(&self) -> Vec<String> {
            vec![]
        }

        fn analyze(&self, _text: &str) -> Result<Vec<RawSpan>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.spans.clone())
        }
    }

    struct Failing;

    impl Analyzer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn labels(&self) -> Vec<String> {
            vec![]
        }

        fn analyze(&self, _text: &str) -> Result<Vec<RawSpan>> {
            Err(NerError::Config("tokenizer missing".to_string()))
        }
    }

    fn scripted(spans: Vec<RawSpan>) -> (ModelHandle, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let handle = ModelHandle::from_analyzer(Scripted {
            spans,
            calls: calls.clone(),
        });
        (handle, calls)
    }

    #[test]
    fn test_unloaded_handle_is_unavailable() {
        let result = extract(&ModelHandle::unloaded(), "Apple");
        assert!(matches!(result, Err(NerError::ModelUnavailable)));
    }

    #[test]
    fn test_unloaded_handle_checked_before_empty_text() {
        let result = extract(&ModelHandle::unloaded(), "");
        assert!(matches!(result, Err(NerError::ModelUnavailable)));
    }

    #[test]
    fn test_empty_text_skips_model() {
        let (handle, calls) = scripted(vec![RawSpan::new(0, 1, "X", "x")]);
        let doc = extract(&handle, "").unwrap();
        assert!(doc.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_failure_becomes_analysis_error() {
        let handle = ModelHandle::from_analyzer(Failing);
        match extract(&handle, "some text") {
            Err(NerError::Analysis(msg)) => assert!(msg.contains("tokenizer missing")),
            other => panic!("expected Analysis, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_bounds_span_rejected() {
        let (handle, _) = scripted(vec![RawSpan::new(2, 40, "ORG", "")]);
        assert!(matches!(
            extract(&handle, "short"),
            Err(NerError::Analysis(_))
        ));
    }

    #[test]
    fn test_empty_span_rejected() {
        let (handle, _) = scripted(vec![RawSpan::new(3, 3, "ORG", "")]);
        assert!(matches!(
            extract(&handle, "short"),
            Err(NerError::Analysis(_))
        ));
    }

    #[test]
    fn test_span_splitting_character_rejected() {
        // 'é' is two bytes
        let (handle, _) = scripted(vec![RawSpan::new(0, 2, "PERSON", "")]);
        assert!(matches!(
            extract(&handle, "éa"),
            Err(NerError::Analysis(_))
        ));
    }

    #[test]
    fn test_entities_sorted_by_start() {
        let (handle, _) = scripted(vec![
            RawSpan::new(11, 17, "GPE", "Berlin"),
            RawSpan::new(0, 4, "ORG", "Acme"),
        ]);
        let doc = extract(&handle, "Acme opens Berlin office").unwrap();
        let starts: Vec<usize> = doc.iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![0, 11]);
    }

    #[test]
    fn test_equal_starts_keep_model_order() {
        let (handle, _) = scripted(vec![
            RawSpan::new(0, 4, "ORG", "Acme"),
            RawSpan::new(0, 4, "PRODUCT", "Acme"),
        ]);
        let doc = extract(&handle, "Acme").unwrap();
        assert_eq!(doc.entities[0].label, "ORG");
        assert_eq!(doc.entities[1].label, "PRODUCT");
    }

    #[test]
    fn test_offsets_are_characters() {
        let text = "Café Zürich opened";
        let start = text.find("Zürich").unwrap();
        let end = start + "Zürich".len();
        let (handle, _) = scripted(vec![RawSpan::new(start, end, "GPE", "Zürich")]);

        let doc = extract(&handle, text).unwrap();
        let entity = &doc.entities[0];
        assert_eq!(entity.start, 5);
        assert_eq!(entity.end, 11);
        assert_eq!(entity.text, "Zürich");
        assert_eq!(
            text.chars().skip(entity.start).take(entity.end - entity.start).collect::<String>(),
            "Zürich"
        );
    }

    #[test]
    fn test_char_offsets_for_unordered_multibyte_spans() {
        let text = "Łódź, Köln and Zürich";
        let span = |word: &str, label: &str| {
            let start = text.find(word).unwrap();
            RawSpan::new(start, start + word.len(), label, word)
        };
        let (handle, _) = scripted(vec![
            span("Zürich", "GPE"),
            span("Łódź", "GPE"),
            span("Köln", "GPE"),
        ]);

        let doc = extract(&handle, text).unwrap();
        let found: Vec<(&str, usize, usize)> = doc
            .iter()
            .map(|e| (e.text.as_str(), e.start, e.end))
            .collect();
        assert_eq!(
            found,
            vec![("Łódź", 0, 4), ("Köln", 6, 10), ("Zürich", 15, 21)]
        );
    }

    #[test]
    fn test_surface_text_taken_from_source() {
        let (handle, _) = scripted(vec![RawSpan::new(0, 4, "ORG", "ACME")]);
        let doc = extract(&handle, "Acme").unwrap();
        assert_eq!(doc.entities[0].text, "Acme");
    }

    #[test]
    fn test_label_helpers() {
        let text = "Acme and Globex in Berlin";
        let (handle, _) = scripted(vec![
            RawSpan::new(0, 4, "ORG", "Acme"),
            RawSpan::new(9, 15, "ORG", "Globex"),
            RawSpan::new(19, 25, "GPE", "Berlin"),
        ]);

        let orgs = extract_by_label(&handle, text, "ORG").unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(labels(&handle, text).unwrap(), vec!["GPE", "ORG"]);

        let doc = extract(&handle, text).unwrap();
        assert_eq!(doc.with_label("GPE").count(), 1);
    }
}
