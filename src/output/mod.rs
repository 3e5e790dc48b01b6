//! Rendering of extracted documents for the terminal
//!
//! The library returns structured `Document`s; these functions are how the
//! CLI chooses to print them.

use crate::entities::{Document, Entity};
use crate::error::{NerError, Result};
use serde::Serialize;

/// Output formats accepted in config and on the command line
pub const FORMATS: &[&str] = &["plain", "json"];

/// One `"<text> <label>"` line, optionally followed by the character span
pub fn entity_line(entity: &Entity, show_offsets: bool) -> String {
    if show_offsets {
        format!(
            "{} {} {} {}",
            entity.text, entity.label, entity.start, entity.end
        )
    } else {
        format!("{} {}", entity.text, entity.label)
    }
}

/// Heading that introduces one input's entities
pub fn heading(title: &str) -> String {
    format!("\n--- {} ---", title)
}

/// All entity lines of a document, newline terminated
pub fn render_plain(document: &Document, show_offsets: bool) -> String {
    document
        .iter()
        .map(|e| entity_line(e, show_offsets) + "\n")
        .collect()
}

/// A document under its heading
pub fn render_section(title: &str, document: &Document, show_offsets: bool) -> String {
    format!("{}\n{}", heading(title), render_plain(document, show_offsets))
}

#[derive(Serialize)]
struct TitledDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(flatten)]
    document: &'a Document,
}

/// Pretty JSON array of documents, each with an optional title
pub fn render_json(documents: &[(Option<&str>, &Document)]) -> Result<String> {
    let items: Vec<TitledDocument<'_>> = documents
        .iter()
        .map(|(title, document)| TitledDocument {
            title: *title,
            document,
        })
        .collect();

    serde_json::to_string_pretty(&items).map_err(|e| NerError::Json {
        source: e,
        context: "Failed to serialize documents".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document {
            text: "Apple buys a U.K. startup".to_string(),
            entities: vec![
                Entity {
                    text: "Apple".to_string(),
                    label: "ORG".to_string(),
                    start: 0,
                    end: 5,
                },
                Entity {
                    text: "U.K.".to_string(),
                    label: "GPE".to_string(),
                    start: 13,
                    end: 17,
                },
            ],
        }
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(render_plain(&document(), false), "Apple ORG\nU.K. GPE\n");
    }

    #[test]
    fn test_plain_lines_with_offsets() {
        assert_eq!(
            render_plain(&document(), true),
            "Apple ORG 0 5\nU.K. GPE 13 17\n"
        );
    }

    #[test]
    fn test_section_heading() {
        let section = render_section("Example 1: Basic NER", &document(), false);
        assert!(section.starts_with("\n--- Example 1: Basic NER ---\nApple ORG\n"));
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        let empty = Document {
            text: "nothing here".to_string(),
            entities: vec![],
        };
        assert_eq!(render_plain(&empty, false), "");
    }

    #[test]
    fn test_json_rendering() {
        let doc = document();
        let json = render_json(&[(Some("Example"), &doc)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["title"], "Example");
        assert_eq!(value[0]["entities"][1]["label"], "GPE");
        assert_eq!(value[0]["entities"][1]["start"], 13);
    }

    #[test]
    fn test_json_without_title() {
        let doc = document();
        let json = render_json(&[(None, &doc)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0].get("title").is_none());
        assert_eq!(value[0]["text"], "Apple buys a U.K. startup");
    }
}
