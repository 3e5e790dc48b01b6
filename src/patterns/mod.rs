//! Rule definitions for configuration-driven entity recognition
//!
//! This module provides:
//! - The TOML model definition format (metadata, gazetteers, regex patterns)
//! - Compilation of a definition into a `RuleSet` of pre-compiled regexes
//! - Candidate span discovery over a text, before overlap resolution

use crate::error::{NerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Model metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_version() -> String {
    "0.0.0".to_string()
}

/// Literal term list for a single label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazetteerConfig {
    pub label: String,
    pub terms: Vec<String>,
    #[serde(default)]
    pub case_insensitive: bool,
    #[serde(default)]
    pub priority: i32,
}

/// Regex pattern for a single label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub label: String,
    pub pattern: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub description: String,
}

/// Model definition file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub meta: ModelMeta,
    #[serde(default)]
    pub gazetteer: Vec<GazetteerConfig>,
    #[serde(default)]
    pub pattern: Vec<PatternConfig>,
}

impl ModelDefinition {
    /// Load a model definition from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NerError::Io {
            source: e,
            context: format!("Failed to read model definition: {:?}", path),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a model definition from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Where a compiled rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Gazetteer,
    Pattern,
}

/// Compiled rule with pre-compiled regex
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub label: String,
    pub regex: Regex,
    pub priority: i32,
    pub kind: RuleKind,
}

/// A span proposed by one rule, in byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub priority: i32,
    /// Position of the producing rule in the rule set
    pub rule: usize,
}

impl Candidate {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// All rules of one model, compiled
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile every gazetteer and pattern of a definition
    pub fn from_definition(definition: &ModelDefinition) -> Result<Self> {
        let name = &definition.meta.name;
        let mut rules = Vec::new();

        for gazetteer in &definition.gazetteer {
            check_label(name, &gazetteer.label)?;
            let source = gazetteer_regex(&gazetteer.terms, gazetteer.case_insensitive)
                .ok_or_else(|| {
                    NerError::model_load(
                        name,
                        format!("gazetteer for '{}' has no terms", gazetteer.label),
                    )
                })?;
            let regex = Regex::new(&source).map_err(|e| {
                NerError::model_load(
                    name,
                    format!("invalid gazetteer for '{}': {}", gazetteer.label, e),
                )
            })?;

            rules.push(CompiledRule {
                label: gazetteer.label.clone(),
                regex,
                priority: gazetteer.priority,
                kind: RuleKind::Gazetteer,
            });
        }

        for pattern in &definition.pattern {
            check_label(name, &pattern.label)?;
            let regex = Regex::new(&pattern.pattern).map_err(|e| {
                NerError::model_load(
                    name,
                    format!("invalid pattern for '{}': {}", pattern.label, e),
                )
            })?;

            rules.push(CompiledRule {
                label: pattern.label.clone(),
                regex,
                priority: pattern.priority,
                kind: RuleKind::Pattern,
            });
        }

        if rules.is_empty() {
            return Err(NerError::model_load(name, "definition contains no rules"));
        }

        Ok(Self { rules })
    }

    /// Number of rules compiled from one section of the definition
    pub fn count(&self, kind: RuleKind) -> usize {
        self.rules.iter().filter(|r| r.kind == kind).count()
    }

    /// Distinct labels this rule set can produce, sorted
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.rules.iter().map(|r| r.label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Every non-empty match of every rule, in rule order
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        self.rules
            .iter()
            .enumerate()
            .flat_map(|(idx, rule)| {
                rule.regex
                    .find_iter(text)
                    .filter(|m| !m.is_empty())
                    .map(move |m| Candidate {
                        start: m.start(),
                        end: m.end(),
                        label: rule.label.clone(),
                        priority: rule.priority,
                        rule: idx,
                    })
            })
            .collect()
    }
}

fn check_label(model: &str, label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(NerError::model_load(model, "rule with empty label"));
    }
    Ok(())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build one alternation over all terms, longest first.
///
/// `\b` is only added on a side where the term itself ends in a word
/// character, so terms like `U.K.` still match when followed by a space.
fn gazetteer_regex(terms: &[String], case_insensitive: bool) -> Option<String> {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return None;
    }
    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    terms.dedup();

    let alternatives: Vec<String> = terms
        .iter()
        .map(|term| {
            let mut alt = String::new();
            if term.chars().next().is_some_and(is_word_char) {
                alt.push_str(r"\b");
            }
            alt.push_str(&regex::escape(term));
            if term.chars().last().is_some_and(is_word_char) {
                alt.push_str(r"\b");
            }
            alt
        })
        .collect();

    let flags = if case_insensitive { "(?i)" } else { "" };
    Some(format!("{}(?:{})", flags, alternatives.join("|")))
}
