//! Gazetteer and pattern based NER model

use super::{Analyzer, RawSpan};
use crate::error::Result;
use crate::patterns::{Candidate, ModelDefinition, RuleKind, RuleSet};
use std::collections::BTreeMap;

/// Deterministic NER model compiled from a `ModelDefinition`
#[derive(Debug, Clone)]
pub struct RuleModel {
    name: String,
    version: String,
    rules: RuleSet,
}

impl RuleModel {
    pub fn from_definition(definition: &ModelDefinition) -> Result<Self> {
        let rules = RuleSet::from_definition(definition)?;
        Ok(Self {
            name: definition.meta.name.clone(),
            version: definition.meta.version.clone(),
            rules,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rule_count(&self) -> usize {
        self.rules.rules.len()
    }

    pub fn gazetteer_count(&self) -> usize {
        self.rules.count(RuleKind::Gazetteer)
    }

    pub fn pattern_count(&self) -> usize {
        self.rules.count(RuleKind::Pattern)
    }
}

impl Analyzer for RuleModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> Vec<String> {
        self.rules.labels()
    }

    fn analyze(&self, text: &str) -> Result<Vec<RawSpan>> {
        let spans = resolve_overlaps(self.rules.candidates(text))
            .into_iter()
            .map(|c| RawSpan::new(c.start, c.end, c.label, &text[c.start..c.end]))
            .collect();
        Ok(spans)
    }
}

/// Keep a non-overlapping subset of candidates.
///
/// Longer spans win, then higher priority, then the earlier start, then the
/// earlier rule. Survivors are returned in start order.
pub(crate) fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then(b.priority.cmp(&a.priority))
            .then(a.start.cmp(&b.start))
            .then(a.rule.cmp(&b.rule))
    });

    // Kept spans are disjoint, so ordering by start also orders by end and
    // only the last kept span starting before `candidate.end` can overlap.
    let mut kept: BTreeMap<usize, Candidate> = BTreeMap::new();
    for candidate in candidates {
        let blocked = kept
            .range(..candidate.end)
            .next_back()
            .is_some_and(|(_, k)| k.end > candidate.start);
        if !blocked {
            kept.insert(candidate.start, candidate);
        }
    }

    kept.into_values().collect()
}
