//! Per-document entity statistics

use crate::entities::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts of what was found in one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Number of entities extracted
    pub entity_count: usize,
    /// Distinct labels, sorted
    pub labels: Vec<String>,
    /// Entities per label, keyed in label order
    pub label_counts: BTreeMap<String, usize>,
}

impl DocumentSummary {
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut label_counts = BTreeMap::new();
        for entity in entities {
            *label_counts.entry(entity.label.clone()).or_insert(0) += 1;
        }

        let labels: Vec<String> = label_counts.keys().cloned().collect();

        Self {
            entity_count: entities.len(),
            labels,
            label_counts,
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.label_counts.get(label).copied().unwrap_or(0)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
