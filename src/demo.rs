//! Built-in example sentences

use crate::entities::{extract, Document};
use crate::error::Result;
use crate::model::ModelHandle;

/// A titled input sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub title: &'static str,
    pub text: &'static str,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        title: "Example 1: Basic NER",
        text: "Apple is looking at buying U.K. startup for $1 billion",
    },
    Example {
        title: "Example 2: News Article",
        text: "Google and Microsoft are competing in the AI market in 2025.",
    },
    Example {
        title: "Example 3: Job Posting",
        text: "We're hiring at Amazon for data scientists in Seattle.",
    },
];

/// Extract every example. Fails on the first error, before any result is returned.
pub fn run(handle: &ModelHandle) -> Result<Vec<(Example, Document)>> {
    EXAMPLES
        .iter()
        .map(|example| extract(handle, example.text).map(|doc| (*example, doc)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NerError;

    #[test]
    fn test_examples_have_unique_titles() {
        let mut titles: Vec<&str> = EXAMPLES.iter().map(|e| e.title).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 3);
    }

    #[test]
    fn test_run_requires_model() {
        assert!(matches!(
            run(&ModelHandle::unloaded()),
            Err(NerError::ModelUnavailable)
        ));
    }
}
