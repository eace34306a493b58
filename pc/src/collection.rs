//! Ordered, append-only collection of prompts the learner activated

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::CollectedPrompt;

/// Prompts collected during a session, in activation order.
///
/// Identity is `(slide, label)`; inserting an identity that is already present
/// leaves the collection untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptCollection {
    prompts: Vec<CollectedPrompt>,
}

impl PromptCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record unless one with the same identity exists.
    /// Returns true if the record was inserted.
    pub fn add(&mut self, record: CollectedPrompt) -> bool {
        if self.contains(record.slide, &record.label) {
            debug!(slide = record.slide, label = %record.label, "PromptCollection::add: already present");
            return false;
        }
        debug!(slide = record.slide, label = %record.label, "PromptCollection::add: inserted");
        self.prompts.push(record);
        true
    }

    pub fn contains(&self, slide: u32, label: &str) -> bool {
        self.prompts.iter().any(|p| p.is_same(slide, label))
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollectedPrompt> {
        self.prompts.iter()
    }

    pub fn as_slice(&self) -> &[CollectedPrompt] {
        &self.prompts
    }

    /// Drop everything (session reset)
    pub fn clear(&mut self) {
        self.prompts.clear();
    }
}

impl<'a> IntoIterator for &'a PromptCollection {
    type Item = &'a CollectedPrompt;
    type IntoIter = std::slice::Iter<'a, CollectedPrompt>;

    fn into_iter(self) -> Self::IntoIter {
        self.prompts.iter()
    }
}

impl From<Vec<CollectedPrompt>> for PromptCollection {
    fn from(records: Vec<CollectedPrompt>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.add(record);
        }
        collection
    }
}
