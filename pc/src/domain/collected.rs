//! Collected prompt record

use serde::{Deserialize, Serialize};

/// A resolved prompt the learner activated. Label and text are snapshots
/// taken at collection time and are never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedPrompt {
    /// Slide the prompt was collected on
    pub slide: u32,

    /// Slide title at the time of collection
    pub title: String,

    /// Prompt label
    pub label: String,

    /// Fully resolved prompt text
    pub prompt: String,
}

impl CollectedPrompt {
    pub fn new(slide: u32, title: impl Into<String>, label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            slide,
            title: title.into(),
            label: label.into(),
            prompt: prompt.into(),
        }
    }

    /// Identity within a collection
    pub fn is_same(&self, slide: u32, label: &str) -> bool {
        self.slide == slide && self.label == label
    }
}
