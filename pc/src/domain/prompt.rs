//! Prompt definitions loaded from the static prompt resource

use serde::{Deserialize, Serialize};

/// Kind of prompt attached to a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// The single slide-wide prompt
    Master,
    /// A per-topic prompt; anything that is not `master` lands here
    #[default]
    #[serde(other)]
    Specialized,
}

/// Region of a slide image, in percent of its width/height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A templated prompt tied to one slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Slide number (1-based)
    pub slide: u32,

    /// Master or specialized
    #[serde(rename = "type", default)]
    pub kind: PromptKind,

    /// Short label shown on the hotspot
    pub label: String,

    /// Raw template text with learner placeholders
    pub prompt: String,

    /// Where the hotspot sits on the slide image
    #[serde(default)]
    pub hotspot: Option<Hotspot>,
}

impl PromptDefinition {
    pub fn is_master(&self) -> bool {
        self.kind == PromptKind::Master
    }
}
