//! Domain types for the presentation companion
//!
//! Learner profile, prompt definitions loaded from static resources,
//! prompts collected during a session and per-slide free-text notes.

mod collected;
mod notes;
mod profile;
mod prompt;

pub use collected::CollectedPrompt;
pub use notes::CustomNotes;
pub use profile::LearnerProfile;
pub use prompt::{Hotspot, PromptDefinition, PromptKind};
