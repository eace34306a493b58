//! Learner profile captured at intake

use serde::{Deserialize, Serialize};

use crate::error::{CompanionError, Result};

/// Who the learner is. Captured once at intake and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,

    /// Role or profession
    #[serde(default)]
    pub profession: String,

    /// What the learner is curious about
    #[serde(default)]
    pub curiosity: String,
}

impl LearnerProfile {
    /// Create a new profile
    pub fn new(name: Option<String>, profession: impl Into<String>, curiosity: impl Into<String>) -> Self {
        Self {
            name,
            profession: profession.into(),
            curiosity: curiosity.into(),
        }
    }

    /// The learner's name, treating a blank name as absent
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Presence check performed by the intake step
    pub fn validate(&self) -> Result<()> {
        if self.profession.trim().is_empty() {
            return Err(CompanionError::IncompleteIntake { field: "profession" });
        }
        if self.curiosity.trim().is_empty() {
            return Err(CompanionError::IncompleteIntake { field: "curiosity" });
        }
        Ok(())
    }
}
