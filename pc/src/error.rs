//! Companion error types

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, CompanionError>;

/// Errors that can occur while running a companion session
#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("No learner intake found; complete the intake step first")]
    MissingIntake,

    #[error("Intake is missing required field: {field}")]
    IncompleteIntake { field: &'static str },

    #[error("Slide {slide} is out of range (1..={total})")]
    SlideOutOfRange { slide: u32, total: u32 },

    #[error("No prompt labelled '{label}' on slide {slide}")]
    UnknownPrompt { slide: u32, label: String },

    #[error("Failed to load presentation config from {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Storage error for key {key}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export to {path}")]
    Download {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompanionError {
    /// Whether the caller should send the learner back to the intake screen
    pub fn needs_intake(&self) -> bool {
        matches!(
            self,
            CompanionError::MissingIntake | CompanionError::IncompleteIntake { .. }
        )
    }
}
