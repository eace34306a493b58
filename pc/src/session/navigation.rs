//! Slide navigation types

use serde::Serialize;

/// Direction of a single navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Result of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Now on this slide
    Moved(u32),
    /// Stepped back from the first slide: go to the intro screen
    LeaveToIntro,
    /// Stepped past the last slide: go to the help screen
    LeaveToHelp,
}

/// One line of the navigation menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavEntry {
    /// Section divider shown before the slide it introduces
    Section { label: String },
    /// A slide link
    Slide { number: u32, title: String, active: bool },
}

impl std::fmt::Display for NavEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Section { label } => write!(f, "{}", label),
            Self::Slide { number, title, .. } => write!(f, "{}. {}", number, title),
        }
    }
}
