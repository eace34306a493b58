//! Per-slide free-text notes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Free-text notes keyed by slide number.
///
/// An entry exists only while its text has non-whitespace content. The text
/// itself is stored exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomNotes(BTreeMap<u32, String>);

impl CustomNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the note for a slide. Returns true if a note remains.
    pub fn set(&mut self, slide: u32, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            self.0.remove(&slide);
            false
        } else {
            self.0.insert(slide, text);
            true
        }
    }

    pub fn get(&self, slide: u32) -> Option<&str> {
        self.0.get(&slide).map(String::as_str)
    }

    pub fn contains(&self, slide: u32) -> bool {
        self.0.contains_key(&slide)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Slides with notes, ascending
    pub fn slides(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(slide, text)| (*slide, text.as_str()))
    }
}

impl FromIterator<(u32, String)> for CustomNotes {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        let mut notes = Self::new();
        for (slide, text) in iter {
            notes.set(slide, text);
        }
        notes
    }
}
