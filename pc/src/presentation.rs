//! Static presentation resources
//!
//! `config.json` describes the deck (titles, sections, export text) and is
//! required. `prompts.json` lists the prompt definitions; if it cannot be read
//! the companion still runs, just without prompts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::PromptDefinition;
use crate::error::{CompanionError, Result};

/// File name of the deck configuration inside the site directory
pub const CONFIG_FILE: &str = "config.json";

/// File name of the prompt definitions inside the site directory
pub const PROMPTS_FILE: &str = "prompts.json";

/// Deck-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationConfig {
    /// Presentation title
    pub title: String,

    /// Number of slides in the deck
    pub total_slides: u32,

    /// Slide titles, index 0 is slide 1
    pub slide_titles: Vec<String>,

    /// Section dividers shown in the navigation menu
    pub sections: Vec<Section>,

    /// Text used by the Markdown export
    pub md_export: MdExport,

    /// Prefix for storage keys
    pub storage_prefix: String,

    /// Prefix for exported file names
    pub download_prefix: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            total_slides: 20,
            slide_titles: Vec::new(),
            sections: Vec::new(),
            md_export: MdExport::default(),
            storage_prefix: "companion".to_string(),
            download_prefix: "prompts".to_string(),
        }
    }
}

impl PresentationConfig {
    /// Load the deck configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CompanionError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| CompanionError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        info!(title = %config.title, total_slides = config.total_slides, "Loaded presentation config");
        Ok(config)
    }

    /// Whether `slide` lies within `1..=total_slides`
    pub fn contains_slide(&self, slide: u32) -> bool {
        (1..=self.total_slides).contains(&slide)
    }

    /// Title of a slide, if the deck defines one
    pub fn slide_title(&self, slide: u32) -> Option<&str> {
        let index = slide.checked_sub(1)? as usize;
        self.slide_titles.get(index).map(String::as_str)
    }

    /// Label of the section that starts at `slide`
    pub fn section_before(&self, slide: u32) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.before_slide == slide)
            .map(|s| s.label.as_str())
    }
}

/// A section divider placed before a slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub before_slide: u32,
    pub label: String,
}

/// Export text blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MdExport {
    /// Heading suffix after the presentation title
    pub header: String,

    /// How the continuation prompt describes the source material
    pub lecture_description: String,

    /// Closing lines, rendered in italics
    pub footer: Vec<String>,
}

impl Default for MdExport {
    fn default() -> Self {
        Self {
            header: "Personal Learning Prompts".to_string(),
            lecture_description: "a presentation covering various topics".to_string(),
            footer: Vec::new(),
        }
    }
}

/// Everything loaded from the site directory before a session starts
#[derive(Debug, Clone)]
pub struct Resources {
    pub config: PresentationConfig,
    pub prompts: Vec<PromptDefinition>,
}

impl Resources {
    /// Load `config.json` (required) and `prompts.json` (optional) from a directory
    pub fn load(site_dir: impl AsRef<Path>) -> Result<Self> {
        let site_dir = site_dir.as_ref();
        let config = PresentationConfig::load(&site_dir.join(CONFIG_FILE))?;
        let prompts = load_prompts(&site_dir.join(PROMPTS_FILE));
        Ok(Self { config, prompts })
    }
}

/// Load prompt definitions, degrading to an empty set on any failure
pub fn load_prompts(path: &Path) -> Vec<PromptDefinition> {
    match try_load_prompts(path) {
        Ok(prompts) => {
            info!(count = prompts.len(), "Loaded prompt definitions");
            prompts
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load prompts, continuing without them");
            Vec::new()
        }
    }
}

fn try_load_prompts(path: &Path) -> Result<Vec<PromptDefinition>> {
    let content = fs::read_to_string(path).map_err(|e| CompanionError::Config {
        path: PathBuf::from(path),
        source: Box::new(e),
    })?;
    Ok(serde_json::from_str(&content)?)
}
