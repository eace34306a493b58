//! Companion configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration for the `pc` binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `config.json` and `prompts.json`
    #[serde(rename = "site-dir")]
    pub site_dir: PathBuf,

    /// Directory for persisted session state
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// Directory exports are written to
    #[serde(rename = "export-dir")]
    pub export_dir: PathBuf,

    /// Try the system clipboard before falling back to the terminal
    pub clipboard: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("companion")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            data_dir: default_data_dir(),
            export_dir: PathBuf::from("."),
            clipboard: true,
        }
    }
}

/// Config files tried when no explicit path is given, most specific first
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("companion.yml")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("companion").join("companion.yml"));
    }
    paths
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must load. Otherwise `./companion.yml` and then
    /// `~/.config/companion/companion.yml` are tried; an unreadable candidate
    /// is skipped with a warning and defaults apply when none loads.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for path in candidate_paths().iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping companion config"),
            }
        }

        tracing::info!("No companion config found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read companion config")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse companion config")?;

        tracing::info!(path = %path.display(), site_dir = %config.site_dir.display(), "Loaded companion config");
        Ok(config)
    }
}
