//! Delivering an export document as a file

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::LearnerProfile;
use crate::error::{CompanionError, Result};

/// Extension of exported documents
pub const EXPORT_EXTENSION: &str = "md";

/// Name segment used when the learner gave no name
pub const ANONYMOUS_FILE_SEGMENT: &str = "learner";

/// `{prefix}-{name}.md`, with the name lower-cased and whitespace runs
/// collapsed to `-`. Path separators and `..` in the name also become `-`,
/// so the result is always a single file name.
pub fn export_filename(download_prefix: &str, profile: &LearnerProfile) -> String {
    let name_part = profile
        .display_name()
        .map(name_segment)
        .unwrap_or_else(|| ANONYMOUS_FILE_SEGMENT.to_string());
    format!("{}-{}.{}", download_prefix, name_part, EXPORT_EXTENSION)
}

fn name_segment(name: &str) -> String {
    let flat: String = name
        .chars()
        .map(|c| if std::path::is_separator(c) { '-' } else { c })
        .collect();
    flat.replace("..", "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// A generated document ready to hand to a downloader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub body: String,
}

/// Materializes an export somewhere the learner can pick it up
pub trait Downloader {
    /// Deliver the document, returning where it ended up
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Writes exports into a directory
#[derive(Debug, Clone)]
pub struct DirDownloader {
    dir: PathBuf,
}

impl DirDownloader {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl Downloader for DirDownloader {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<PathBuf> {
        let path = self.dir.join(&artifact.filename);
        fs::create_dir_all(&self.dir).map_err(|source| CompanionError::Download {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, &artifact.body).map_err(|source| CompanionError::Download {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = artifact.body.len(), "Export written");
        Ok(path)
    }
}
