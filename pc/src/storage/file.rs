//! File-backed store
//!
//! ```text
//! <data_dir>/
//! ├── durable/
//! │   └── companion-intake
//! └── session/
//!     ├── companion-collected
//!     ├── companion-current-slide
//!     └── companion-custom-notes
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, Scope};
use crate::error::{CompanionError, Result};

/// One file per key, one directory per scope
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "Opened file store");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn scope_dir(&self, scope: Scope) -> PathBuf {
        self.base_path.join(scope.to_string())
    }

    fn key_path(&self, scope: Scope, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();
        self.scope_dir(scope).join(file_name)
    }
}

fn storage_error(key: &str, source: std::io::Error) -> CompanionError {
    CompanionError::Storage {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(scope, key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(key, e)),
        }
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(self.scope_dir(scope)).map_err(|e| storage_error(key, e))?;

        // Write then rename so readers never observe a partial value
        let path = self.key_path(scope, key);
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, value).map_err(|e| storage_error(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_error(key, e))?;

        debug!(%scope, key, bytes = value.len(), "FileStore::set");
        Ok(())
    }

    fn remove(&mut self, scope: Scope, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(scope, key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(key, e)),
        }
    }

    fn clear(&mut self, scope: Scope) -> Result<()> {
        let dir = self.scope_dir(scope);
        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|e| storage_error(&scope.to_string(), e))?;
            debug!(%scope, "FileStore::clear");
        }
        Ok(())
    }
}
