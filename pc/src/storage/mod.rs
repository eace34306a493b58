//! Key-value persistence for session state
//!
//! Two lifetimes: [`Scope::Durable`] survives restarts and holds the intake
//! profile; [`Scope::Session`] holds the current slide, collected prompts and
//! notes and is cleared when the session ends.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Lifetime of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Survives restarts
    Durable,
    /// Cleared at session end
    Session,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Durable => write!(f, "durable"),
            Self::Session => write!(f, "session"),
        }
    }
}

/// String key-value store with scoped lifetimes
pub trait KeyValueStore {
    /// Read a value, `None` if absent
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    fn remove(&mut self, scope: Scope, key: &str) -> Result<()>;

    /// Remove every value in a scope
    fn clear(&mut self, scope: Scope) -> Result<()>;
}

/// Read and deserialize a JSON value
pub fn load_json<T, S>(store: &S, scope: Scope, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(scope, key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value
pub fn save_json<T, S>(store: &mut S, scope: Scope, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(scope, key, &raw)
}

/// Namespaced keys for the companion's state containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}-{}", self.prefix, suffix)
    }

    /// Learner profile (durable)
    pub fn intake(&self) -> String {
        self.key("intake")
    }

    /// Collected prompts (session)
    pub fn collected(&self) -> String {
        self.key("collected")
    }

    /// Current slide number (session)
    pub fn current_slide(&self) -> String {
        self.key("current-slide")
    }

    /// Custom notes (session)
    pub fn custom_notes(&self) -> String {
        self.key("custom-notes")
    }
}
