//! In-memory store, used by tests and embedders that persist elsewhere

use std::collections::HashMap;

use super::{KeyValueStore, Scope};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<(Scope, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(&(scope, key.to_string())).cloned())
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()> {
        self.values.insert((scope, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&mut self, scope: Scope, key: &str) -> Result<()> {
        self.values.remove(&(scope, key.to_string()));
        Ok(())
    }

    fn clear(&mut self, scope: Scope) -> Result<()> {
        self.values.retain(|(s, _), _| *s != scope);
        Ok(())
    }
}
