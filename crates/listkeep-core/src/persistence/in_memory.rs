use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::{CoreError, CoreErrorKind};
use crate::persistence::{KeyValueStore, PersistenceResult};

#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key`, e.g. with data written by an earlier session.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.lock_entries().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> PersistenceResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| CoreError {
            kind: CoreErrorKind::Internal,
            message: "key-value store mutex poisoned".to_string(),
        })
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.lock_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.lock_entries()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        self.lock_entries()?.remove(key);
        Ok(())
    }
}
