//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{JournalError, Result};
use crate::storage::traits::KeyValueStore;

/// Process-local store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| JournalError::Storage("Memory store poisoned".to_string()))
    }

    /// Remove a key. Used to simulate damaged storage in tests.
    pub fn remove(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock_values()?.remove(key))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock_values().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock_values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock_values()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
