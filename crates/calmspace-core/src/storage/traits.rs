//! Key-value storage trait definition.
//!
//! The `KeyValueStore` trait is the only persistence interface the journal
//! depends on. It is deliberately as small as browser local storage so any
//! backend (SQLite, in-memory, a remote blob store) can sit behind it.

use std::sync::Arc;

use crate::error::Result;

/// String key-value storage.
///
/// Implementations must ensure:
/// - `set` replaces any existing value for the key
/// - A successful `set` is visible to every later `get` on the same store
/// - Failures are reported, never silently dropped
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(value))` if present, `Ok(None)` if not.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Storage` (or a backend-specific variant) if the
    /// write could not be made durable.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn KeyValueStore) {}
    }

    #[test]
    fn test_arc_delegates() {
        let store = Arc::new(MemoryStore::new());
        let handle = Arc::clone(&store);
        handle.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
