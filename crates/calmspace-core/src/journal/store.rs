//! Decrypted entry list held by an unlocked journal.
//!
//! The store never touches storage itself. Mutations happen in place and
//! return what the caller needs to roll them back if persisting fails.

use crate::error::{JournalError, Result};
use crate::journal::types::JournalEntry;

/// Ordered list of entries, newest first.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    /// Parse the plaintext JSON array stored inside the entries envelope.
    pub fn from_json(plaintext: &str) -> Result<Self> {
        let entries: Vec<JournalEntry> = serde_json::from_str(plaintext)?;
        Ok(Self { entries })
    }

    /// Serialize to the plaintext JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Place `entry` at the front and return a reference to it.
    pub fn prepend(&mut self, entry: JournalEntry) -> &JournalEntry {
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Undo the last [`prepend`](Self::prepend).
    pub fn pop_front(&mut self) -> Option<JournalEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Remove the entry `id`, returning its position and the entry.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::EntryNotFound` if no entry has that id.
    pub fn remove(&mut self, id: &str) -> Result<(usize, JournalEntry)> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| JournalError::EntryNotFound(id.to_string()))?;
        Ok((position, self.entries.remove(position)))
    }

    /// Put a removed entry back where it was.
    pub fn restore(&mut self, position: usize, entry: JournalEntry) {
        let position = position.min(self.entries.len());
        self.entries.insert(position, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::{Mood, NewEntry};
    use chrono::Utc;

    fn entry(content: &str) -> JournalEntry {
        JournalEntry::from_new(NewEntry::new(Mood::Happy, content), Utc::now())
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut store = EntryStore::new();
        let first = entry("first");
        let second = entry("second");
        let (first_id, second_id) = (first.id.clone(), second.id.clone());

        store.prepend(first);
        assert_eq!(store.prepend(second).id, second_id);

        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].id, second_id);
        assert_eq!(store.entries()[1].id, first_id);
    }

    #[test]
    fn test_pop_front_undoes_prepend() {
        let mut store = EntryStore::from_entries(vec![entry("kept")]);
        let kept_id = store.entries()[0].id.clone();

        store.prepend(entry("new"));
        let popped = store.pop_front().unwrap();
        assert_eq!(popped.content, "new");
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].id, kept_id);

        assert!(EntryStore::new().pop_front().is_none());
    }

    #[test]
    fn test_remove_then_restore_keeps_order() {
        let a = entry("a");
        let b = entry("b");
        let c = entry("c");
        let ids: Vec<String> = [&a, &b, &c].iter().map(|e| e.id.clone()).collect();
        let mut store = EntryStore::from_entries(vec![a, b, c]);

        let (position, removed) = store.remove(&ids[1]).unwrap();
        assert_eq!(position, 1);
        assert_eq!(removed.content, "b");
        assert_eq!(store.len(), 2);
        assert!(store.find(&ids[1]).is_none());

        store.restore(position, removed);
        let order: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = EntryStore::new();
        assert!(matches!(
            store.remove("missing"),
            Err(JournalError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let store = EntryStore::from_entries(vec![entry("one"), entry("two")]);
        let parsed = EntryStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(parsed, store);
    }

    #[test]
    fn test_empty_store_serializes_to_empty_array() {
        assert_eq!(EntryStore::new().to_json().unwrap(), "[]");
    }

    #[test]
    fn test_find() {
        let a = entry("a");
        let store = EntryStore::from_entries(vec![a.clone()]);
        assert_eq!(store.find(&a.id), Some(&a));
        assert!(store.find("nope").is_none());
    }
}
