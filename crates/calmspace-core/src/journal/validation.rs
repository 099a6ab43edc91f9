//! Input validation for new entries.

use crate::error::{JournalError, Result};
use crate::journal::types::NewEntry;

/// Maximum number of tags on one entry.
pub const MAX_TAGS: usize = 100;

/// Maximum length of a single tag, in bytes.
pub const MAX_TAG_LENGTH: usize = 128;

/// Split a comma-separated tag field into trimmed, non-empty tags.
///
/// Order is preserved and duplicates are dropped.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

impl NewEntry {
    /// See [`validate_new_entry`].
    pub fn validate(&self) -> Result<()> {
        validate_new_entry(self)
    }
}

/// Check a new entry before it is stored.
///
/// # Errors
///
/// Returns `JournalError::Validation` if the content is blank, or the tags
/// are too many, too long or blank.
pub fn validate_new_entry(entry: &NewEntry) -> Result<()> {
    if entry.content.trim().is_empty() {
        return Err(JournalError::Validation(
            "Entry content cannot be empty".to_string(),
        ));
    }

    if entry.tags.len() > MAX_TAGS {
        return Err(JournalError::Validation(format!(
            "Too many tags ({}, max {})",
            entry.tags.len(),
            MAX_TAGS
        )));
    }

    for tag in &entry.tags {
        if tag.trim().is_empty() {
            return Err(JournalError::Validation("Tags cannot be empty".to_string()));
        }
        if tag.len() > MAX_TAG_LENGTH {
            return Err(JournalError::Validation(format!(
                "Tag too long ({} bytes, max {})",
                tag.len(),
                MAX_TAG_LENGTH
            )));
        }
    }

    Ok(())
}
