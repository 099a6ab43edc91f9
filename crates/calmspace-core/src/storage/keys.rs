//! Storage key layout for one user's journal.

use crate::journal::UserId;

const SALT_PREFIX: &str = "journal_pin_salt_";
const VERIFIER_PREFIX: &str = "journal_pin_verifier_";
const ENTRIES_PREFIX: &str = "journal_entries_encrypted_";

/// The three storage keys that make up one user's journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Hex salt
    pub salt: String,
    /// Verifier envelope JSON
    pub verifier: String,
    /// Encrypted entries envelope JSON
    pub entries: String,
}

impl StorageKeys {
    pub fn for_user(user: &UserId) -> Self {
        Self {
            salt: format!("{}{}", SALT_PREFIX, user.as_str()),
            verifier: format!("{}{}", VERIFIER_PREFIX, user.as_str()),
            entries: format!("{}{}", ENTRIES_PREFIX, user.as_str()),
        }
    }
}
