//! # CalmSpace Core
//!
//! Core library for the CalmSpace journal - a PIN-protected personal journal
//! whose entries are encrypted at rest in local storage.
//!
//! This crate provides the key derivation, envelope encryption, lock state
//! machine and entry store, independent of any front-end.
//!
//! ## Architecture
//!
//! - **crypto**: PIN validation, key derivation, AEAD envelopes, verifiers
//! - **storage**: Key-value storage trait, SQLite and in-memory backends
//! - **journal**: Entry model, entry store, lock state machine
//! - **insights**: Streaks, mood trends and tag filtering over entries
//! - **prompts**: Reflective writing prompts

pub mod crypto;
pub mod error;
pub mod insights;
pub mod journal;
pub mod prompts;
pub mod storage;

pub use error::{JournalError, Result};
pub use journal::{Journal, LockState, SharedJournal, UnlockOutcome, UserId};
pub use storage::KeyValueStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
