//! Error types for CalmSpace core operations.
//!
//! Errors are descriptive at the core level; the lock state machine converts
//! unlock failures into a uniform outcome and the CLI maps the rest to
//! user-friendly messages.

use thiserror::Error;

/// Result type alias for journal operations.
pub type Result<T> = std::result::Result<T, JournalError>;

/// Core error type for journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Authentication tag did not verify, or the envelope could not be parsed
    #[error("Decryption failed. Invalid PIN or corrupted data.")]
    Decryption,

    /// A persisted value was missing or unparseable when it was expected
    #[error("Journal storage is damaged: {0}")]
    StorageFault(String),

    /// PIN confirmation did not match during setup
    #[error("PINs do not match. Please try again.")]
    SetupMismatch,

    /// PIN does not have the required shape
    #[error("Invalid PIN: {0}")]
    InvalidPin(String),

    /// Operation not allowed in the current lock state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Entry not found by ID
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Encryption or key derivation error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        JournalError::Storage(err.to_string())
    }
}
