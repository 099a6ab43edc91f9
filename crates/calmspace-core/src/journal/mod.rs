//! Journal entries and the lock state machine that guards them.

pub mod lock;
pub mod shared;
pub mod store;
pub mod types;
pub mod validation;

pub use lock::{Journal, LockState, UnlockOutcome};
pub use shared::SharedJournal;
pub use store::EntryStore;
pub use types::{EntryStatus, JournalEntry, Mood, NewEntry, UserId};
pub use validation::{parse_tags, validate_new_entry, MAX_TAGS, MAX_TAG_LENGTH};
