//! Storage abstraction for the journal.
//!
//! The journal persists only strings under well-known keys, mirroring a
//! browser's local storage. Backends implement [`KeyValueStore`]:
//! - [`SqliteStore`]: a single `kv` table in a SQLite file
//! - [`MemoryStore`]: a process-local map, for tests and ephemeral use
//!
//! Storage keys for one user are derived by [`StorageKeys`].

pub mod keys;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use keys::StorageKeys;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;
