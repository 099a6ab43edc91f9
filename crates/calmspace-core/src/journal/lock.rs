//! Journal lock state machine.
//!
//! A [`Journal`] moves between four states:
//!
//! ```text
//! NoPinSet --begin_pin_setup--> SettingPin --complete_pin_setup--> Unlocked
//!    ^                              |                                 |  ^
//!    +-------cancel_pin_setup-------+                            lock |  | unlock
//!                                                                     v  |
//!                                                                    Locked
//! ```
//!
//! The derived key and the decrypted entries exist only while `Unlocked`.
//! Every mutation in that state is written through to storage as a freshly
//! encrypted envelope before it becomes visible in memory.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::crypto::{
    check_verifier, decrypt, derive_key, encrypt, generate_salt, make_verifier, validate_pin,
    DerivedKey, Envelope, KdfParams, OsRandom, RandomSource, Salt,
};
use crate::error::{JournalError, Result};
use crate::journal::store::EntryStore;
use crate::journal::types::{JournalEntry, NewEntry, UserId};
use crate::storage::{KeyValueStore, StorageKeys};

/// Externally visible lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    NoPinSet,
    SettingPin,
    Locked,
    Unlocked,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::NoPinSet => f.write_str("no PIN set"),
            LockState::SettingPin => f.write_str("setting PIN"),
            LockState::Locked => f.write_str("locked"),
            LockState::Unlocked => f.write_str("unlocked"),
        }
    }
}

/// Result of an unlock attempt.
///
/// A wrong PIN, a missing salt and a missing or unreadable verifier all
/// produce `IncorrectPin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    AlreadyUnlocked,
    IncorrectPin,
    /// Another unlock attempt is in flight
    Busy,
}

impl UnlockOutcome {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, UnlockOutcome::Unlocked | UnlockOutcome::AlreadyUnlocked)
    }
}

struct Session {
    key: DerivedKey,
    entries: EntryStore,
}

enum Phase {
    /// Entries kept in memory only until a PIN is chosen
    NoPinSet(EntryStore),
    SettingPin(EntryStore),
    Locked,
    Unlocked(Session),
}

/// Salt and verifier read from storage ahead of key derivation.
pub(crate) struct UnlockMaterial {
    pub(crate) salt: Salt,
    pub(crate) verifier: Envelope,
}

pub(crate) enum UnlockStep {
    Done(UnlockOutcome),
    Derive(UnlockMaterial),
}

/// One user's journal over a key-value store.
pub struct Journal<S: KeyValueStore> {
    store: S,
    user: UserId,
    keys: StorageKeys,
    params: KdfParams,
    rng: Box<dyn RandomSource>,
    phase: Phase,
}

impl<S: KeyValueStore> Journal<S> {
    /// Open a user's journal with default KDF parameters and the OS CSPRNG.
    pub fn open(store: S, user: UserId) -> Result<Self> {
        Self::open_with(store, user, KdfParams::default(), Box::new(OsRandom))
    }

    /// Open a user's journal.
    ///
    /// The journal starts `Locked` when a salt is stored for the user and
    /// `NoPinSet` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend cannot be read.
    pub fn open_with(
        store: S,
        user: UserId,
        params: KdfParams,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        let keys = StorageKeys::for_user(&user);
        let phase = if store.get(&keys.salt)?.is_some() {
            Phase::Locked
        } else {
            Phase::NoPinSet(EntryStore::new())
        };

        let journal = Self {
            store,
            user,
            keys,
            params,
            rng,
            phase,
        };
        debug!(user = %journal.user, state = %journal.state(), "opened journal");
        Ok(journal)
    }

    pub fn state(&self) -> LockState {
        match self.phase {
            Phase::NoPinSet(_) => LockState::NoPinSet,
            Phase::SettingPin(_) => LockState::SettingPin,
            Phase::Locked => LockState::Locked,
            Phase::Unlocked(_) => LockState::Unlocked,
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn kdf_params(&self) -> KdfParams {
        self.params
    }

    /// Whether a PIN has been set for this journal.
    pub fn has_pin(&self) -> bool {
        matches!(self.phase, Phase::Locked | Phase::Unlocked(_))
    }

    /// Move from `NoPinSet` to `SettingPin`.
    ///
    /// Calling this while already in `SettingPin` is a no-op.
    pub fn begin_pin_setup(&mut self) -> Result<()> {
        let entries = match &mut self.phase {
            Phase::NoPinSet(entries) => std::mem::take(entries),
            Phase::SettingPin(_) => return Ok(()),
            _ => {
                return Err(JournalError::InvalidState(
                    "A PIN is already set for this journal".to_string(),
                ))
            }
        };
        self.phase = Phase::SettingPin(entries);
        Ok(())
    }

    /// Abandon PIN setup and return to `NoPinSet`.
    pub fn cancel_pin_setup(&mut self) -> Result<()> {
        let entries = match &mut self.phase {
            Phase::SettingPin(entries) => std::mem::take(entries),
            Phase::NoPinSet(_) => return Ok(()),
            _ => {
                return Err(JournalError::InvalidState(
                    "PIN setup is not in progress".to_string(),
                ))
            }
        };
        self.phase = Phase::NoPinSet(entries);
        Ok(())
    }

    /// Finish PIN setup with the chosen PIN and its confirmation.
    ///
    /// On success a fresh salt and verifier are persisted along with any
    /// entries written before the PIN existed, and the journal is `Unlocked`.
    /// The salt is written last, so a failed setup leaves the journal
    /// without a PIN on the next open.
    ///
    /// # Errors
    ///
    /// - `JournalError::InvalidState` outside `SettingPin`
    /// - `JournalError::InvalidPin` if the PIN is not 6 digits
    /// - `JournalError::SetupMismatch` if the confirmation differs; the
    ///   journal stays in `SettingPin`
    /// - storage errors if any write fails; the journal stays in `SettingPin`
    pub fn complete_pin_setup(&mut self, pin: &str, confirmation: &str) -> Result<()> {
        let carried = match &self.phase {
            Phase::SettingPin(entries) => entries,
            _ => {
                return Err(JournalError::InvalidState(
                    "PIN setup has not been started".to_string(),
                ))
            }
        };

        validate_pin(pin)?;
        if pin != confirmation {
            return Err(JournalError::SetupMismatch);
        }

        let salt = generate_salt(self.rng.as_ref())?;
        let key = derive_key(pin, &salt, &self.params)?;
        let verifier = make_verifier(&key, self.rng.as_ref())?;
        let sealed = seal_entries(carried, &key, self.rng.as_ref())?;

        self.store.set(&self.keys.verifier, &verifier.to_json()?)?;
        self.store.set(&self.keys.entries, &sealed.to_json()?)?;
        self.store.set(&self.keys.salt, &salt.to_hex())?;

        let entries = match &mut self.phase {
            Phase::SettingPin(entries) => std::mem::take(entries),
            _ => EntryStore::new(),
        };
        info!(user = %self.user, entries = entries.len(), "PIN set, journal unlocked");
        self.phase = Phase::Unlocked(Session { key, entries });
        Ok(())
    }

    /// Try to unlock with a candidate PIN.
    ///
    /// # Errors
    ///
    /// - `JournalError::InvalidState` if no PIN has been set
    /// - `JournalError::InvalidPin` if the candidate is not 6 digits
    /// - `JournalError::StorageFault` if the PIN was correct but the stored
    ///   entries could not be decrypted; the journal stays `Locked`
    pub fn unlock(&mut self, pin: &str) -> Result<UnlockOutcome> {
        match self.prepare_unlock(pin)? {
            UnlockStep::Done(outcome) => Ok(outcome),
            UnlockStep::Derive(material) => {
                let key = material.derive(pin, &self.params);
                self.finish_unlock(key, &material)
            }
        }
    }

    /// State checks and storage reads that precede key derivation.
    pub(crate) fn prepare_unlock(&self, pin: &str) -> Result<UnlockStep> {
        match self.phase {
            Phase::Unlocked(_) => return Ok(UnlockStep::Done(UnlockOutcome::AlreadyUnlocked)),
            Phase::NoPinSet(_) | Phase::SettingPin(_) => {
                return Err(JournalError::InvalidState(
                    "No PIN has been set for this journal".to_string(),
                ))
            }
            Phase::Locked => {}
        }

        validate_pin(pin)?;

        match self.read_unlock_material() {
            Some(material) => Ok(UnlockStep::Derive(material)),
            None => Ok(UnlockStep::Done(UnlockOutcome::IncorrectPin)),
        }
    }

    /// Check a derived key against the verifier and load the entries.
    pub(crate) fn finish_unlock(
        &mut self,
        key: Option<DerivedKey>,
        material: &UnlockMaterial,
    ) -> Result<UnlockOutcome> {
        match self.phase {
            Phase::Locked => {}
            Phase::Unlocked(_) => return Ok(UnlockOutcome::AlreadyUnlocked),
            _ => {
                return Err(JournalError::InvalidState(
                    "No PIN has been set for this journal".to_string(),
                ))
            }
        }

        let key = match key {
            Some(key) if check_verifier(&material.verifier, &key) => key,
            _ => {
                info!(user = %self.user, "unlock rejected");
                return Ok(UnlockOutcome::IncorrectPin);
            }
        };

        let entries = self.load_entries(&key)?;
        info!(user = %self.user, entries = entries.len(), "journal unlocked");
        self.phase = Phase::Unlocked(Session { key, entries });
        Ok(UnlockOutcome::Unlocked)
    }

    fn read_unlock_material(&self) -> Option<UnlockMaterial> {
        let salt = match self.store.get(&self.keys.salt) {
            Ok(Some(hex)) => match Salt::from_hex(&hex) {
                Ok(salt) => salt,
                Err(err) => {
                    debug!(error = %err, "stored salt is unreadable");
                    return None;
                }
            },
            Ok(None) => {
                debug!("stored salt is missing");
                return None;
            }
            Err(err) => {
                debug!(error = %err, "failed to read salt");
                return None;
            }
        };

        let verifier = match self.store.get(&self.keys.verifier) {
            Ok(Some(json)) => match Envelope::from_json(&json) {
                Ok(envelope) => envelope,
                Err(err) => {
                    debug!(error = %err, "stored verifier is unreadable");
                    return None;
                }
            },
            Ok(None) => {
                debug!("stored verifier is missing");
                return None;
            }
            Err(err) => {
                debug!(error = %err, "failed to read verifier");
                return None;
            }
        };

        Some(UnlockMaterial { salt, verifier })
    }

    fn load_entries(&self, key: &DerivedKey) -> Result<EntryStore> {
        let Some(raw) = self.store.get(&self.keys.entries)? else {
            return Ok(EntryStore::new());
        };

        let envelope = Envelope::from_json(&raw).map_err(|err| {
            warn!(user = %self.user, error = %err, "entries envelope is unreadable");
            JournalError::StorageFault("stored entries envelope is unreadable".to_string())
        })?;

        let mut plaintext = decrypt(&envelope, key).map_err(|_| {
            warn!(user = %self.user, "entries failed to decrypt with a verified key");
            JournalError::StorageFault("stored entries could not be decrypted".to_string())
        })?;

        let parsed = EntryStore::from_json(&plaintext);
        plaintext.zeroize();
        parsed.map_err(|err| {
            warn!(user = %self.user, error = %err, "decrypted entries are not valid");
            JournalError::StorageFault("stored entries are not a valid entry list".to_string())
        })
    }

    /// Discard the key and decrypted entries.
    ///
    /// Returns `true` if the journal was unlocked. In any other state this is
    /// a no-op.
    pub fn lock(&mut self) -> bool {
        if !matches!(self.phase, Phase::Unlocked(_)) {
            return false;
        }
        self.phase = Phase::Locked;
        info!(user = %self.user, "journal locked");
        true
    }

    /// Entries, newest first.
    ///
    /// Available while unlocked and, for unsaved entries, before a PIN is set.
    pub fn entries(&self) -> Result<&[JournalEntry]> {
        match &self.phase {
            Phase::NoPinSet(entries) => Ok(entries.entries()),
            Phase::Unlocked(session) => Ok(session.entries.entries()),
            _ => Err(locked()),
        }
    }

    /// Look up a single entry by id.
    pub fn entry(&self, id: &str) -> Result<&JournalEntry> {
        self.entries()?
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| JournalError::EntryNotFound(id.to_string()))
    }

    /// Add an entry at the front of the list.
    ///
    /// While unlocked the whole list is re-encrypted and persisted; if the
    /// write fails the entry is taken back out. Before a PIN is set the
    /// entry is held in memory only.
    pub fn add_entry(&mut self, new_entry: NewEntry) -> Result<JournalEntry> {
        new_entry.validate()?;
        let entry = JournalEntry::from_new(new_entry, Utc::now());

        let added = match &mut self.phase {
            Phase::NoPinSet(entries) => entries.prepend(entry).clone(),
            Phase::Unlocked(session) => {
                session.entries.prepend(entry);
                if let Err(err) = persist_entries(
                    &self.store,
                    &self.keys.entries,
                    &session.key,
                    &session.entries,
                    self.rng.as_ref(),
                ) {
                    session.entries.pop_front();
                    return Err(err);
                }
                session.entries.entries()[0].clone()
            }
            _ => return Err(locked()),
        };

        debug!(user = %self.user, id = %added.id, "entry added");
        Ok(added)
    }

    /// Remove the entry with the given id, restoring it if the write fails.
    pub fn delete_entry(&mut self, id: &str) -> Result<JournalEntry> {
        let removed = match &mut self.phase {
            Phase::NoPinSet(entries) => entries.remove(id)?.1,
            Phase::Unlocked(session) => {
                let (position, removed) = session.entries.remove(id)?;
                if let Err(err) = persist_entries(
                    &self.store,
                    &self.keys.entries,
                    &session.key,
                    &session.entries,
                    self.rng.as_ref(),
                ) {
                    session.entries.restore(position, removed);
                    return Err(err);
                }
                removed
            }
            _ => return Err(locked()),
        };

        debug!(user = %self.user, id = %removed.id, "entry deleted");
        Ok(removed)
    }
}

impl<S: KeyValueStore> fmt::Debug for Journal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("user", &self.user)
            .field("state", &self.state())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl UnlockMaterial {
    /// Derive the candidate key. Derivation failures count as a wrong PIN.
    pub(crate) fn derive(&self, pin: &str, params: &KdfParams) -> Option<DerivedKey> {
        match derive_key(pin, &self.salt, params) {
            Ok(key) => Some(key),
            Err(err) => {
                debug!(error = %err, "key derivation failed");
                None
            }
        }
    }
}

fn locked() -> JournalError {
    JournalError::InvalidState("Journal is locked".to_string())
}

fn seal_entries(
    entries: &EntryStore,
    key: &DerivedKey,
    rng: &dyn RandomSource,
) -> Result<Envelope> {
    let mut plaintext = entries.to_json()?;
    let sealed = encrypt(&plaintext, key, rng);
    plaintext.zeroize();
    sealed
}

fn persist_entries<S: KeyValueStore>(
    store: &S,
    storage_key: &str,
    key: &DerivedKey,
    entries: &EntryStore,
    rng: &dyn RandomSource,
) -> Result<()> {
    let sealed = seal_entries(entries, key, rng)?;
    store.set(storage_key, &sealed.to_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::Mood;
    use crate::storage::MemoryStore;

    fn journal() -> Journal<MemoryStore> {
        Journal::open(MemoryStore::new(), UserId::new("u1").unwrap()).unwrap()
    }

    #[test]
    fn test_fresh_journal_has_no_pin() {
        let journal = journal();
        assert_eq!(journal.state(), LockState::NoPinSet);
        assert!(!journal.has_pin());
        assert!(journal.entries().unwrap().is_empty());
    }

    #[test]
    fn test_begin_and_cancel_setup() {
        let mut journal = journal();
        journal.begin_pin_setup().unwrap();
        assert_eq!(journal.state(), LockState::SettingPin);
        journal.begin_pin_setup().unwrap();
        assert_eq!(journal.state(), LockState::SettingPin);
        assert!(journal.entries().is_err());

        journal.cancel_pin_setup().unwrap();
        assert_eq!(journal.state(), LockState::NoPinSet);
    }

    #[test]
    fn test_complete_setup_requires_setting_pin() {
        let mut journal = journal();
        assert!(matches!(
            journal.complete_pin_setup("204610", "204610"),
            Err(JournalError::InvalidState(_))
        ));
    }

    #[test]
    fn test_setup_rejects_malformed_pin() {
        let mut journal = journal();
        journal.begin_pin_setup().unwrap();
        assert!(matches!(
            journal.complete_pin_setup("12ab56", "12ab56"),
            Err(JournalError::InvalidPin(_))
        ));
        assert_eq!(journal.state(), LockState::SettingPin);
    }

    #[test]
    fn test_unlock_without_pin_is_invalid() {
        let mut journal = journal();
        assert!(matches!(
            journal.unlock("204610"),
            Err(JournalError::InvalidState(_))
        ));
    }

    #[test]
    fn test_lock_is_noop_without_session() {
        let mut journal = journal();
        assert!(!journal.lock());
        assert_eq!(journal.state(), LockState::NoPinSet);
    }

    #[test]
    fn test_entries_before_pin_stay_in_memory() {
        let mut journal = journal();
        journal
            .add_entry(NewEntry::new(Mood::Neutral, "before pin"))
            .unwrap();
        assert_eq!(journal.entries().unwrap().len(), 1);
        assert!(journal.store().is_empty());
    }

    #[test]
    fn test_debug_hides_key() {
        let mut journal = journal();
        journal.begin_pin_setup().unwrap();
        journal.complete_pin_setup("204610", "204610").unwrap();
        let debug = format!("{:?}", journal);
        assert!(debug.contains("Unlocked"));
        assert!(!debug.contains("key:"));
    }
}
