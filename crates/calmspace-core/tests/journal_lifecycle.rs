use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use calmspace_core::crypto::{decrypt, derive_key, Envelope, KdfParams, Salt};
use calmspace_core::journal::{EntryStatus, JournalEntry, Mood, NewEntry};
use calmspace_core::storage::{MemoryStore, SqliteStore, StorageKeys};
use calmspace_core::{Journal, JournalError, KeyValueStore, LockState, UnlockOutcome, UserId};

const PIN: &str = "204610";
const WRONG_PIN: &str = "000000";

fn user() -> UserId {
    UserId::new("mock_user_12345").expect("user id should be valid")
}

fn open(store: Arc<MemoryStore>) -> Journal<Arc<MemoryStore>> {
    Journal::open(store, user()).expect("open should succeed")
}

fn good_day() -> NewEntry {
    NewEntry::new(Mood::Happy, "Good day").with_tags(vec!["gratitude".to_string()])
}

fn set_pin<S: KeyValueStore>(journal: &mut Journal<S>, pin: &str) {
    journal.begin_pin_setup().expect("begin setup should succeed");
    journal
        .complete_pin_setup(pin, pin)
        .expect("complete setup should succeed");
}

/// Store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> calmspace_core::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> calmspace_core::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(JournalError::Storage("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }
}

#[test]
fn test_scenario_a_new_user_has_no_pin() {
    let journal = open(Arc::new(MemoryStore::new()));
    assert_eq!(journal.state(), LockState::NoPinSet);
    assert!(journal.entries().expect("entries should be readable").is_empty());
}

#[test]
fn test_scenario_b_set_pin_persists_salt_and_verifier() {
    let store = Arc::new(MemoryStore::new());
    let mut journal = open(Arc::clone(&store));
    set_pin(&mut journal, PIN);

    assert_eq!(journal.state(), LockState::Unlocked);
    assert!(journal.entries().expect("unlocked").is_empty());

    let keys = StorageKeys::for_user(&user());
    let salt_hex = store.get(&keys.salt).unwrap().expect("salt should be stored");
    assert_eq!(salt_hex.len(), 32);
    let salt = Salt::from_hex(&salt_hex).expect("salt should be hex");

    let verifier_json = store
        .get(&keys.verifier)
        .unwrap()
        .expect("verifier should be stored");
    let verifier = Envelope::from_json(&verifier_json).expect("verifier should parse");
    let key = derive_key(PIN, &salt, &KdfParams::default()).unwrap();
    assert_eq!(
        decrypt(&verifier, &key).expect("verifier should decrypt"),
        "calmspace-verification"
    );
}

#[test]
fn test_scenario_c_relock_and_unlock_restores_entries() {
    let mut journal = open(Arc::new(MemoryStore::new()));
    set_pin(&mut journal, PIN);
    let saved = journal.add_entry(good_day()).expect("add should succeed");

    assert!(journal.lock());
    assert_eq!(journal.state(), LockState::Locked);

    assert_eq!(journal.unlock(PIN).unwrap(), UnlockOutcome::Unlocked);
    assert_eq!(journal.entries().unwrap(), &[saved]);
}

#[test]
fn test_scenario_d_wrong_pin_stays_locked() {
    let mut journal = open(Arc::new(MemoryStore::new()));
    set_pin(&mut journal, PIN);
    journal.add_entry(good_day()).unwrap();
    journal.lock();

    assert_eq!(journal.unlock(WRONG_PIN).unwrap(), UnlockOutcome::IncorrectPin);
    assert_eq!(journal.state(), LockState::Locked);
    assert!(matches!(
        journal.entries(),
        Err(JournalError::InvalidState(_))
    ));
}

#[test]
fn test_scenario_e_entry_survives_reload() {
    let store = Arc::new(MemoryStore::new());
    let saved = {
        let mut journal = open(Arc::clone(&store));
        set_pin(&mut journal, PIN);
        journal.add_entry(good_day()).expect("add should succeed")
    };

    let mut reloaded = open(store);
    assert_eq!(reloaded.state(), LockState::Locked);
    assert_eq!(reloaded.unlock(PIN).unwrap(), UnlockOutcome::Unlocked);

    let entries = reloaded.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, saved.id);
    assert_eq!(entries[0].mood, Mood::Happy);
    assert_eq!(entries[0].content, "Good day");
    assert_eq!(entries[0].tags, vec!["gratitude".to_string()]);
    assert_eq!(entries[0].status, EntryStatus::Complete);
}

#[test]
fn test_lock_and_unlock_are_idempotent() {
    let mut journal = open(Arc::new(MemoryStore::new()));
    set_pin(&mut journal, PIN);
    journal.add_entry(good_day()).unwrap();
    let before: Vec<JournalEntry> = journal.entries().unwrap().to_vec();

    assert_eq!(journal.unlock(PIN).unwrap(), UnlockOutcome::AlreadyUnlocked);
    assert_eq!(journal.unlock(WRONG_PIN).unwrap(), UnlockOutcome::AlreadyUnlocked);
    assert_eq!(journal.entries().unwrap(), before.as_slice());

    assert!(journal.lock());
    assert!(!journal.lock());
    assert_eq!(journal.state(), LockState::Locked);
}

#[test]
fn test_setup_mismatch_keeps_setting_pin() {
    let store = Arc::new(MemoryStore::new());
    let mut journal = open(Arc::clone(&store));
    journal.begin_pin_setup().unwrap();

    let result = journal.complete_pin_setup(PIN, "204611");
    assert!(matches!(result, Err(JournalError::SetupMismatch)));
    assert_eq!(journal.state(), LockState::SettingPin);
    assert!(store.is_empty());

    journal.complete_pin_setup(PIN, PIN).unwrap();
    assert_eq!(journal.state(), LockState::Unlocked);
}

#[test]
fn test_entries_written_before_pin_are_encrypted_at_setup() {
    let store = Arc::new(MemoryStore::new());
    let mut journal = open(Arc::clone(&store));
    let early = journal.add_entry(good_day()).unwrap();
    set_pin(&mut journal, PIN);
    assert_eq!(journal.entries().unwrap(), &[early.clone()]);

    let raw = store
        .get(&StorageKeys::for_user(&user()).entries)
        .unwrap()
        .expect("entries should be stored");
    assert!(!raw.contains("Good day"));

    let mut reloaded = open(store);
    reloaded.unlock(PIN).unwrap();
    assert_eq!(reloaded.entries().unwrap(), &[early]);
}

#[test]
fn test_delete_is_written_through() {
    let store = Arc::new(MemoryStore::new());
    let mut journal = open(Arc::clone(&store));
    set_pin(&mut journal, PIN);
    let first = journal.add_entry(NewEntry::new(Mood::Sad, "first")).unwrap();
    let second = journal.add_entry(good_day()).unwrap();
    assert_eq!(journal.entries().unwrap()[0].id, second.id);

    let removed = journal.delete_entry(&first.id).unwrap();
    assert_eq!(removed.id, first.id);
    assert!(matches!(
        journal.delete_entry(&first.id),
        Err(JournalError::EntryNotFound(_))
    ));

    let mut reloaded = open(store);
    reloaded.unlock(PIN).unwrap();
    assert_eq!(reloaded.entries().unwrap(), &[second]);
}

#[test]
fn test_failed_write_leaves_memory_unchanged() {
    let store = Arc::new(FlakyStore::default());
    let mut journal = Journal::open(Arc::clone(&store), user()).unwrap();
    set_pin(&mut journal, PIN);
    let kept = journal.add_entry(good_day()).unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    let result = journal.add_entry(NewEntry::new(Mood::Neutral, "lost"));
    assert!(matches!(result, Err(JournalError::Storage(_))));
    assert!(journal.delete_entry(&kept.id).is_err());
    assert_eq!(journal.entries().unwrap(), &[kept]);
}

#[test]
fn test_failed_setup_leaves_no_pin() {
    let store = Arc::new(FlakyStore::default());
    store.fail_writes.store(true, Ordering::SeqCst);

    let mut journal = Journal::open(Arc::clone(&store), user()).unwrap();
    journal.begin_pin_setup().unwrap();
    assert!(journal.complete_pin_setup(PIN, PIN).is_err());
    assert_eq!(journal.state(), LockState::SettingPin);

    store.fail_writes.store(false, Ordering::SeqCst);
    let reopened = Journal::open(Arc::clone(&store), user()).unwrap();
    assert_eq!(reopened.state(), LockState::NoPinSet);
}

#[test]
fn test_missing_verifier_is_incorrect_pin() {
    let store = Arc::new(MemoryStore::new());
    {
        let mut journal = open(Arc::clone(&store));
        set_pin(&mut journal, PIN);
    }
    store
        .remove(&StorageKeys::for_user(&user()).verifier)
        .unwrap();

    let mut journal = open(store);
    assert_eq!(journal.state(), LockState::Locked);
    assert_eq!(journal.unlock(PIN).unwrap(), UnlockOutcome::IncorrectPin);
}

#[test]
fn test_corrupt_salt_is_incorrect_pin() {
    let store = Arc::new(MemoryStore::new());
    {
        let mut journal = open(Arc::clone(&store));
        set_pin(&mut journal, PIN);
    }
    store
        .set(&StorageKeys::for_user(&user()).salt, "not-hex")
        .unwrap();

    let mut journal = open(store);
    assert_eq!(journal.unlock(PIN).unwrap(), UnlockOutcome::IncorrectPin);
}

#[test]
fn test_damaged_entries_is_storage_fault() {
    let store = Arc::new(MemoryStore::new());
    let keys = StorageKeys::for_user(&user());
    {
        let mut journal = open(Arc::clone(&store));
        set_pin(&mut journal, PIN);
        journal.add_entry(good_day()).unwrap();
    }

    let raw = store.get(&keys.entries).unwrap().unwrap();
    let mut envelope = Envelope::from_json(&raw).unwrap();
    let mut bytes = hex::decode(&envelope.cipher_text).unwrap();
    bytes[0] ^= 0x01;
    envelope.cipher_text = hex::encode(bytes);
    store.set(&keys.entries, &envelope.to_json().unwrap()).unwrap();

    let mut journal = open(store);
    assert!(matches!(
        journal.unlock(PIN),
        Err(JournalError::StorageFault(_))
    ));
    assert_eq!(journal.state(), LockState::Locked);
}

#[test]
fn test_missing_entries_unlocks_empty() {
    let store = Arc::new(MemoryStore::new());
    let keys = StorageKeys::for_user(&user());
    {
        let mut journal = open(Arc::clone(&store));
        set_pin(&mut journal, PIN);
    }
    store.remove(&keys.entries).unwrap();

    let mut journal = open(store);
    assert_eq!(journal.unlock(PIN).unwrap(), UnlockOutcome::Unlocked);
    assert!(journal.entries().unwrap().is_empty());
}

#[test]
fn test_users_are_isolated() {
    let store = Arc::new(MemoryStore::new());
    let mut alice = Journal::open(Arc::clone(&store), UserId::new("alice").unwrap()).unwrap();
    set_pin(&mut alice, PIN);
    alice.add_entry(good_day()).unwrap();

    let bob = Journal::open(store, UserId::new("bob").unwrap()).unwrap();
    assert_eq!(bob.state(), LockState::NoPinSet);
    assert!(bob.entries().unwrap().is_empty());
}

#[test]
fn test_sqlite_store_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("journal.db");

    let saved = {
        let store = SqliteStore::open(&path).expect("open should succeed");
        let mut journal = Journal::open(store, user()).unwrap();
        set_pin(&mut journal, PIN);
        journal.add_entry(good_day()).unwrap()
    };

    let store = SqliteStore::open(&path).expect("reopen should succeed");
    let mut journal = Journal::open(store, user()).unwrap();
    assert_eq!(journal.state(), LockState::Locked);
    assert_eq!(journal.unlock(WRONG_PIN).unwrap(), UnlockOutcome::IncorrectPin);
    assert_eq!(journal.unlock(PIN).unwrap(), UnlockOutcome::Unlocked);
    assert_eq!(journal.entries().unwrap(), &[saved]);
}

#[test]
fn test_browser_shaped_entries_decrypt() {
    let store = Arc::new(MemoryStore::new());
    let mut journal = open(Arc::clone(&store));
    journal.begin_pin_setup().unwrap();
    journal.complete_pin_setup(PIN, PIN).unwrap();
    journal.lock();

    // Re-seal a hand-written entry list under the same key.
    let keys = StorageKeys::for_user(&user());
    let salt = Salt::from_hex(&store.get(&keys.salt).unwrap().unwrap()).unwrap();
    let key = derive_key(PIN, &salt, &KdfParams::default()).unwrap();
    let plaintext = r#"[{"id":"1722247200000","date":"2024-07-29T10:00:00.000Z","mood":"Happy","content":"Good day","tags":["gratitude"],"status":"complete"}]"#;
    let envelope =
        calmspace_core::crypto::encrypt(plaintext, &key, &calmspace_core::crypto::OsRandom)
            .unwrap();
    store.set(&keys.entries, &envelope.to_json().unwrap()).unwrap();

    assert_eq!(journal.unlock(PIN).unwrap(), UnlockOutcome::Unlocked);
    let entries = journal.entries().unwrap();
    assert_eq!(entries[0].id, "1722247200000");
    assert_eq!(entries[0].tags, vec!["gratitude".to_string()]);
}
