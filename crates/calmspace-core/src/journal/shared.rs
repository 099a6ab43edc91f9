//! Async handle to a journal shared between tasks.
//!
//! Key derivation is deliberately slow, so unlocking runs it on the blocking
//! pool. While one unlock is in flight, further unlock attempts return
//! [`UnlockOutcome::Busy`] instead of queueing. Other calls wait for the
//! journal as usual.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{JournalError, Result};
use crate::journal::lock::{Journal, LockState, UnlockOutcome, UnlockStep};
use crate::storage::KeyValueStore;

/// Cloneable, task-safe wrapper around a [`Journal`].
pub struct SharedJournal<S: KeyValueStore> {
    inner: Arc<Mutex<Journal<S>>>,
    unlocking: Arc<AtomicBool>,
}

/// Clears the in-flight flag when an unlock finishes or is dropped.
struct UnlockInFlight<'a>(&'a AtomicBool);

impl Drop for UnlockInFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: KeyValueStore> Clone for SharedJournal<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            unlocking: Arc::clone(&self.unlocking),
        }
    }
}

impl<S: KeyValueStore> SharedJournal<S> {
    pub fn new(journal: Journal<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(journal)),
            unlocking: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn state(&self) -> LockState {
        self.inner.lock().await.state()
    }

    /// Unlock with a candidate PIN, deriving the key off the async runtime.
    pub async fn unlock(&self, pin: &str) -> Result<UnlockOutcome> {
        if self.unlocking.swap(true, Ordering::AcqRel) {
            debug!("unlock already in progress");
            return Ok(UnlockOutcome::Busy);
        }
        let _in_flight = UnlockInFlight(&self.unlocking);
        let mut journal = self.inner.lock().await;

        let material = match journal.prepare_unlock(pin)? {
            UnlockStep::Done(outcome) => return Ok(outcome),
            UnlockStep::Derive(material) => material,
        };

        let params = journal.kdf_params();
        let pin = Zeroizing::new(pin.to_string());
        let (key, material) = tokio::task::spawn_blocking(move || {
            let key = material.derive(&pin, &params);
            (key, material)
        })
        .await
        .map_err(|err| JournalError::Crypto(format!("Key derivation task failed: {}", err)))?;

        journal.finish_unlock(key, &material)
    }

    /// Lock the journal. Returns `true` if it was unlocked.
    pub async fn lock(&self) -> bool {
        self.inner.lock().await.lock()
    }

    /// Run `f` with exclusive access to the journal.
    pub async fn with<R>(&self, f: impl FnOnce(&mut Journal<S>) -> R) -> R {
        let mut journal = self.inner.lock().await;
        f(&mut journal)
    }

    /// Take the journal back if this is the last handle.
    pub fn into_inner(self) -> std::result::Result<Journal<S>, Self> {
        let unlocking = self.unlocking;
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner, unlocking })
    }
}
