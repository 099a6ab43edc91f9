//! CSPRNG access.
//!
//! Salts and nonces are drawn through the [`RandomSource`] trait so callers
//! can supply their own generator. [`OsRandom`] uses the `getrandom` crate,
//! which reads from the native OS/platform CSPRNG.

use crate::error::{JournalError, Result};

/// A cryptographically secure random byte generator.
pub trait RandomSource: Send + Sync {
    /// Fill the buffer with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// Random source backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        getrandom::getrandom(buf)
            .map_err(|e| JournalError::Crypto(format!("Random generator failed: {}", e)))
    }
}
