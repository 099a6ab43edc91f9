//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module turns a short numeric PIN plus a per-user salt into a 256-bit
//! AES key. The iteration count is the tunable cost parameter.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::rand::RandomSource;
use crate::error::{JournalError, Result};

/// Length of the per-user salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count accepted by [`KdfParams::new`].
pub const MIN_ITERATIONS: u32 = 100_000;

/// Random salt bound to one user's journal.
///
/// Salts are not secret; they are stored in plaintext as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    pub fn from_bytes(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }

    /// Lowercase hex form used in storage.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the stored hex form.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Validation` if the value is not hex or does not
    /// decode to exactly [`SALT_LENGTH`] bytes.
    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = hex::decode(value.trim())
            .map_err(|e| JournalError::Validation(format!("Salt is not valid hex: {}", e)))?;
        let bytes: [u8; SALT_LENGTH] = bytes.try_into().map_err(|v: Vec<u8>| {
            JournalError::Validation(format!(
                "Salt must be {} bytes (got {})",
                SALT_LENGTH,
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

/// Generate a fresh random salt.
///
/// Called exactly once per user, when the PIN is first set.
pub fn generate_salt(rng: &dyn RandomSource) -> Result<Salt> {
    let mut bytes = [0u8; SALT_LENGTH];
    rng.fill(&mut bytes)?;
    Ok(Salt(bytes))
}

/// Key derivation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
}

impl KdfParams {
    /// Create parameters with a custom iteration count.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Validation` if `iterations` is below
    /// [`MIN_ITERATIONS`].
    pub fn new(iterations: u32) -> Result<Self> {
        if iterations < MIN_ITERATIONS {
            return Err(JournalError::Validation(format!(
                "KDF iterations must be at least {} (got {})",
                MIN_ITERATIONS, iterations
            )));
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// A cryptographic key derived from a PIN.
///
/// Key material is zeroized from memory when dropped. There is deliberately
/// no serialization path for this type.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a PIN using PBKDF2-HMAC-SHA256.
///
/// # Security
///
/// - Same PIN + salt + params always produces the same key (deterministic)
/// - Changing the PIN or the salt changes the key unpredictably
/// - Cost scales linearly with `params.iterations()`
///
/// # Examples
///
/// ```
/// use calmspace_core::crypto::{derive_key, KdfParams, Salt};
///
/// let salt = Salt::from_bytes([7u8; 16]);
/// let key = derive_key("204610", &salt, &KdfParams::default()).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(pin: &str, salt: &Salt, params: &KdfParams) -> Result<DerivedKey> {
    if pin.is_empty() {
        return Err(JournalError::InvalidPin("PIN cannot be empty".to_string()));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(
        pin.as_bytes(),
        salt.as_bytes(),
        params.iterations(),
        &mut key_bytes,
    );

    let key = DerivedKey::from_bytes(key_bytes);
    key_bytes.zeroize();
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::rand::OsRandom;

    fn fixed_salt(byte: u8) -> Salt {
        Salt::from_bytes([byte; SALT_LENGTH])
    }

    #[test]
    fn test_key_derivation_deterministic() {
        let salt = fixed_salt(1);
        let params = KdfParams::default();

        let key1 = derive_key("204610", &salt, &params).unwrap();
        let key2 = derive_key("204610", &salt, &params).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let params = KdfParams::default();

        let key1 = derive_key("204610", &fixed_salt(1), &params).unwrap();
        let key2 = derive_key("204610", &fixed_salt(2), &params).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_pin_different_key() {
        let salt = fixed_salt(3);
        let params = KdfParams::default();

        let key1 = derive_key("204610", &salt, &params).unwrap();
        let key2 = derive_key("000000", &salt, &params).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_iterations_change_key() {
        let salt = fixed_salt(4);
        let key1 = derive_key("204610", &salt, &KdfParams::default()).unwrap();
        let key2 = derive_key("204610", &salt, &KdfParams::new(100_001).unwrap()).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_matches_pbkdf2_reference() {
        // Independent computation through the raw primitive
        let salt = fixed_salt(5);
        let mut expected = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(b"204610", salt.as_bytes(), DEFAULT_ITERATIONS, &mut expected);

        let key = derive_key("204610", &salt, &KdfParams::default()).unwrap();
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn test_empty_pin_rejected() {
        let result = derive_key("", &fixed_salt(6), &KdfParams::default());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("PIN cannot be empty"));
    }

    #[test]
    fn test_low_iterations_rejected() {
        let result = KdfParams::new(1_000);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("at least 100000"));
    }

    #[test]
    fn test_generate_salt_length_and_uniqueness() {
        let salt1 = generate_salt(&OsRandom).unwrap();
        let salt2 = generate_salt(&OsRandom).unwrap();
        assert_eq!(salt1.as_bytes().len(), SALT_LENGTH);
        assert_ne!(salt1, salt2);
    }

    #[test]
    fn test_salt_hex_round_trip() {
        let salt = generate_salt(&OsRandom).unwrap();
        let encoded = salt.to_hex();
        assert_eq!(encoded.len(), SALT_LENGTH * 2);
        assert_eq!(Salt::from_hex(&encoded).unwrap(), salt);
    }

    #[test]
    fn test_salt_from_bad_hex() {
        assert!(Salt::from_hex("not-hex").is_err());
        // Valid hex, wrong length
        assert!(Salt::from_hex("abcd").is_err());
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("204610", &fixed_salt(7), &KdfParams::default()).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
