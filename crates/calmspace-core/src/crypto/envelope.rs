//! AES-256-GCM envelope encryption.
//!
//! An [`Envelope`] is the unit that crosses the persistence boundary: a
//! random 96-bit nonce and the ciphertext (with its 16-byte tag appended),
//! both hex-encoded. Its JSON form is `{"iv": "...", "cipherText": "..."}`.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use serde::{Deserialize, Serialize};

use crate::crypto::key::DerivedKey;
use crate::crypto::rand::RandomSource;
use crate::error::{JournalError, Result};

/// Nonce length in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// Hex-encoded nonce and ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Hex nonce
    pub iv: String,

    /// Hex ciphertext including the authentication tag
    #[serde(rename = "cipherText")]
    pub cipher_text: String,
}

impl Envelope {
    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the stored JSON form.
    pub fn from_json(value: &str) -> Result<Self> {
        Ok(serde_json::from_str(value)?)
    }
}

fn cipher_for(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| JournalError::Crypto(format!("Invalid key length: {}", e)))
}

/// Encrypt a string under `key` with a fresh random nonce.
///
/// # Examples
///
/// ```
/// use calmspace_core::crypto::{decrypt, derive_key, encrypt, KdfParams, OsRandom, Salt};
///
/// let key = derive_key("204610", &Salt::from_bytes([1u8; 16]), &KdfParams::default()).unwrap();
/// let envelope = encrypt("secret data", &key, &OsRandom).unwrap();
/// assert_eq!(decrypt(&envelope, &key).unwrap(), "secret data");
/// ```
pub fn encrypt(plaintext: &str, key: &DerivedKey, rng: &dyn RandomSource) -> Result<Envelope> {
    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    rng.fill(&mut nonce_bytes)?;

    let cipher = cipher_for(key)?;
    let cipher_text = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|e| JournalError::Crypto(format!("Encryption failed: {}", e)))?;

    Ok(Envelope {
        iv: hex::encode(nonce_bytes),
        cipher_text: hex::encode(cipher_text),
    })
}

/// Decrypt an envelope under `key`.
///
/// # Errors
///
/// Returns `JournalError::Decryption` if:
/// - The nonce or ciphertext is not valid hex
/// - The nonce is not exactly [`NONCE_LENGTH`] bytes
/// - The authentication tag does not verify (wrong key, wrong nonce, tampering)
/// - The plaintext is not UTF-8
pub fn decrypt(envelope: &Envelope, key: &DerivedKey) -> Result<String> {
    let nonce_bytes = hex::decode(&envelope.iv).map_err(|_| JournalError::Decryption)?;
    if nonce_bytes.len() != NONCE_LENGTH {
        return Err(JournalError::Decryption);
    }
    let cipher_text = hex::decode(&envelope.cipher_text).map_err(|_| JournalError::Decryption)?;

    let cipher = cipher_for(key)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), cipher_text.as_slice())
        .map_err(|_| JournalError::Decryption)?;

    String::from_utf8(plaintext).map_err(|_| JournalError::Decryption)
}
