//! PIN verifier envelopes.
//!
//! A verifier is the encryption of a fixed marker string under the derived
//! key. Decrypting it back to the marker proves a later PIN reproduces the
//! same key, without the PIN or key ever being stored.

use crate::crypto::envelope::{decrypt, encrypt, Envelope};
use crate::crypto::key::DerivedKey;
use crate::crypto::rand::RandomSource;
use crate::error::Result;

/// Known plaintext sealed inside every verifier.
pub const VERIFICATION_MARKER: &str = "calmspace-verification";

/// Create a verifier envelope for `key`.
pub fn make_verifier(key: &DerivedKey, rng: &dyn RandomSource) -> Result<Envelope> {
    encrypt(VERIFICATION_MARKER, key, rng)
}

/// Check whether `key` opens `envelope` to the verification marker.
///
/// Any failure, whether a bad tag, malformed envelope or unexpected
/// plaintext, yields `false` with no further detail.
pub fn check_verifier(envelope: &Envelope, key: &DerivedKey) -> bool {
    match decrypt(envelope, key) {
        Ok(plaintext) => plaintext == VERIFICATION_MARKER,
        Err(err) => {
            tracing::debug!(error = %err, "verifier did not open");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::rand::OsRandom;

    #[test]
    fn test_verifier_accepts_same_key() {
        let key = DerivedKey::from_bytes([1u8; 32]);
        let verifier = make_verifier(&key, &OsRandom).unwrap();
        assert!(check_verifier(&verifier, &key));
    }

    #[test]
    fn test_verifier_rejects_other_key() {
        let key1 = DerivedKey::from_bytes([1u8; 32]);
        let key2 = DerivedKey::from_bytes([2u8; 32]);
        let verifier = make_verifier(&key1, &OsRandom).unwrap();
        assert!(!check_verifier(&verifier, &key2));
    }

    #[test]
    fn test_verifier_rejects_other_plaintext() {
        let key = DerivedKey::from_bytes([3u8; 32]);
        let not_a_verifier = encrypt("something else", &key, &OsRandom).unwrap();
        assert!(!check_verifier(&not_a_verifier, &key));
    }

    #[test]
    fn test_verifier_rejects_garbage() {
        let key = DerivedKey::from_bytes([4u8; 32]);
        let garbage = Envelope {
            iv: "nothex".to_string(),
            cipher_text: String::new(),
        };
        assert!(!check_verifier(&garbage, &key));
    }
}
