//! Cryptographic operations for the CalmSpace journal.
//!
//! This module provides key derivation and authenticated encryption using
//! well-audited RustCrypto libraries:
//! - **PBKDF2-HMAC-SHA256**: PIN-based key derivation (>= 100,000 iterations)
//! - **AES-256-GCM**: Authenticated encryption of journal payloads
//!
//! ## Security Model
//!
//! - The PIN and the derived key are never persisted
//! - A verifier envelope proves PIN correctness without revealing anything
//! - Every encryption uses a fresh random 96-bit nonce
//! - Key material is zeroized from memory on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Reading the local store without the PIN
//! - Tampering with stored ciphertext (detected by the AEAD tag)
//!
//! We do NOT defend against:
//! - Offline brute force of the 6-digit PIN space given the salt and verifier
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory

pub mod envelope;
pub mod key;
pub mod pin;
pub mod rand;
pub mod verifier;

pub use envelope::{decrypt, encrypt, Envelope, NONCE_LENGTH};
pub use key::{derive_key, generate_salt, DerivedKey, KdfParams, Salt, SALT_LENGTH};
pub use pin::{validate_pin, PIN_LENGTH};
pub use rand::{OsRandom, RandomSource};
pub use verifier::{check_verifier, make_verifier, VERIFICATION_MARKER};
