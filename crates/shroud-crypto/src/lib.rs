#![forbid(unsafe_code)]

//! Authenticated payload decryption for shroud.
//!
//! Wire format: `salt(16) ‖ iv(12) ‖ ciphertext+tag`, transported as
//! standard base64. The key is derived from a caller password with
//! PBKDF2-HMAC-SHA256 (100 000 iterations); decryption is AES-256-GCM and
//! fails closed: a wrong password or tampered ciphertext never yields
//! partial plaintext.
//!
//! The matching [`encrypt`] utility produces envelopes this module accepts.

mod decrypt;
mod encrypt;
mod envelope;
mod error;

pub use crate::{
    decrypt::decrypt,
    encrypt::encrypt,
    envelope::{Envelope, IV_LEN, MIN_ENVELOPE_LEN, SALT_LEN},
    error::{CryptoError, CryptoResult},
};

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

pub(crate) fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}
