//! AES-256-GCM envelope decryption.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use tracing::trace;

use crate::{
    derive_key,
    envelope::Envelope,
    error::{CryptoError, CryptoResult},
};

/// Decrypt an envelope with a password-derived key.
///
/// Runs the PBKDF2 derivation and the GCM open on the blocking pool; at
/// 100 000 iterations the KDF alone is milliseconds of CPU.
///
/// # Errors
///
/// [`CryptoError::AuthFailed`] when the authentication tag does not verify
/// (wrong password, corrupted or tampered ciphertext). No partial or
/// unauthenticated plaintext is ever returned.
pub async fn decrypt(envelope: Envelope, password: &str) -> CryptoResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || open(&envelope, &password))
        .await
        .map_err(|e| CryptoError::Task(e.to_string()))?
}

pub(crate) fn open(envelope: &Envelope, password: &str) -> CryptoResult<String> {
    let key = derive_key(password, &envelope.salt);
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::AuthFailed)?;
    let nonce = Nonce::from_slice(&envelope.iv);

    // aes-gcm reports one opaque error for all failure modes; that is the
    // fail-closed behavior we want.
    let plaintext = cipher
        .decrypt(nonce, envelope.ciphertext.as_ref())
        .map_err(|_| CryptoError::AuthFailed)?;

    trace!(len = plaintext.len(), "envelope opened");
    Ok(String::from_utf8(plaintext)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encrypt::seal;

    #[test]
    fn roundtrip_returns_exact_plaintext() {
        for plaintext in ["", "x", "console.log('hello')", "päyload ✓ 多字节"] {
            let env = seal(plaintext, "passw0rd").unwrap();
            assert_eq!(open(&env, "passw0rd").unwrap(), plaintext);
        }
    }

    #[test]
    fn wrong_password_always_fails_closed() {
        let env = seal("top secret source", "correct horse").unwrap();
        for bad in ["", "correct hors", "correct horsE", "battery staple"] {
            assert!(matches!(
                open(&env, bad).unwrap_err(),
                CryptoError::AuthFailed
            ));
        }
    }

    #[test]
    fn tampered_ciphertext_fails_closed() {
        let mut env = seal("payload", "pw").unwrap();
        let last = env.ciphertext.len() - 1;
        env.ciphertext[last] ^= 0x01;
        assert!(matches!(open(&env, "pw").unwrap_err(), CryptoError::AuthFailed));
    }

    #[test]
    fn tampered_iv_fails_closed() {
        let mut env = seal("payload", "pw").unwrap();
        env.iv[0] ^= 0x01;
        assert!(matches!(open(&env, "pw").unwrap_err(), CryptoError::AuthFailed));
    }

    #[tokio::test]
    async fn async_decrypt_matches_sync_open() {
        let env = seal("payload", "pw").unwrap();
        assert_eq!(decrypt(env, "pw").await.unwrap(), "payload");
    }
}
