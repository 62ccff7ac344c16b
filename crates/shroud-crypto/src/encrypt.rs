//! Envelope production utility.
//!
//! Counterpart of [`decrypt`](crate::decrypt): tooling that prepares
//! payloads for delivery uses this to emit the `salt ‖ iv ‖ ct+tag`
//! envelope in its base64 transport form.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;

use crate::{
    derive_key,
    envelope::{Envelope, IV_LEN, SALT_LEN},
    error::{CryptoError, CryptoResult},
};

/// Encrypt `plaintext` under a fresh random salt and iv, returning the
/// base64 transport string.
pub async fn encrypt(plaintext: &str, password: &str) -> CryptoResult<String> {
    let plaintext = plaintext.to_string();
    let password = password.to_string();
    let envelope = tokio::task::spawn_blocking(move || seal(&plaintext, &password))
        .await
        .map_err(|e| CryptoError::Task(e.to_string()))??;
    Ok(envelope.to_base64())
}

pub(crate) fn seal(plaintext: &str, password: &str) -> CryptoResult<Envelope> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::AuthFailed)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|_| CryptoError::AuthFailed)?;

    Ok(Envelope {
        salt,
        iv,
        ciphertext,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decrypt::open;

    #[test]
    fn fresh_salt_and_iv_per_envelope() {
        let a = seal("same input", "same password").unwrap();
        let b = seal("same input", "same password").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[tokio::test]
    async fn transport_string_roundtrips() {
        let wire = encrypt("deliverable", "pw").await.unwrap();
        let env = Envelope::from_base64(&wire).unwrap();
        assert_eq!(open(&env, "pw").unwrap(), "deliverable");
    }
}
