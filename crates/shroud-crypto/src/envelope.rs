use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{CryptoError, CryptoResult};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM initialization vector length in bytes.
pub const IV_LEN: usize = 12;

/// Minimum envelope length: salt + iv. (The GCM tag lives inside the
/// ciphertext slice, per AEAD convention.)
pub const MIN_ENVELOPE_LEN: usize = SALT_LEN + IV_LEN;

/// Parsed ciphertext envelope: `salt(16) ‖ iv(12) ‖ ciphertext+tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Split raw bytes into the fixed layout.
    ///
    /// Anything shorter than `salt + iv` is a malformed payload.
    pub fn parse(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() < MIN_ENVELOPE_LEN {
            return Err(CryptoError::MalformedPayload { len: bytes.len() });
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[..SALT_LEN]);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[SALT_LEN..MIN_ENVELOPE_LEN]);

        Ok(Self {
            salt,
            iv,
            ciphertext: bytes[MIN_ENVELOPE_LEN..].to_vec(),
        })
    }

    /// Decode the transport encoding (standard base64), then parse.
    pub fn from_base64(text: &str) -> CryptoResult<Self> {
        let bytes = STANDARD.decode(text.trim())?;
        Self::parse(&bytes)
    }

    /// Serialize back to the wire layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_ENVELOPE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Serialize to the transport encoding.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_layout() {
        let mut bytes = vec![1u8; SALT_LEN];
        bytes.extend_from_slice(&[2u8; IV_LEN]);
        bytes.extend_from_slice(b"ciphertext-and-tag");

        let env = Envelope::parse(&bytes).unwrap();
        assert_eq!(env.salt, [1u8; SALT_LEN]);
        assert_eq!(env.iv, [2u8; IV_LEN]);
        assert_eq!(env.ciphertext, b"ciphertext-and-tag");
        assert_eq!(env.to_bytes(), bytes);
    }

    #[test]
    fn short_input_is_malformed() {
        for len in [0, 1, SALT_LEN, MIN_ENVELOPE_LEN - 1] {
            let err = Envelope::parse(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, CryptoError::MalformedPayload { len: l } if l == len));
        }
        // Exactly salt+iv parses (empty ciphertext fails later, at decryption).
        assert!(Envelope::parse(&[0u8; MIN_ENVELOPE_LEN]).is_ok());
    }

    #[test]
    fn base64_roundtrip() {
        let env = Envelope {
            salt: [3u8; SALT_LEN],
            iv: [4u8; IV_LEN],
            ciphertext: vec![5u8; 40],
        };
        assert_eq!(Envelope::from_base64(&env.to_base64()).unwrap(), env);
    }

    #[test]
    fn bad_transport_encoding_is_rejected() {
        assert!(matches!(
            Envelope::from_base64("not%%base64").unwrap_err(),
            CryptoError::Transport(_)
        ));
    }
}
