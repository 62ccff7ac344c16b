use thiserror::Error;

/// Result type used by `shroud-crypto`.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Decryption and envelope errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("malformed payload: {len} bytes, need at least 28")]
    MalformedPayload { len: usize },

    #[error("transport decoding failed: {0}")]
    Transport(#[from] base64::DecodeError),

    /// Authentication tag did not verify: wrong password or tampered
    /// ciphertext. Deliberately carries no detail beyond that.
    #[error("authentication failed")]
    AuthFailed,

    #[error("plaintext is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("crypto task failed: {0}")]
    Task(String),
}
