use thiserror::Error;

use crate::executor::ExecutionError;

/// Result type used by the loader.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Pipeline errors, one variant per stage.
///
/// Every stage failure rejects the `load` call with its specific kind; there
/// is no retry anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Direct-path fetch failed (non-success status or transport error).
    #[error("fetch failed: {0}")]
    Fetch(#[from] shroud_net::NetError),

    /// Retrieval channel failed (timeout, surface error, or the surface's
    /// own fetch failure).
    #[error("retrieval failed: {0}")]
    Channel(#[from] shroud_channel::ChannelError),

    /// Envelope decoding or authenticated decryption failed.
    #[error("decryption failed: {0}")]
    Crypto(#[from] shroud_crypto::CryptoError),

    /// Cache store could not be opened.
    #[error("cache error: {0}")]
    Cache(#[from] shroud_cache::CacheError),

    /// The configured license predicate evaluated false.
    #[error("license check failed")]
    License,

    /// The configured expiration instant has passed.
    #[error("payload has expired")]
    Expired,

    /// Uncaught fault from the delivered code; propagated as-is.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl LoaderError {
    /// Checks if this is the retrieval deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LoaderError::Channel(e) if e.is_timeout())
    }
}
