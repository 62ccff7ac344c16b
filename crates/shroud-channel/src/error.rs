use thiserror::Error;

/// Result type used by `shroud-channel`.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Retrieval channel errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No correlated message arrived within the configured deadline.
    #[error("retrieval timed out")]
    Timeout,

    /// The surface reported a failure (its fetch or cache access failed).
    #[error("surface error: {0}")]
    Surface(String),

    #[error("network error: {0}")]
    Net(#[from] shroud_net::NetError),

    #[error("cache error: {0}")]
    Cache(#[from] shroud_cache::CacheError),
}

impl ChannelError {
    /// Checks if this error is the retrieval deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChannelError::Timeout)
    }
}
