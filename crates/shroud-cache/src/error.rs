use thiserror::Error;

/// Result type used by `shroud-cache`.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors produced by cache stores.
///
/// Kept intentionally small; higher layers wrap this to add context
/// (URL, cache key).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
