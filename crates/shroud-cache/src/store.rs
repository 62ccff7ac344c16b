use async_trait::async_trait;

use crate::{error::CacheResult, key::CacheKey};

/// Create-if-absent key/value store for raw payload strings.
///
/// Shared across all loads and all retrieval surfaces. Entries are treated
/// as immutable once written: `put_if_absent` never replaces an existing
/// value, so racing writers for the same key (which by construction carry
/// identical content) are harmless.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Look up the payload stored under `key`.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>>;

    /// Store `value` under `key` unless an entry already exists.
    async fn put_if_absent(&self, key: &CacheKey, value: &str) -> CacheResult<()>;
}
