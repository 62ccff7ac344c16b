//! In-memory cache store for ephemeral use and tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{error::CacheResult, key::CacheKey, store::CacheStore};

/// `DashMap`-backed [`CacheStore`]. Nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct MemCacheStore {
    entries: Arc<DashMap<CacheKey, String>>,
}

impl MemCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemCacheStore {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    async fn put_if_absent(&self, key: &CacheKey, value: &str) -> CacheResult<()> {
        self.entries
            .entry(key.clone())
            .or_insert_with(|| value.to_string());
        Ok(())
    }
}
