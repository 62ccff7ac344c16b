//! Disk-backed cache store.
//!
//! One file per key under a root directory. Writes use the
//! write-temp-then-rename pattern so the stored payload is either the old
//! version or the new version, never a partial write. Entries survive
//! process restart, which the retrieval surface's re-evaluation step
//! relies on.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::trace;

use crate::{
    error::{CacheError, CacheResult},
    key::CacheKey,
    store::CacheStore,
};

/// Filesystem [`CacheStore`], one file per [`CacheKey`].
///
/// Keys are filename-safe by construction (see [`KeyScheme`](crate::KeyScheme)).
#[derive(Clone, Debug)]
pub struct DiskCacheStore {
    root: PathBuf,
}

impl DiskCacheStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> CacheResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

fn write_atomic(root: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(root)?;
    tmp.write_all(value.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl CacheStore for DiskCacheStore {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    async fn put_if_absent(&self, key: &CacheKey, value: &str) -> CacheResult<()> {
        let path = self.path_for(key);
        if tokio::fs::try_exists(&path).await? {
            trace!(key = %key, "cache entry already present, keeping existing");
            return Ok(());
        }

        let root = self.root.clone();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || write_atomic(&root, &path, &value))
            .await
            .map_err(|e| CacheError::Io(io::Error::other(e)))??;
        trace!(key = %key, "cache entry written");
        Ok(())
    }
}
