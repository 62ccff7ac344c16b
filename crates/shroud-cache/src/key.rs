//! Deterministic cache key derivation.
//!
//! This module only *derives keys*; it does not perform any I/O.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use url::Url;

/// Opaque cache key for one URL under one prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generator for cache keys under a fixed prefix.
///
/// Injectivity invariant: for a fixed prefix, `key_for(u1) == key_for(u2)`
/// implies `u1 == u2`. This holds because the URL is base64url-encoded (an
/// injective encoding whose alphabet excludes the `:` delimiter), so the
/// prefix/payload split is unambiguous.
#[derive(Debug, Clone)]
pub struct KeyScheme {
    prefix: String,
}

impl KeyScheme {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Derive the cache key for `url`: `<prefix>:<base64url_no_pad(url)>`.
    pub fn key_for(&self, url: &Url) -> CacheKey {
        CacheKey(format!(
            "{}:{}",
            self.prefix,
            URL_SAFE_NO_PAD.encode(url.as_str())
        ))
    }
}
