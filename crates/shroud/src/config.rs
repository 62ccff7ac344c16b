use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, SystemTime},
};

use shroud_net::NetOptions;
use url::Url;

/// License predicate: evaluated after decryption, before execution.
pub type LicenseCheck = Arc<dyn Fn() -> bool + Send + Sync>;

/// Configuration for one [`Loader`](crate::Loader).
///
/// Built once, read-only for the loader's lifetime. Every option is
/// independently optional; the absence of `password` selects the
/// unencrypted direct-fetch path.
#[derive(Clone)]
pub struct LoaderConfig {
    /// Decryption password. `None` selects the direct-fetch path.
    pub password: Option<String>,
    /// Only channel messages declaring this origin are accepted.
    pub trusted_origin: String,
    /// Cache key prefix.
    pub cache_prefix: String,
    /// Retrieval channel deadline.
    pub timeout: Duration,
    /// Optional license predicate.
    pub license_check: Option<LicenseCheck>,
    /// Optional absolute expiration instant.
    pub expire_at: Option<SystemTime>,
    /// Relay endpoint for the hosted retrieval-surface strategy.
    /// `None` selects the inline strategy.
    pub surface_url: Option<Url>,
    /// Directory for the persistent cache store. `None` keeps the cache
    /// in memory.
    pub cache_dir: Option<PathBuf>,
    /// Network options for the built-in HTTP client.
    pub net: NetOptions,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            password: None,
            trusted_origin: "local".to_string(),
            cache_prefix: "__shroud_cache__".to_string(),
            timeout: Duration::from_millis(10_000),
            license_check: None,
            expire_at: None,
            surface_url: None,
            cache_dir: None,
            net: NetOptions::default(),
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decryption password, selecting the encrypted channel path.
    pub fn with_password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the trusted message origin.
    pub fn with_trusted_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.trusted_origin = origin.into();
        self
    }

    /// Set the cache key prefix.
    pub fn with_cache_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.cache_prefix = prefix.into();
        self
    }

    /// Set the retrieval deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the license predicate.
    pub fn with_license_check<F>(mut self, check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.license_check = Some(Arc::new(check));
        self
    }

    /// Set the absolute expiration instant.
    pub fn with_expire_at(mut self, instant: SystemTime) -> Self {
        self.expire_at = Some(instant);
        self
    }

    /// Use the hosted retrieval-surface strategy through `surface_url`.
    pub fn with_surface_url(mut self, surface_url: Url) -> Self {
        self.surface_url = Some(surface_url);
        self
    }

    /// Persist the cache under `dir` instead of in memory.
    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Set network options.
    pub fn with_net(mut self, net: NetOptions) -> Self {
        self.net = net;
        self
    }
}
