use std::sync::Arc;

use shroud_cache::{CacheStore, DiskCacheStore, KeyScheme, MemCacheStore};
use shroud_channel::{
    ChannelConfig, HostedSurface, InlineSurface, RetrievalChannel, RetrievalSurface,
};
use shroud_crypto::{decrypt, Envelope};
use shroud_net::{HttpClient, Net};
use tracing::debug;
use url::Url;

use crate::{
    config::LoaderConfig,
    error::LoaderResult,
    executor::ScriptExecutor,
    policy::PolicyGate,
    shaper::shape,
};

/// Public entry point: sequences retrieval, decryption, policy, shaping,
/// and execution for one URL at a time.
///
/// Stage order within one `load` call is strict; no stage starts before its
/// predecessor settles, and the first failure rejects the call with that
/// stage's error kind.
pub struct Loader {
    config: LoaderConfig,
    net: Arc<dyn Net>,
    channel: RetrievalChannel,
    policy: PolicyGate,
    executor: Arc<dyn ScriptExecutor>,
}

impl Loader {
    /// Build a loader with the built-in HTTP client and a cache store chosen
    /// by `config.cache_dir` (disk when set, in-memory otherwise).
    ///
    /// # Errors
    ///
    /// [`LoaderError::Cache`](crate::LoaderError::Cache) when the disk cache
    /// root cannot be created.
    pub fn new(config: LoaderConfig, executor: Arc<dyn ScriptExecutor>) -> LoaderResult<Self> {
        let net: Arc<dyn Net> = Arc::new(HttpClient::new(config.net.clone()));
        let cache: Arc<dyn CacheStore> = match config.cache_dir {
            Some(ref dir) => Arc::new(DiskCacheStore::new(dir.clone())?),
            None => Arc::new(MemCacheStore::new()),
        };
        Ok(Self::assemble(config, net, cache, None, executor))
    }

    /// Build a loader from externally assembled parts.
    ///
    /// `surface` overrides the strategy selected by `config.surface_url`;
    /// embedders and tests use this to supply their own surface, network,
    /// or cache implementations.
    pub fn with_parts(
        config: LoaderConfig,
        net: Arc<dyn Net>,
        cache: Arc<dyn CacheStore>,
        surface: Option<Arc<dyn RetrievalSurface>>,
        executor: Arc<dyn ScriptExecutor>,
    ) -> Self {
        Self::assemble(config, net, cache, surface, executor)
    }

    fn assemble(
        config: LoaderConfig,
        net: Arc<dyn Net>,
        cache: Arc<dyn CacheStore>,
        surface: Option<Arc<dyn RetrievalSurface>>,
        executor: Arc<dyn ScriptExecutor>,
    ) -> Self {
        let surface: Arc<dyn RetrievalSurface> = surface.unwrap_or_else(|| {
            match config.surface_url {
                Some(ref surface_url) => Arc::new(HostedSurface::new(
                    net.clone(),
                    cache.clone(),
                    surface_url.clone(),
                )),
                None => Arc::new(
                    InlineSurface::new(net.clone(), cache.clone())
                        .with_origin(config.trusted_origin.clone()),
                ),
            }
        });

        let channel = RetrievalChannel::new(
            surface,
            KeyScheme::new(config.cache_prefix.clone()),
            ChannelConfig::default()
                .with_timeout(config.timeout)
                .with_trusted_origin(config.trusted_origin.clone()),
        );
        let policy = PolicyGate::new(config.license_check.clone(), config.expire_at);

        Self {
            config,
            net,
            channel,
            policy,
            executor,
        }
    }

    /// Deliver and execute the payload at `url`.
    ///
    /// Resolves once execution has been invoked; it does not wait for any
    /// asynchronous work the delivered code starts on its own.
    pub async fn load(&self, url: &Url) -> LoaderResult<()> {
        match self.config.password {
            Some(ref password) => self.load_encrypted(url, password).await,
            None => self.load_plain(url).await,
        }
    }

    async fn load_plain(&self, url: &Url) -> LoaderResult<()> {
        debug!(url = %url, "loading via direct fetch");
        let source = self.net.get_text(url.clone()).await?;
        self.finish(source)
    }

    async fn load_encrypted(&self, url: &Url, password: &str) -> LoaderResult<()> {
        debug!(url = %url, "loading via retrieval channel");
        let raw = self.channel.retrieve(url).await?;
        let envelope = Envelope::from_base64(&raw)?;
        let plaintext = decrypt(envelope, password).await?;

        // Policy failure drops the plaintext here; it never reaches the
        // shaper or the executor.
        self.policy.check()?;
        self.finish(plaintext)
    }

    fn finish(&self, source: String) -> LoaderResult<()> {
        let shaped = shape(&source);
        self.executor.execute_ambient(&shaped)?;
        Ok(())
    }
}
