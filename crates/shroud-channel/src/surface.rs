//! Retrieval surface strategies.
//!
//! A surface is the isolated context that actually talks to the network and
//! the cache store. Two strategies exist, mirroring the two ways a surface
//! document can be parameterized:
//!
//! - [`InlineSurface`]: `url` and `cache_key` are captured directly in the
//!   spawned task (the inline-document strategy).
//! - [`HostedSurface`]: the payload is fetched through a relay endpoint that
//!   receives `url` and `key` as query parameters (the external-document
//!   strategy).
//!
//! Both follow the same discipline: consult the cache first; on a miss,
//! fetch, write through `put_if_absent`, then re-evaluate so the cached
//! branch is the one that answers.

use std::sync::Arc;

use shroud_cache::{CacheKey, CacheStore};
use shroud_net::Net;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{trace, warn};
use url::Url;

use crate::{config::LOCAL_ORIGIN, error::ChannelResult, message::SurfaceMessage};

/// Parameters handed to a surface for one retrieval.
#[derive(Clone, Debug)]
pub struct SurfaceRequest {
    /// Correlation token, unique per pending request.
    pub token: u64,
    /// Source URL of the payload.
    pub url: Url,
    /// Cache key derived from `url`.
    pub cache_key: CacheKey,
}

/// Pluggable retrieval-surface strategy.
pub trait RetrievalSurface: Send + Sync + 'static {
    /// Spawn one surface for `req`, posting its outcome to `tx`.
    fn spawn(&self, req: SurfaceRequest, tx: mpsc::Sender<SurfaceMessage>) -> SurfaceHandle;
}

/// Owner of a spawned surface task.
///
/// Teardown aborts the task; it is idempotent and also runs on drop, so the
/// surface cannot outlive the request that owns it.
#[derive(Debug)]
pub struct SurfaceHandle {
    task: Option<JoinHandle<()>>,
}

impl SurfaceHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Abort the surface task. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            trace!("surface torn down");
        }
    }
}

impl Drop for SurfaceHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Shared fetch-through-cache step.
///
/// On a miss the fetched body is written with `put_if_absent` and the loop
/// re-evaluates, so the value actually posted always comes from the cache,
/// the same thing the surface would see after a reload.
async fn fetch_through_cache(
    net: &dyn Net,
    cache: &dyn CacheStore,
    cache_key: &CacheKey,
    fetch_url: &Url,
) -> ChannelResult<String> {
    loop {
        if let Some(data) = cache.get(cache_key).await? {
            trace!(key = %cache_key, "serving payload from cache");
            return Ok(data);
        }

        let body = net.get_text(fetch_url.clone()).await?;
        cache.put_if_absent(cache_key, &body).await?;
        trace!(key = %cache_key, "payload fetched and cached, re-evaluating");
    }
}

async fn run_surface(
    net: Arc<dyn Net>,
    cache: Arc<dyn CacheStore>,
    origin: String,
    req: SurfaceRequest,
    fetch_url: Url,
    tx: mpsc::Sender<SurfaceMessage>,
) {
    let msg = match fetch_through_cache(&*net, &*cache, &req.cache_key, &fetch_url).await {
        Ok(data) => SurfaceMessage::Payload {
            token: req.token,
            url: req.url,
            origin,
            data,
        },
        Err(e) => SurfaceMessage::Error {
            token: req.token,
            url: req.url,
            origin,
            message: e.to_string(),
        },
    };

    if tx.send(msg).await.is_err() {
        // Orchestrator already gone (timed out or dropped); nothing to do.
        warn!(token = req.token, "surface outcome dropped, receiver closed");
    }
}

/// Inline-document strategy: parameters captured directly in the task.
#[derive(Clone)]
pub struct InlineSurface {
    net: Arc<dyn Net>,
    cache: Arc<dyn CacheStore>,
    origin: String,
}

impl InlineSurface {
    /// Inline surfaces run in the host's own context, so they post with the
    /// local origin by default.
    pub fn new(net: Arc<dyn Net>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            net,
            cache,
            origin: LOCAL_ORIGIN.to_string(),
        }
    }

    /// Override the origin the surface declares on its messages.
    pub fn with_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.origin = origin.into();
        self
    }
}

impl RetrievalSurface for InlineSurface {
    fn spawn(&self, req: SurfaceRequest, tx: mpsc::Sender<SurfaceMessage>) -> SurfaceHandle {
        let fetch_url = req.url.clone();
        let task = tokio::spawn(run_surface(
            self.net.clone(),
            self.cache.clone(),
            self.origin.clone(),
            req,
            fetch_url,
            tx,
        ));
        SurfaceHandle::new(task)
    }
}

/// External-document strategy: the payload is obtained through a relay
/// endpoint, with `url` and `key` passed as query parameters.
#[derive(Clone)]
pub struct HostedSurface {
    net: Arc<dyn Net>,
    cache: Arc<dyn CacheStore>,
    surface_url: Url,
    origin: String,
}

impl HostedSurface {
    /// Messages from a hosted surface declare the serialized origin of
    /// `surface_url`; configure the channel's trusted origin to match.
    pub fn new(net: Arc<dyn Net>, cache: Arc<dyn CacheStore>, surface_url: Url) -> Self {
        let origin = surface_url.origin().ascii_serialization();
        Self {
            net,
            cache,
            surface_url,
            origin,
        }
    }

    fn relay_url(&self, req: &SurfaceRequest) -> Url {
        let mut url = self.surface_url.clone();
        url.query_pairs_mut()
            .append_pair("url", req.url.as_str())
            .append_pair("key", req.cache_key.as_str());
        url
    }
}

impl RetrievalSurface for HostedSurface {
    fn spawn(&self, req: SurfaceRequest, tx: mpsc::Sender<SurfaceMessage>) -> SurfaceHandle {
        let fetch_url = self.relay_url(&req);
        let task = tokio::spawn(run_surface(
            self.net.clone(),
            self.cache.clone(),
            self.origin.clone(),
            req,
            fetch_url,
            tx,
        ));
        SurfaceHandle::new(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroud_cache::{KeyScheme, MemCacheStore};
    use shroud_net::testing::StaticNet;

    fn request(url: &Url) -> SurfaceRequest {
        SurfaceRequest {
            token: 7,
            url: url.clone(),
            cache_key: KeyScheme::new("p").key_for(url),
        }
    }

    #[tokio::test]
    async fn inline_surface_caches_then_posts_from_cache() {
        let url = Url::parse("https://example.com/payload.bin").unwrap();
        let net = StaticNet::new().with_body(url.clone(), "ciphertext");
        let cache = MemCacheStore::new();
        let surface = InlineSurface::new(Arc::new(net.clone()), Arc::new(cache.clone()));

        let (tx, mut rx) = mpsc::channel(4);
        let _handle = surface.spawn(request(&url), tx);

        let msg = rx.recv().await.unwrap();
        match msg {
            SurfaceMessage::Payload {
                token,
                url: msg_url,
                origin,
                data,
            } => {
                assert_eq!(token, 7);
                assert_eq!(msg_url, url);
                assert_eq!(origin, "local");
                assert_eq!(data, "ciphertext");
            }
            other => panic!("unexpected message: {other:?}"),
        }

        // Write-through happened; a second surface answers without the network.
        assert_eq!(net.hits(&url), 1);
        let surface2 = InlineSurface::new(Arc::new(net.clone()), Arc::new(cache.clone()));
        let (tx2, mut rx2) = mpsc::channel(4);
        let _handle2 = surface2.spawn(request(&url), tx2);
        assert!(matches!(
            rx2.recv().await.unwrap(),
            SurfaceMessage::Payload { .. }
        ));
        assert_eq!(net.hits(&url), 1);
    }

    #[tokio::test]
    async fn inline_surface_posts_error_on_fetch_failure() {
        let url = Url::parse("https://example.com/gone.bin").unwrap();
        let net = StaticNet::new().with_status(url.clone(), 404);
        let surface = InlineSurface::new(Arc::new(net), Arc::new(MemCacheStore::new()));

        let (tx, mut rx) = mpsc::channel(4);
        let _handle = surface.spawn(request(&url), tx);

        match rx.recv().await.unwrap() {
            SurfaceMessage::Error { message, .. } => assert!(message.contains("404")),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn hosted_surface_fetches_relay_with_query_params() {
        let url = Url::parse("https://example.com/payload.bin").unwrap();
        let surface_url = Url::parse("https://cdn.example.net/relay.html").unwrap();
        let cache = MemCacheStore::new();
        let key = KeyScheme::new("p").key_for(&url);

        let mut expected = surface_url.clone();
        expected
            .query_pairs_mut()
            .append_pair("url", url.as_str())
            .append_pair("key", key.as_str());
        let net = StaticNet::new().with_body(expected.clone(), "relayed");

        let surface = HostedSurface::new(Arc::new(net.clone()), Arc::new(cache), surface_url);
        let (tx, mut rx) = mpsc::channel(4);
        let _handle = surface.spawn(request(&url), tx);

        match rx.recv().await.unwrap() {
            SurfaceMessage::Payload { origin, data, .. } => {
                assert_eq!(data, "relayed");
                assert_eq!(origin, "https://cdn.example.net");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(net.hits(&expected), 1);
    }
}
