use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shroud_cache::{CacheStore, KeyScheme, MemCacheStore};
use shroud_channel::{
    ChannelConfig, ChannelError, InlineSurface, RetrievalChannel, RetrievalSurface, SurfaceHandle,
    SurfaceMessage, SurfaceRequest,
};
use shroud_net::testing::StaticNet;
use tokio::sync::mpsc;
use url::Url;

fn payload_url() -> Url {
    Url::parse("https://example.com/payload.bin").unwrap()
}

fn channel_with(surface: Arc<dyn RetrievalSurface>, timeout_ms: u64) -> RetrievalChannel {
    RetrievalChannel::new(
        surface,
        KeyScheme::new("__shroud_cache__"),
        ChannelConfig::default().with_timeout(Duration::from_millis(timeout_ms)),
    )
}

/// Surface that never posts anything. The drop flag observes that the
/// spawned task was aborted during teardown.
struct SilentSurface {
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl RetrievalSurface for SilentSurface {
    fn spawn(&self, _req: SurfaceRequest, _tx: mpsc::Sender<SurfaceMessage>) -> SurfaceHandle {
        let flag = DropFlag(self.dropped.clone());
        SurfaceHandle::new(tokio::spawn(async move {
            let _flag = flag;
            std::future::pending::<()>().await;
        }))
    }
}

/// Surface that posts a burst of uncorrelated messages, then optionally the
/// real payload.
struct ForgingSurface {
    send_real: bool,
}

impl RetrievalSurface for ForgingSurface {
    fn spawn(&self, req: SurfaceRequest, tx: mpsc::Sender<SurfaceMessage>) -> SurfaceHandle {
        let send_real = self.send_real;
        SurfaceHandle::new(tokio::spawn(async move {
            let other_url = Url::parse("https://example.com/other.bin").unwrap();

            // Wrong token.
            let _ = tx
                .send(SurfaceMessage::Payload {
                    token: req.token + 100,
                    url: req.url.clone(),
                    origin: "local".into(),
                    data: "forged".into(),
                })
                .await;
            // Wrong URL.
            let _ = tx
                .send(SurfaceMessage::Payload {
                    token: req.token,
                    url: other_url,
                    origin: "local".into(),
                    data: "forged".into(),
                })
                .await;
            // Untrusted origin.
            let _ = tx
                .send(SurfaceMessage::Payload {
                    token: req.token,
                    url: req.url.clone(),
                    origin: "https://evil.example".into(),
                    data: "forged".into(),
                })
                .await;

            if send_real {
                let _ = tx
                    .send(SurfaceMessage::Payload {
                        token: req.token,
                        url: req.url,
                        origin: "local".into(),
                        data: "genuine".into(),
                    })
                    .await;
            }
        }))
    }
}

#[tokio::test]
async fn fetches_once_then_serves_from_cache() {
    let url = payload_url();
    let net = StaticNet::new().with_body(url.clone(), "ciphertext");
    let cache = MemCacheStore::new();
    let surface = InlineSurface::new(Arc::new(net.clone()), Arc::new(cache.clone()));
    let channel = channel_with(Arc::new(surface), 1000);

    assert_eq!(channel.retrieve(&url).await.unwrap(), "ciphertext");
    assert_eq!(channel.retrieve(&url).await.unwrap(), "ciphertext");
    assert_eq!(net.hits(&url), 1);

    // The write went through the derived key.
    let key = KeyScheme::new("__shroud_cache__").key_for(&url);
    assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("ciphertext"));
}

#[tokio::test]
async fn surface_fetch_failure_settles_as_surface_error() {
    let url = payload_url();
    let net = StaticNet::new().with_status(url.clone(), 500);
    let surface = InlineSurface::new(Arc::new(net), Arc::new(MemCacheStore::new()));
    let channel = channel_with(Arc::new(surface), 1000);

    match channel.retrieve(&url).await.unwrap_err() {
        ChannelError::Surface(message) => assert!(message.contains("500")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn uncorrelated_messages_never_settle_the_request() {
    let url = payload_url();
    let channel = channel_with(Arc::new(ForgingSurface { send_real: true }), 1000);

    // All three forged messages are skipped; the genuine one settles.
    assert_eq!(channel.retrieve(&url).await.unwrap(), "genuine");
}

#[tokio::test]
async fn only_forged_messages_ends_in_timeout() {
    let url = payload_url();
    let channel = channel_with(Arc::new(ForgingSurface { send_real: false }), 100);

    assert!(channel.retrieve(&url).await.unwrap_err().is_timeout());
}

#[tokio::test]
async fn hangup_after_forged_messages_waits_for_the_deadline() {
    let url = payload_url();
    let channel = channel_with(Arc::new(ForgingSurface { send_real: false }), 200);

    // The surface drops its sender right after the forged burst. The
    // request must not settle on the hang-up; rejection comes from the
    // deadline, not before it.
    let started = tokio::time::Instant::now();
    let err = channel.retrieve(&url).await.unwrap_err();
    assert!(err.is_timeout(), "expected Timeout, got: {err:?}");
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn timeout_tears_down_the_surface() {
    let url = payload_url();
    let dropped = Arc::new(AtomicBool::new(false));
    let channel = channel_with(
        Arc::new(SilentSurface {
            dropped: dropped.clone(),
        }),
        50,
    );

    let err = channel.retrieve(&url).await.unwrap_err();
    assert!(err.is_timeout());

    // Abort delivery is asynchronous; give the runtime a beat.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(dropped.load(Ordering::SeqCst), "surface task not aborted");
}

#[tokio::test]
async fn concurrent_loads_of_different_urls_do_not_cross() {
    let url_a = Url::parse("https://example.com/a.bin").unwrap();
    let url_b = Url::parse("https://example.com/b.bin").unwrap();
    let net = StaticNet::new()
        .with_body(url_a.clone(), "payload-a")
        .with_body(url_b.clone(), "payload-b");
    let cache = MemCacheStore::new();
    let surface = InlineSurface::new(Arc::new(net), Arc::new(cache));
    let channel = Arc::new(channel_with(Arc::new(surface), 1000));

    let (a, b) = tokio::join!(channel.retrieve(&url_a), channel.retrieve(&url_b));
    assert_eq!(a.unwrap(), "payload-a");
    assert_eq!(b.unwrap(), "payload-b");
}
