use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shroud_cache::KeyScheme;
use tokio::{sync::mpsc, time::timeout};
use tracing::{debug, trace};
use url::Url;

use crate::{
    config::ChannelConfig,
    error::{ChannelError, ChannelResult},
    message::SurfaceMessage,
    surface::{RetrievalSurface, SurfaceHandle, SurfaceRequest},
};

/// Orchestrator side of the retrieval protocol.
///
/// One channel instance serves any number of `retrieve` calls; each call
/// gets its own token, surface, and message channel.
pub struct RetrievalChannel {
    surface: Arc<dyn RetrievalSurface>,
    keys: KeyScheme,
    config: ChannelConfig,
    next_token: AtomicU64,
}

/// Per-call ownership of the listener registration and the surface.
///
/// `teardown` is the single finalization path, reachable from success,
/// error, and timeout alike; the `Drop` impl covers early returns. Both the
/// surface abort and the receiver close are idempotent, so racing trigger
/// conditions cannot release anything twice.
struct PendingRequest {
    rx: mpsc::Receiver<SurfaceMessage>,
    surface: Option<SurfaceHandle>,
}

impl PendingRequest {
    fn teardown(&mut self) {
        if let Some(mut handle) = self.surface.take() {
            handle.teardown();
        }
        self.rx.close();
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl RetrievalChannel {
    pub fn new(surface: Arc<dyn RetrievalSurface>, keys: KeyScheme, config: ChannelConfig) -> Self {
        Self {
            surface,
            keys,
            config,
            next_token: AtomicU64::new(1),
        }
    }

    /// Obtain the raw payload for `url` through an isolated surface.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Timeout`] when no correlated message arrives within
    /// the configured deadline; [`ChannelError::Surface`] when the surface
    /// reports its own failure.
    pub async fn retrieve(&self, url: &Url) -> ChannelResult<String> {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let cache_key = self.keys.key_for(url);
        debug!(token, url = %url, key = %cache_key, "retrieval started");

        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let handle = self.surface.spawn(
            SurfaceRequest {
                token,
                url: url.clone(),
                cache_key,
            },
            tx,
        );
        let mut pending = PendingRequest {
            rx,
            surface: Some(handle),
        };

        // The timeout disarms implicitly once a correlated message settles
        // the wait.
        let outcome = timeout(
            self.config.timeout,
            Self::await_settlement(
                &mut pending.rx,
                token,
                url,
                &self.config.trusted_origin,
            ),
        )
        .await;

        pending.teardown();

        match outcome {
            Ok(result) => result,
            Err(_) => {
                debug!(token, url = %url, "retrieval timed out");
                Err(ChannelError::Timeout)
            }
        }
    }

    /// Wait for the first message that correlates with this request.
    ///
    /// Anything else (wrong token, wrong URL, untrusted origin) is logged
    /// and skipped without altering state; the wait stays open. A surface
    /// that hangs up without settling is treated the same way: the request
    /// stays pending and the outer deadline decides.
    async fn await_settlement(
        rx: &mut mpsc::Receiver<SurfaceMessage>,
        token: u64,
        url: &Url,
        trusted_origin: &str,
    ) -> ChannelResult<String> {
        loop {
            let Some(msg) = rx.recv().await else {
                trace!(token, "surface hung up, holding the wait for the deadline");
                return std::future::pending().await;
            };

            if msg.token() != token || msg.url() != url {
                trace!(
                    expected = token,
                    got = msg.token(),
                    "ignoring uncorrelated message"
                );
                continue;
            }
            if msg.origin() != trusted_origin {
                trace!(origin = msg.origin(), "ignoring message from untrusted origin");
                continue;
            }

            return match msg {
                SurfaceMessage::Payload { data, .. } => {
                    debug!(token, "retrieval settled with payload");
                    Ok(data)
                }
                SurfaceMessage::Error { message, .. } => {
                    debug!(token, error = %message, "retrieval settled with surface error");
                    Err(ChannelError::Surface(message))
                }
            };
        }
    }
}
