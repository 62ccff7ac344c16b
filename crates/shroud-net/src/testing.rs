//! Canned [`Net`] implementation for tests.
//!
//! Manual fake rather than a mocking crate: downstream crates share it for
//! channel and loader tests, and a plain route table keeps those tests
//! readable (same approach as a hand-written worker source fake).

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use url::Url;

use crate::{
    error::{NetError, NetResult},
    traits::Net,
};

#[derive(Clone, Debug)]
enum Route {
    Body(String),
    Status(u16),
}

/// In-memory [`Net`] fake mapping URLs to canned responses.
///
/// Unrouted URLs answer 404. Fetches are counted per URL so tests can assert
/// the at-most-one-network-fetch cache property.
#[derive(Clone, Default)]
pub struct StaticNet {
    routes: Arc<Mutex<HashMap<Url, Route>>>,
    hits: Arc<Mutex<HashMap<Url, usize>>>,
}

impl StaticNet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `url` to a 200 response with `body`.
    pub fn with_body(self, url: Url, body: &str) -> Self {
        self.routes
            .lock()
            .expect("routes lock")
            .insert(url, Route::Body(body.to_string()));
        self
    }

    /// Route `url` to a bare status code.
    pub fn with_status(self, url: Url, status: u16) -> Self {
        self.routes
            .lock()
            .expect("routes lock")
            .insert(url, Route::Status(status));
        self
    }

    /// Number of fetches observed for `url`.
    pub fn hits(&self, url: &Url) -> usize {
        self.hits
            .lock()
            .expect("hits lock")
            .get(url)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Net for StaticNet {
    async fn get_text(&self, url: Url) -> NetResult<String> {
        *self
            .hits
            .lock()
            .expect("hits lock")
            .entry(url.clone())
            .or_insert(0) += 1;

        let route = self
            .routes
            .lock()
            .expect("routes lock")
            .get(&url)
            .cloned();
        match route {
            Some(Route::Body(body)) => Ok(body),
            Some(Route::Status(status)) => Err(NetError::http_status(status, url.to_string())),
            None => Err(NetError::http_status(404, url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_and_counts_hits() {
        let url = Url::parse("https://example.com/app.js").unwrap();
        let missing = Url::parse("https://example.com/missing.js").unwrap();
        let net = StaticNet::new().with_body(url.clone(), "console.log(1)");

        assert_eq!(net.get_text(url.clone()).await.unwrap(), "console.log(1)");
        assert_eq!(net.get_text(url.clone()).await.unwrap(), "console.log(1)");
        assert_eq!(net.hits(&url), 2);

        let err = net.get_text(missing.clone()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }
}
