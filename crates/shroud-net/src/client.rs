use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{
    error::{NetError, NetResult},
    traits::Net,
    types::NetOptions,
};

/// `reqwest`-backed [`Net`] implementation.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    options: NetOptions,
}

impl HttpClient {
    /// # Panics
    ///
    /// Panics if the `reqwest::Client` builder fails to build.
    #[must_use]
    pub fn new(options: NetOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(ref ua) = options.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        let inner = builder.build().expect("failed to build reqwest client");
        Self { inner, options }
    }

    /// # Errors
    ///
    /// Returns [`NetError`] on HTTP failure, non-success status, or timeout.
    pub async fn get_text(&self, url: Url) -> NetResult<String> {
        <Self as Net>::get_text(self, url).await
    }
}

#[async_trait]
impl Net for HttpClient {
    async fn get_text(&self, url: Url) -> NetResult<String> {
        let req = self
            .inner
            .get(url.clone())
            .timeout(self.options.request_timeout);

        let resp = req.send().await.map_err(NetError::from)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NetError::http_status(status.as_u16(), url.to_string()));
        }

        let body = resp.text().await.map_err(NetError::from)?;
        debug!(url = %url, len = body.len(), "fetched body");
        Ok(body)
    }
}
