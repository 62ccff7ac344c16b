use async_trait::async_trait;
use url::Url;

use crate::error::NetResult;

/// Retrieval seam used by the loader's direct path and by retrieval surfaces.
///
/// Implementations must be cheap to clone behind an `Arc`; one instance is
/// shared across all in-flight loads.
#[async_trait]
pub trait Net: Send + Sync + 'static {
    /// Fetch the response body at `url` as text.
    ///
    /// A non-success status is an error ([`NetError::HttpStatus`](crate::NetError::HttpStatus)),
    /// never an empty body.
    async fn get_text(&self, url: Url) -> NetResult<String>;
}
