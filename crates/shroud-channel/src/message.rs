use url::Url;

/// Message posted by a retrieval surface back to the orchestrator.
///
/// Tagged union over payload and error outcomes. Correlation fields (`token`,
/// `url`, `origin`) are declared by the sender; the orchestrator trusts a
/// message only when all of them check out.
#[derive(Clone, Debug)]
pub enum SurfaceMessage {
    /// The raw (possibly encrypted) payload for `url`.
    Payload {
        token: u64,
        url: Url,
        origin: String,
        data: String,
    },
    /// The surface's own fetch or cache access failed.
    Error {
        token: u64,
        url: Url,
        origin: String,
        message: String,
    },
}

impl SurfaceMessage {
    pub fn token(&self) -> u64 {
        match self {
            Self::Payload { token, .. } | Self::Error { token, .. } => *token,
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            Self::Payload { url, .. } | Self::Error { url, .. } => url,
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            Self::Payload { origin, .. } | Self::Error { origin, .. } => origin,
        }
    }
}
