use std::time::Duration;

/// Origin identity used when none is configured: the host's own context.
pub(crate) const LOCAL_ORIGIN: &str = "local";

/// Configuration for [`RetrievalChannel`](crate::RetrievalChannel).
#[derive(Clone, Debug)]
pub struct ChannelConfig {
    /// Deadline for one retrieval, armed at channel start.
    pub timeout: Duration,
    /// Only messages declaring this origin settle a request.
    pub trusted_origin: String,
    /// Capacity of the per-request message channel.
    pub channel_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            trusted_origin: LOCAL_ORIGIN.to_string(),
            channel_capacity: 8,
        }
    }
}

impl ChannelConfig {
    /// Set the retrieval deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the trusted message origin.
    pub fn with_trusted_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.trusted_origin = origin.into();
        self
    }

    /// Set the per-request channel capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}
