use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid upstream endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid query request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported method {0}")]
    UnsupportedMethod(String),

    #[error("DNS message too large (limit {limit} bytes)")]
    MessageTooLarge { limit: usize },

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Transport failure talking to {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("No upstream endpoints configured")]
    NoUpstreams,

    #[error("All upstream DoH failed")]
    UpstreamsExhausted,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Transport-level failures never carry a usable response body.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. } | Self::TransportFailure { .. }
        )
    }
}
