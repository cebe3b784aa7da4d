pub mod https;

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_domain::{DomainError, QueryRequest, UpstreamEndpoint};
use std::time::Duration;

pub use https::HttpsTransport;

/// Expected content type for DNS-over-HTTPS payloads (RFC 8484 §6)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,

    /// Empty unless the upstream answered 200.
    pub bytes: Bytes,
}

/// Sends one client query to one upstream.
///
/// Dropping the returned future aborts the exchange and releases its
/// connection.
#[async_trait]
pub trait DohTransport: Send + Sync {
    async fn send(
        &self,
        endpoint: &UpstreamEndpoint,
        request: &QueryRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}
