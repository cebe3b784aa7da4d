//! HTTPS transport for relayed queries (DNS-over-HTTPS, RFC 8484)
//!
//! The client's query is forwarded in the shape it arrived in:
//!
//! ```text
//! GET  /dns-query?dns=<base64url>     (query parameters re-encoded verbatim)
//! POST /dns-query                     (raw DNS wire format body)
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//! ```

use super::{DohTransport, TransportResponse, DNS_MESSAGE_CONTENT_TYPE};
use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_domain::{DomainError, HttpMethod, QueryRequest, UpstreamEndpoint};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(4);
const POOL_MAX_IDLE_PER_HOST: usize = 4;

/// DNS-over-HTTPS transport backed by one pooled HTTP client.
pub struct HttpsTransport {
    client: reqwest::Client,
}

impl HttpsTransport {
    pub fn new() -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn request_builder(
        &self,
        endpoint: &UpstreamEndpoint,
        request: &QueryRequest,
    ) -> reqwest::RequestBuilder {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(endpoint.url()).query(&request.params[..]),
            HttpMethod::Post => self.client.post(endpoint.url()).body(request.body.clone()),
        };
        builder
            .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
    }
}

fn map_reqwest_error(endpoint: &UpstreamEndpoint, e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::TransportTimeout {
            server: endpoint.to_string(),
        }
    } else {
        DomainError::TransportFailure {
            server: endpoint.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl DohTransport for HttpsTransport {
    async fn send(
        &self,
        endpoint: &UpstreamEndpoint,
        request: &QueryRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(
            upstream = %endpoint.host(),
            method = %request.method,
            body_len = request.body.len(),
            "Sending DoH query"
        );

        let response = self
            .request_builder(endpoint, request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(endpoint, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(upstream = %endpoint.host(), status = status.as_u16(), "DoH upstream refused query");
            // Body is never read; dropping the response releases the connection.
            return Ok(TransportResponse {
                status: status.as_u16(),
                bytes: Bytes::new(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(endpoint, e))?;

        debug!(
            upstream = %endpoint.host(),
            response_len = bytes.len(),
            "DoH response received"
        );

        Ok(TransportResponse {
            status: status.as_u16(),
            bytes,
        })
    }
}
