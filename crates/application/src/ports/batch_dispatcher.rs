use async_trait::async_trait;
use doh_relay_domain::{BatchOutcome, QueryRequest, UpstreamEndpoint};

/// Races one batch of upstreams for a single request.
///
/// Implementations must have resolved or cancelled every attempt of the
/// batch by the time `race` returns.
#[async_trait]
pub trait BatchDispatcher: Send + Sync {
    async fn race(&self, batch: &[UpstreamEndpoint], request: &QueryRequest) -> BatchOutcome;
}
