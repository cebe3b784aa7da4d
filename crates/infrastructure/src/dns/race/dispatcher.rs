use crate::dns::transport::DohTransport;
use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_application::ports::BatchDispatcher;
use doh_relay_domain::{
    classify, BatchOutcome, QueryRequest, TransportOutcome, UpstreamEndpoint, Verdict,
};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::debug;

enum AttemptOutcome {
    Completed(Verdict),
    Cancelled,
}

/// Races every endpoint of a batch concurrently and keeps the best verdict.
///
/// The first authoritative verdict (in completion order) wins and cancels
/// its siblings. Otherwise the first soft failure to complete is returned
/// once every attempt has finished.
pub struct RaceDispatcher {
    transport: Arc<dyn DohTransport>,
    attempt_timeout: Duration,
}

impl RaceDispatcher {
    pub fn new(transport: Arc<dyn DohTransport>, attempt_timeout: Duration) -> Self {
        Self {
            transport,
            attempt_timeout,
        }
    }

    async fn attempt(
        &self,
        endpoint: &UpstreamEndpoint,
        request: &QueryRequest,
        cancel: CancellationToken,
    ) -> AttemptOutcome {
        let start = Instant::now();
        let exchange = timeout(
            self.attempt_timeout,
            self.transport.send(endpoint, request, self.attempt_timeout),
        );

        // Biased: once cancelled, an attempt never gets to complete, and the
        // in-flight exchange is dropped with this future.
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return AttemptOutcome::Cancelled,
            result = exchange => match result {
                Ok(Ok(response)) => TransportOutcome::Received {
                    status: response.status,
                    body: response.bytes,
                },
                Ok(Err(e)) => {
                    debug!(upstream = %endpoint.host(), error = %e, "Attempt failed");
                    TransportOutcome::Failed
                }
                Err(_) => {
                    debug!(
                        upstream = %endpoint.host(),
                        timeout_ms = self.attempt_timeout.as_millis() as u64,
                        "Attempt timed out"
                    );
                    TransportOutcome::Failed
                }
            },
        };

        let verdict = classify(outcome);
        debug!(
            upstream = %endpoint.host(),
            verdict = verdict.kind(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Attempt completed"
        );
        AttemptOutcome::Completed(verdict)
    }
}

#[async_trait]
impl BatchDispatcher for RaceDispatcher {
    async fn race(&self, batch: &[UpstreamEndpoint], request: &QueryRequest) -> BatchOutcome {
        if batch.is_empty() {
            return BatchOutcome::AllHard;
        }

        let cancel = CancellationToken::new();
        let mut attempts: FuturesUnordered<_> = batch
            .iter()
            .map(|endpoint| self.attempt(endpoint, request, cancel.child_token()))
            .collect();

        let mut first_soft_failure: Option<Bytes> = None;
        let mut hard_failures = 0usize;

        while let Some(outcome) = attempts.next().await {
            match outcome {
                AttemptOutcome::Completed(Verdict::Authoritative(answer)) => {
                    cancel.cancel();
                    let mut cancelled = 0usize;
                    // Each sibling sees the cancellation on its next poll and
                    // drops its exchange before we return.
                    while let Some(sibling) = attempts.next().await {
                        if matches!(sibling, AttemptOutcome::Cancelled) {
                            cancelled += 1;
                        }
                    }
                    debug!(
                        batch_size = batch.len(),
                        cancelled,
                        "Authoritative answer, siblings cancelled"
                    );
                    return BatchOutcome::Authoritative(answer);
                }
                AttemptOutcome::Completed(Verdict::SoftFailure { rcode, body }) => {
                    if first_soft_failure.is_none() {
                        debug!(rcode = %rcode, "Recording first soft failure of batch");
                        first_soft_failure = Some(body);
                    }
                }
                AttemptOutcome::Completed(Verdict::HardFailure) => {
                    hard_failures += 1;
                }
                AttemptOutcome::Cancelled => {}
            }
        }

        match first_soft_failure {
            Some(body) => BatchOutcome::SoftFailure(body),
            None => {
                debug!(hard_failures, "Batch produced no usable response");
                BatchOutcome::AllHard
            }
        }
    }
}
