use crate::ports::{BatchDispatcher, ResponseCache};
use bytes::Bytes;
use doh_relay_domain::{
    BatchOutcome, QueryRequest, RelayConfig, RelayOutcome, SoftFailurePolicy, UpstreamRegistry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Fallback controller: cache lookup, then batch after batch of upstream
/// races until one yields an answer or the batch budget runs out.
pub struct RelayQueryUseCase {
    registry: UpstreamRegistry,
    dispatcher: Arc<dyn BatchDispatcher>,
    cache: Option<Arc<dyn ResponseCache>>,
    cache_ttl: Duration,
    batch_size: usize,
    max_batches: usize,
    soft_failure_policy: SoftFailurePolicy,
}

impl RelayQueryUseCase {
    pub fn new(
        registry: UpstreamRegistry,
        dispatcher: Arc<dyn BatchDispatcher>,
        config: &RelayConfig,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            cache: None,
            cache_ttl: Duration::ZERO,
            batch_size: config.batch_size.max(1),
            max_batches: config.max_batches,
            soft_failure_policy: config.soft_failure_policy,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    pub fn upstream_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of batches a request may race before giving up.
    pub fn batch_budget(&self) -> usize {
        self.registry
            .len()
            .div_ceil(self.batch_size)
            .min(self.max_batches)
    }

    pub async fn execute(&self, request: &QueryRequest) -> RelayOutcome {
        let start = Instant::now();

        if let Some(answer) = self.cached(request) {
            debug!(
                key = %request.cache_key,
                bytes = answer.len(),
                "Serving cached answer"
            );
            return RelayOutcome::Answer(answer);
        }

        let order = self.registry.permute();
        let mut deferred: Option<Bytes> = None;
        let mut attempted = 0usize;

        for (index, batch) in order
            .chunks(self.batch_size)
            .take(self.max_batches)
            .enumerate()
        {
            attempted += 1;
            debug!(
                batch = index,
                size = batch.len(),
                method = %request.method,
                message_id = ?request.message_id(),
                "Racing upstream batch"
            );

            match self.dispatcher.race(batch, request).await {
                BatchOutcome::Authoritative(answer) => {
                    self.store(request, &answer);
                    debug!(
                        batch = index,
                        bytes = answer.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Authoritative answer"
                    );
                    return RelayOutcome::Answer(answer);
                }
                BatchOutcome::SoftFailure(answer) => match self.soft_failure_policy {
                    // Never cached: only authoritative answers reach the cache.
                    SoftFailurePolicy::Stop => {
                        debug!(
                            batch = index,
                            bytes = answer.len(),
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "Serving non-authoritative answer"
                        );
                        return RelayOutcome::Answer(answer);
                    }
                    SoftFailurePolicy::Continue => {
                        debug!(batch = index, "Non-authoritative answer, trying next batch");
                        deferred.get_or_insert(answer);
                    }
                },
                BatchOutcome::AllHard => {
                    debug!(batch = index, "Every attempt in batch failed");
                }
            }
        }

        if let Some(answer) = deferred {
            debug!(
                batches = attempted,
                bytes = answer.len(),
                "No authoritative answer, serving first non-authoritative one"
            );
            return RelayOutcome::Answer(answer);
        }

        warn!(
            batches = attempted,
            upstreams = self.registry.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "All upstream DoH failed"
        );
        RelayOutcome::Exhausted
    }

    fn cached(&self, request: &QueryRequest) -> Option<Bytes> {
        self.cache.as_ref()?.get(&request.cache_key)
    }

    fn store(&self, request: &QueryRequest, answer: &Bytes) {
        if let Some(cache) = &self.cache {
            cache.put(request.cache_key.clone(), answer.clone(), self.cache_ttl);
        }
    }
}
