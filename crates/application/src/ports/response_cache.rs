use bytes::Bytes;
use doh_relay_domain::CacheKey;
use std::time::Duration;

/// Best-effort, process-local answer cache.
///
/// Writes overwrite: values are a deterministic function of the key, so the
/// last writer winning is always correct.
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Bytes>;

    fn put(&self, key: CacheKey, answer: Bytes, ttl: Duration);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
