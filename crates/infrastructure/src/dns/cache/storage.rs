use super::metrics::CacheMetrics;
use bytes::Bytes;
use dashmap::DashMap;
use doh_relay_application::ports::ResponseCache;
use doh_relay_domain::CacheKey;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub(super) struct CachedAnswer {
    pub answer: Bytes,
    pub expires_at: Instant,
}

impl CachedAnswer {
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory answer cache keyed by [`CacheKey`].
///
/// Expired entries are never served. They are dropped lazily on lookup and
/// in bulk by [`DohResponseCache::compact`].
pub struct DohResponseCache {
    pub(super) cache: DashMap<CacheKey, CachedAnswer, FxBuildHasher>,
    pub(super) max_entries: usize,
    pub(super) metrics: Arc<CacheMetrics>,
}

impl DohResponseCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: DashMap::with_capacity_and_hasher(max_entries.min(1024), FxBuildHasher),
            max_entries: max_entries.max(1),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    fn make_room(&self, now: Instant) {
        if self.cache.len() < self.max_entries {
            return;
        }

        self.purge_expired(now);
        if self.cache.len() < self.max_entries {
            return;
        }

        let victim = self
            .cache
            .iter()
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = victim {
            if self.cache.remove(&key).is_some() {
                self.metrics.evictions.fetch_add(1, AtomicOrdering::Relaxed);
                debug!(key = %key, "Evicted soonest-expiring answer");
            }
        }
    }
}

impl ResponseCache for DohResponseCache {
    fn get(&self, key: &CacheKey) -> Option<Bytes> {
        let now = Instant::now();
        let expired = match self.cache.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(entry.answer.clone());
            }
            Some(_) => true,
            None => false,
        };

        // The read guard is released above; removing while holding it would
        // deadlock the shard.
        if expired
            && self
                .cache
                .remove_if(key, |_, entry| entry.is_expired_at(now))
                .is_some()
        {
            self.metrics
                .lazy_deletions
                .fetch_add(1, AtomicOrdering::Relaxed);
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    fn put(&self, key: CacheKey, answer: Bytes, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }

        let now = Instant::now();
        if !self.cache.contains_key(&key) {
            self.make_room(now);
        }

        self.cache.insert(
            key,
            CachedAnswer {
                answer,
                expires_at: now + ttl,
            },
        );
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    fn len(&self) -> usize {
        self.cache.len()
    }
}
