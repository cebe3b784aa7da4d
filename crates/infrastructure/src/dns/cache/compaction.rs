use super::storage::DohResponseCache;
use async_trait::async_trait;
use doh_relay_application::ports::{CacheCompactionOutcome, CacheMaintenancePort};
use doh_relay_domain::DomainError;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Instant;
use tracing::debug;

impl DohResponseCache {
    /// Drops every entry that has expired by `now`. Returns how many went.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.cache.len();
        self.cache.retain(|_, entry| !entry.is_expired_at(now));
        before.saturating_sub(self.cache.len())
    }

    pub fn compact(&self) -> usize {
        let removed = self.purge_expired(Instant::now());

        if removed > 0 {
            self.metrics
                .compactions
                .fetch_add(1, AtomicOrdering::Relaxed);

            debug!(
                removed,
                cache_size = self.cache.len(),
                "Cache compaction completed"
            );
        }

        removed
    }
}

#[async_trait]
impl CacheMaintenancePort for DohResponseCache {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        let entries_removed = self.compact();
        Ok(CacheCompactionOutcome {
            entries_removed,
            cache_size: self.cache.len(),
        })
    }
}
