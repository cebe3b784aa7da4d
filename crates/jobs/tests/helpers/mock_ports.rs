use async_trait::async_trait;
use doh_relay_application::ports::{CacheCompactionOutcome, CacheMaintenancePort};
use doh_relay_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

pub struct MockCacheMaintenancePort {
    compaction_call_count: Arc<AtomicU64>,
    should_fail: AtomicBool,
    outcome: CacheCompactionOutcome,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            compaction_call_count: Arc::new(AtomicU64::new(0)),
            should_fail: AtomicBool::new(false),
            outcome: CacheCompactionOutcome::default(),
        }
    }

    pub fn with_outcome(mut self, outcome: CacheCompactionOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn compaction_call_count(&self) -> u64 {
        self.compaction_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        self.compaction_call_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::ConfigError("compaction failed".to_string()));
        }
        Ok(self.outcome.clone())
    }
}
