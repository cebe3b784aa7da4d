mod compaction;
mod metrics;
mod storage;

pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
pub use storage::DohResponseCache;
