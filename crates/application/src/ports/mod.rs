mod batch_dispatcher;
mod cache_maintenance_port;
mod response_cache;

pub use batch_dispatcher::BatchDispatcher;
pub use cache_maintenance_port::{CacheCompactionOutcome, CacheMaintenancePort};
pub use response_cache::ResponseCache;
