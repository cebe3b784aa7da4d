pub mod cache_maintenance;
pub mod runner;

pub use cache_maintenance::CacheMaintenanceJob;
pub use runner::JobRunner;
