pub mod cache;
pub mod race;
pub mod transport;

pub use cache::{CacheMetrics, CacheMetricsSnapshot, DohResponseCache};
pub use race::RaceDispatcher;
pub use transport::{DohTransport, HttpsTransport, TransportResponse};
