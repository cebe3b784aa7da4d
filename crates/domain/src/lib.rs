//! doh-relay domain layer
pub mod config;
pub mod errors;
pub mod outcome;
pub mod query_request;
pub mod upstream;
pub mod verdict;

pub use config::{
    CacheConfig, CliOverrides, Config, ConfigError, LoggingConfig, RelayConfig, ServerConfig,
    SoftFailurePolicy,
};
pub use errors::DomainError;
pub use outcome::{BatchOutcome, RelayOutcome};
pub use query_request::{CacheKey, HttpMethod, QueryRequest};
pub use upstream::{UpstreamEndpoint, UpstreamRegistry};
pub use verdict::{classify, ResponseCode, TransportOutcome, Verdict};
