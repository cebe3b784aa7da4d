pub mod cache;
pub mod errors;
pub mod logging;
pub mod relay;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use relay::{RelayConfig, SoftFailurePolicy};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
