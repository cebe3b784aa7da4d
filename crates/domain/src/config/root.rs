use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::relay::RelayConfig;
use super::server::ServerConfig;
use crate::upstream::UpstreamEndpoint;

const LOCAL_CONFIG_PATH: &str = "doh-relay.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/doh-relay/config.toml";

/// Main configuration structure for the relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP ingress (bind address, port, DoH path, body limit)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream racing configuration
    #[serde(default)]
    pub relay: RelayConfig,

    /// Response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. doh-relay.toml in current directory
    /// 3. /etc/doh-relay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if !self.logging.is_valid_level() {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}' (expected trace, debug, info, warn or error)",
                self.logging.level
            )));
        }

        if !self.server.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "DoH path '{}' must start with '/'",
                self.server.path
            )));
        }

        if self.relay.upstreams.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        for upstream in &self.relay.upstreams {
            upstream
                .parse::<UpstreamEndpoint>()
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        if self.relay.batch_size == 0 {
            return Err(ConfigError::Validation(
                "batch_size must be at least 1".to_string(),
            ));
        }

        if self.relay.max_batches == 0 {
            return Err(ConfigError::Validation(
                "max_batches must be at least 1".to_string(),
            ));
        }

        if self.relay.attempt_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "attempt_timeout_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
