use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route the DoH endpoint is mounted on.
    #[serde(default = "default_path")]
    pub path: String,

    /// Largest accepted POST body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Responses at or below this size are never gzip-encoded.
    #[serde(default = "default_compression_min_bytes")]
    pub compression_min_bytes: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            path: default_path(),
            max_body_bytes: default_max_body_bytes(),
            compression_min_bytes: default_compression_min_bytes(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8053
}

fn default_path() -> String {
    "/dns-query".to_string()
}

fn default_max_body_bytes() -> usize {
    4096
}

fn default_compression_min_bytes() -> u16 {
    100
}
