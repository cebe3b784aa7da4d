use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl LoggingConfig {
    pub fn is_valid_level(&self) -> bool {
        LEVELS
            .iter()
            .any(|level| self.level.eq_ignore_ascii_case(level))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
