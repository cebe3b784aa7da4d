use anyhow::Context;
use doh_relay_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Logged once the subscriber is installed.
pub fn log_config_summary(config: &Config) {
    info!(
        bind_address = %config.server.bind_address,
        port = config.server.port,
        path = %config.server.path,
        upstreams = config.relay.upstreams.len(),
        batch_size = config.relay.batch_size,
        max_batches = config.relay.max_batches,
        attempt_timeout_ms = config.relay.attempt_timeout_ms,
        worst_case_latency_ms = config.relay.worst_case_latency().as_millis() as u64,
        soft_failure_policy = config.relay.soft_failure_policy.as_str(),
        cache_enabled = config.cache.enabled,
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );
}
