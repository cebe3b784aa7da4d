use doh_relay_api::AppState;
use doh_relay_application::ports::{CacheMaintenancePort, ResponseCache};
use doh_relay_application::use_cases::RelayQueryUseCase;
use doh_relay_domain::{Config, UpstreamRegistry};
use doh_relay_infrastructure::dns::{DohResponseCache, HttpsTransport, RaceDispatcher};
use doh_relay_jobs::{CacheMaintenanceJob, JobRunner};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct RelayServices {
    pub relay: Arc<RelayQueryUseCase>,
    pub cache: Option<Arc<DohResponseCache>>,
}

impl RelayServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing relay services");

        let registry = UpstreamRegistry::from_urls(&config.relay.upstreams)?;
        let transport = Arc::new(HttpsTransport::new()?);
        let dispatcher = Arc::new(RaceDispatcher::new(
            transport,
            config.relay.attempt_timeout(),
        ));

        let mut relay = RelayQueryUseCase::new(registry, dispatcher, &config.relay);
        info!(
            upstreams = relay.upstream_count(),
            batch_budget = relay.batch_budget(),
            "Upstream registry ready"
        );

        let cache = if config.cache.enabled {
            let cache = Arc::new(DohResponseCache::new(config.cache.max_entries));
            relay = relay.with_cache(
                cache.clone(),
                Duration::from_secs(config.cache.ttl_secs),
            );
            info!(
                max_entries = config.cache.max_entries,
                ttl_secs = config.cache.ttl_secs,
                "Response cache enabled"
            );
            Some(cache)
        } else {
            info!("Response cache disabled");
            None
        };

        Ok(Self {
            relay: Arc::new(relay),
            cache,
        })
    }

    pub async fn start_jobs(&self, config: &Config, shutdown: CancellationToken) {
        let mut runner = JobRunner::new().with_shutdown_token(shutdown);

        if let Some(cache) = &self.cache {
            let maintenance: Arc<dyn CacheMaintenancePort> = cache.clone();
            runner = runner.with_cache_maintenance(
                CacheMaintenanceJob::new(maintenance)
                    .with_interval(config.cache.compaction_interval_secs),
            );
        }

        runner.start().await;
    }

    pub fn app_state(&self, config: &Config) -> AppState {
        AppState {
            relay: Arc::clone(&self.relay),
            cache: self
                .cache
                .as_ref()
                .map(|cache| cache.clone() as Arc<dyn ResponseCache>),
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}
