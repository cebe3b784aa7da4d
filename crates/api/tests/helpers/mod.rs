#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Bytes;
use axum::Router;
use doh_relay_api::{create_doh_routes, AppState, RouteSettings};
use doh_relay_application::ports::{BatchDispatcher, ResponseCache};
use doh_relay_application::use_cases::RelayQueryUseCase;
use doh_relay_domain::{BatchOutcome, QueryRequest, RelayConfig, UpstreamEndpoint, UpstreamRegistry};
use doh_relay_infrastructure::dns::DohResponseCache;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MAX_BODY_BYTES: usize = 4096;

pub fn dns_answer(id: u16, rcode: u8, len: usize) -> Bytes {
    let [hi, lo] = id.to_be_bytes();
    let mut message = vec![hi, lo, 0x81, 0x80 | (rcode & 0x0f)];
    message.resize(len.max(4), 0);
    Bytes::from(message)
}

/// Pops one scripted outcome per batch; `AllHard` once exhausted.
pub struct StubDispatcher {
    script: Mutex<VecDeque<BatchOutcome>>,
    calls: AtomicUsize,
}

impl StubDispatcher {
    pub fn new(outcomes: Vec<BatchOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BatchDispatcher for StubDispatcher {
    async fn race(&self, _batch: &[UpstreamEndpoint], _request: &QueryRequest) -> BatchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(BatchOutcome::AllHard)
    }
}

pub struct TestApp {
    pub router: Router,
    pub dispatcher: Arc<StubDispatcher>,
    pub cache: Arc<DohResponseCache>,
}

pub fn create_test_app(outcomes: Vec<BatchOutcome>) -> TestApp {
    let config = RelayConfig {
        upstreams: vec![
            "https://a.example/dns-query".to_string(),
            "https://b.example/dns-query".to_string(),
            "https://c.example/dns-query".to_string(),
            "https://d.example/dns-query".to_string(),
        ],
        batch_size: 2,
        max_batches: 2,
        ..RelayConfig::default()
    };
    let registry = UpstreamRegistry::from_urls(&config.upstreams).unwrap();
    let dispatcher = Arc::new(StubDispatcher::new(outcomes));
    let cache = Arc::new(DohResponseCache::new(128));

    let relay = RelayQueryUseCase::new(registry, dispatcher.clone(), &config)
        .with_cache(cache.clone(), Duration::from_secs(600));

    let state = AppState {
        relay: Arc::new(relay),
        cache: Some(cache.clone() as Arc<dyn ResponseCache>),
        max_body_bytes: MAX_BODY_BYTES,
    };
    let settings = RouteSettings {
        path: "/dns-query".to_string(),
        max_body_bytes: MAX_BODY_BYTES,
        compression_min_bytes: 100,
    };

    TestApp {
        router: create_doh_routes(state, &settings),
        dispatcher,
        cache,
    }
}
