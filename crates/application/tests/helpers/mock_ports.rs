#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_application::ports::{BatchDispatcher, ResponseCache};
use doh_relay_domain::{BatchOutcome, CacheKey, QueryRequest, UpstreamEndpoint};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Returns scripted outcomes batch by batch; `AllHard` once the script runs out.
pub struct MockBatchDispatcher {
    script: Mutex<VecDeque<BatchOutcome>>,
    batches: Mutex<Vec<Vec<UpstreamEndpoint>>>,
}

impl MockBatchDispatcher {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_script(outcomes: Vec<BatchOutcome>) -> Self {
        let mock = Self::new();
        *mock.script.lock().unwrap() = outcomes.into();
        mock
    }

    pub fn call_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn batches(&self) -> Vec<Vec<UpstreamEndpoint>> {
        self.batches.lock().unwrap().clone()
    }
}

impl Default for MockBatchDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BatchDispatcher for MockBatchDispatcher {
    async fn race(&self, batch: &[UpstreamEndpoint], _request: &QueryRequest) -> BatchOutcome {
        self.batches.lock().unwrap().push(batch.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(BatchOutcome::AllHard)
    }
}

/// In-memory cache that ignores expiry and records what was written.
pub struct MockResponseCache {
    entries: Mutex<HashMap<CacheKey, Bytes>>,
    ttls: Mutex<Vec<Duration>>,
    gets: AtomicUsize,
}

impl MockResponseCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttls: Mutex::new(Vec::new()),
            gets: AtomicUsize::new(0),
        }
    }

    pub fn seed(&self, key: CacheKey, answer: Bytes) {
        self.entries.lock().unwrap().insert(key, answer);
    }

    pub fn put_count(&self) -> usize {
        self.ttls.lock().unwrap().len()
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::Relaxed)
    }

    pub fn ttls(&self) -> Vec<Duration> {
        self.ttls.lock().unwrap().clone()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

impl Default for MockResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache for MockResponseCache {
    fn get(&self, key: &CacheKey) -> Option<Bytes> {
        self.gets.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: CacheKey, answer: Bytes, ttl: Duration) {
        self.ttls.lock().unwrap().push(ttl);
        self.entries.lock().unwrap().insert(key, answer);
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

pub fn dns_answer(id: u16, rcode: u8) -> Bytes {
    let mut message = vec![0u8; 12];
    message[..2].copy_from_slice(&id.to_be_bytes());
    message[2] = 0x81;
    message[3] = 0x80 | (rcode & 0x0f);
    Bytes::from(message)
}
