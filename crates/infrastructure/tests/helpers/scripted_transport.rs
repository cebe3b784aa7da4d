use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_domain::{DomainError, QueryRequest, UpstreamEndpoint};
use doh_relay_infrastructure::dns::{DohTransport, TransportResponse};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Builds a minimal DNS response header with the given id and RCODE.
pub fn dns_answer(id: u16, rcode: u8) -> Bytes {
    let [hi, lo] = id.to_be_bytes();
    Bytes::from(vec![hi, lo, 0x81, 0x80 | (rcode & 0x0f), 0, 1, 0, 1, 0, 0, 0, 0])
}

#[derive(Clone)]
pub enum Reply {
    Respond { status: u16, body: Bytes },
    Error,
    Hang,
}

impl Reply {
    pub fn ok(body: Bytes) -> Self {
        Self::Respond { status: 200, body }
    }

    pub fn status(status: u16) -> Self {
        Self::Respond {
            status,
            body: Bytes::new(),
        }
    }
}

struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Transport whose per-upstream behaviour is scripted up front.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: HashMap<String, (Duration, Reply)>,
    live: Arc<AtomicUsize>,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, url: &str, delay_ms: u64, reply: Reply) -> Self {
        self.scripts
            .insert(url.to_string(), (Duration::from_millis(delay_ms), reply));
        self
    }

    /// Exchanges currently in flight.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Exchanges that ran to the end of their scripted delay.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DohTransport for ScriptedTransport {
    async fn send(
        &self,
        endpoint: &UpstreamEndpoint,
        _request: &QueryRequest,
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let _guard = LiveGuard::enter(&self.live);
        self.started.fetch_add(1, Ordering::SeqCst);

        let (delay, reply) = self
            .scripts
            .get(endpoint.url())
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::Error));

        if matches!(reply, Reply::Hang) {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);

        match reply {
            Reply::Respond { status, body } => Ok(TransportResponse {
                status,
                bytes: if status == 200 { body } else { Bytes::new() },
            }),
            _ => Err(DomainError::TransportFailure {
                server: endpoint.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}
