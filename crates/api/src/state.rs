use doh_relay_application::ports::ResponseCache;
use doh_relay_application::use_cases::RelayQueryUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayQueryUseCase>,
    pub cache: Option<Arc<dyn ResponseCache>>,
    pub max_body_bytes: usize,
}
