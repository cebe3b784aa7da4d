use crate::handlers;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use doh_relay_domain::ServerConfig;
use tower_http::compression::{predicate::SizeAbove, CompressionLayer};

/// Per-deployment knobs the router needs from `[server]`.
#[derive(Debug, Clone)]
pub struct RouteSettings {
    pub path: String,
    pub max_body_bytes: usize,
    pub compression_min_bytes: u16,
}

impl From<&ServerConfig> for RouteSettings {
    fn from(server: &ServerConfig) -> Self {
        Self {
            path: server.path.clone(),
            max_body_bytes: server.max_body_bytes,
            compression_min_bytes: server.compression_min_bytes,
        }
    }
}

pub fn create_doh_routes(state: AppState, settings: &RouteSettings) -> Router {
    // SizeAbove compresses at or above its threshold; only strictly larger
    // bodies should be gzip-encoded.
    let compress_above = SizeAbove::new(settings.compression_min_bytes.saturating_add(1));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            &settings.path,
            get(handlers::doh_get)
                .post(handlers::doh_post)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(CompressionLayer::new().compress_when(compress_above))
        .with_state(state)
}
