use crate::{dto::HealthResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::debug;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("Health check requested");

    Json(HealthResponse {
        status: "ok",
        upstreams: state.relay.upstream_count(),
        cached_answers: state.cache.as_ref().map(|cache| cache.len()),
    })
}
