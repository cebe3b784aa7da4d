use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub upstreams: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_answers: Option<usize>,
}
