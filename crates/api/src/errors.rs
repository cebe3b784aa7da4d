use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use doh_relay_domain::DomainError;
use serde_json::json;

/// Renders a [`DomainError`] as the relay's JSON error envelope:
///
/// ```json
/// {"error":{"timestamp":1700000000000,"code":502,"message":"All upstream DoH failed"}}
/// ```
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            DomainError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DomainError::MessageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            DomainError::UpstreamsExhausted => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            DomainError::UnsupportedMethod(_) => {
                "Method Not Allowed: only GET/POST supported".to_string()
            }
            DomainError::InvalidRequest(reason) => format!("Bad Request: {}", reason),
            DomainError::MessageTooLarge { .. } => "DNS message too large".to_string(),
            DomainError::UpstreamsExhausted => self.0.to_string(),
            _ => "internal error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "timestamp": chrono::Utc::now().timestamp_millis(),
                "code": status.as_u16(),
                "message": self.message(),
            }
        });

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
        }
        response
    }
}
