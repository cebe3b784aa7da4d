//! DNS-over-HTTPS relay endpoint (RFC 8484 framing).
//!
//! ```text
//! GET  <path>?dns=<base64url>   query string forwarded as normalized pairs
//! POST <path>                   raw DNS wire-format body
//! ```
//!
//! Answers go back as `application/dns-message`; everything else is the JSON
//! error envelope from [`ApiError`].

use crate::{errors::ApiError, state::AppState};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, RawQuery, State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use doh_relay_domain::{DomainError, QueryRequest, RelayOutcome};
use tracing::{debug, instrument};

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

#[instrument(skip_all, name = "doh_get")]
pub async fn doh_get(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    // `?&` decodes to no pairs but is still relayed.
    if matches!(raw_query.as_deref(), None | Some("")) {
        return Err(DomainError::InvalidRequest(
            "GET must include query parameters".to_string(),
        )
        .into());
    }

    let Query(params) = params.map_err(|e| {
        debug!(error = %e, "Rejecting malformed query string");
        DomainError::InvalidRequest("malformed query string".to_string())
    })?;

    relay(&state, QueryRequest::get(params)).await
}

#[instrument(skip_all, name = "doh_post")]
pub async fn doh_post(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let too_large = DomainError::MessageTooLarge {
        limit: state.max_body_bytes,
    };

    let body = match body {
        Ok(body) if body.len() > state.max_body_bytes => {
            debug!(size = body.len(), limit = state.max_body_bytes, "POST body too large");
            return Err(too_large.into());
        }
        Ok(body) => body,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(too_large.into()),
        Err(e) => {
            debug!(error = %e, "Failed to read POST body");
            return Err(DomainError::InvalidRequest("unreadable body".to_string()).into());
        }
    };

    relay(&state, QueryRequest::post(body)).await
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    debug!(method = %method, "Rejecting unsupported method");
    ApiError(DomainError::UnsupportedMethod(method.to_string()))
}

async fn relay(state: &AppState, request: QueryRequest) -> Result<Response, ApiError> {
    debug!(
        method = %request.method,
        message_id = ?request.message_id(),
        key = %request.cache_key,
        "Relaying DoH query"
    );

    match state.relay.execute(&request).await {
        RelayOutcome::Answer(answer) => Ok(dns_message_response(answer)),
        RelayOutcome::Exhausted => Err(DomainError::UpstreamsExhausted.into()),
    }
}

fn dns_message_response(answer: Bytes) -> Response {
    let mut response = answer.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(DNS_MESSAGE_CONTENT_TYPE),
    );
    response
}
