use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    headers: HeaderMap,
    body: Body,
) -> impl IntoResponse {
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let payload = parse_payload(&headers, body.as_ref())?;

    service(ctx, payload).await
}

// The browser form posts urlencoded, API callers post JSON; every
// field is optional, so an empty body falls back to the defaults.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> Result<request::Payload, response::Error> {
    if body.is_empty() {
        return Ok(request::Payload::default());
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    match content_type.starts_with("application/json") {
        true => serde_json::from_slice(body).map_err(|err| {
            tracing::warn!("Failed to parse checkout body as json: {err}");
            response::Error::InvalidPayload
        }),
        false => serde_urlencoded::from_bytes(body).map_err(|err| {
            tracing::warn!("Failed to parse checkout body as form data: {err}");
            response::Error::InvalidPayload
        }),
    }
}
