use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::{body::Body, extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(State(ctx): State<Arc<Context>>, body: Body) -> impl IntoResponse {
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|_| response::Error::ServerError)?;

    service(ctx, request::Payload { body }).await
}
