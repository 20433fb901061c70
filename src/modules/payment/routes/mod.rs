mod checkout;
mod notify;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/checkout", checkout::get_router())
        .nest("/notify", notify::get_router())
}
