//! HTTP route handlers.

pub mod analyse;
pub mod health;
pub mod pubsub;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(pubsub::routes())
        .merge(analyse::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Error body shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub exception: String,
    pub detail: String,
}

pub(crate) fn error_response(
    status: StatusCode,
    exception: &str,
    detail: impl Into<String>,
) -> Response {
    let body = ErrorResponse {
        exception: exception.to_string(),
        detail: detail.into(),
    };
    (status, Json(body)).into_response()
}
