//! Health and status routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use forger_runtime::RuntimeStatus;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/status", get(get_status))
}

/// GET /health: liveness probe.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "Status": "OK" }))
}

/// GET /v1/status: loaded lexicons, redaction policy and topics.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<RuntimeStatus> {
    Json(state.orchestrator.status())
}
