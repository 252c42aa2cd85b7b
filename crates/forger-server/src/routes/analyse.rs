//! Synchronous analysis API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use forger_core::Disposition;
use forger_runtime::parse_email;
use tracing::error;

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/v1/analyse", post(analyse_email))
}

/// POST /v1/analyse: analyse an email without publishing the result.
async fn analyse_email(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let email = match parse_email(&body) {
        Ok(email) => email,
        Err(e) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Request Validation Error",
                e.to_string(),
            )
        }
    };

    let orchestrator = state.orchestrator.clone();
    let result = tokio::task::spawn_blocking(move || orchestrator.analyse(&email, None)).await;

    match result {
        Ok(Ok(payload)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "Success",
                "response": payload,
            })),
        )
            .into_response(),
        Ok(Err(e)) if e.disposition() == Disposition::DeadLetter => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Request Validation Error",
            e.to_string(),
        ),
        Ok(Err(e)) => {
            error!("Analysis failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Error Occurred",
                "Internal Error Occurred",
            )
        }
        Err(e) => {
            error!("Analysis task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Error Occurred",
                "Internal Error Occurred",
            )
        }
    }
}
