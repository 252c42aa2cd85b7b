//! Pub/Sub push subscriber.
//!
//! Status codes drive redelivery: 2xx acknowledges the message (processed or
//! dead-lettered), 5xx asks Pub/Sub to retry it.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use forger_runtime::{decode_value, ErrorStage, Outcome, PushEnvelope};
use serde_json::Value;
use tracing::{error, info, warn};

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", post(receive_push))
}

/// POST /: process one push delivery.
async fn receive_push(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let parsed = serde_json::from_slice::<Value>(&body)
        .map_err(|e| (Value::Null, e))
        .and_then(|raw| {
            serde_json::from_value::<PushEnvelope>(raw.clone()).map_err(|e| (raw, e))
        });
    let envelope = match parsed {
        Ok(envelope) => envelope,
        Err((raw, e)) => return reject_envelope(state, raw, e.to_string()).await,
    };

    let orchestrator = state.orchestrator.clone();
    match tokio::task::spawn_blocking(move || orchestrator.handle(&envelope)).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => {
            error!("Processing task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PubsubReprocessError",
                e.to_string(),
            )
        }
    }
}

fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Ack {
            message_id,
            publish_time,
            ..
        } => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "Success",
                "pubsub_message_id": message_id,
                "pubsub_publish_timestamp": publish_time,
                "acknowledge_timestamp": Utc::now().to_rfc3339(),
            })),
        )
            .into_response(),
        Outcome::DeadLetter { detail, .. } => {
            error_response(StatusCode::ACCEPTED, "ManualDLQError", detail)
        }
        Outcome::Retry {
            stage: ErrorStage::SendingToDlq,
            detail,
        } => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Pubsub Publish Error",
            detail,
        ),
        Outcome::Retry { detail, .. } => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "PubsubReprocessError",
            detail,
        ),
    }
}

/// Dead-letter the data of a body that is not a valid push envelope.
async fn reject_envelope(state: Arc<AppState>, raw: Value, detail: String) -> Response {
    info!("Request validation error: {}", detail);

    let message = raw.get("message");
    let data = message
        .and_then(|m| m.get("data"))
        .filter(|d| !d.is_null())
        .cloned();

    if let Some(data) = data {
        let message_id = string_field(message, &["message_id", "messageId"]);
        let publish_time = string_field(message, &["publish_time", "publishTime"]);
        let orchestrator = state.orchestrator.clone();
        let error_desc = detail.clone();

        let published = tokio::task::spawn_blocking(move || {
            orchestrator.dead_letter(
                &message_id,
                &publish_time,
                decode_value(&data),
                ErrorStage::MessageValidation,
                &error_desc,
            )
        })
        .await;

        match published {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                error!("Dead-lettering invalid request failed: {}", e);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Pubsub Publish Error",
                    e.to_string(),
                );
            }
            Err(e) => {
                error!("Dead-letter task failed: {}", e);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PubsubReprocessError",
                    e.to_string(),
                );
            }
        }
    } else {
        warn!("Invalid request carries no message data, nothing to dead-letter");
    }

    error_response(StatusCode::ACCEPTED, "Request Validation Error", detail)
}

fn string_field(message: Option<&Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| message.and_then(|m| m.get(*key)).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}
