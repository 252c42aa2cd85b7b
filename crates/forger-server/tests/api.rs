//! HTTP route tests: drive the router in-process with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use forger_core::ForgerConfig;
use forger_runtime::{MemoryPublisher, Orchestrator};
use forger_server::routes::build_router;
use forger_server::state::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const OUTPUT_TOPIC: &str = "career_forger_analysis.topic";
const DLQ_TOPIC: &str = "career_forger_analysis_dlq.topic";

fn app() -> (Router, Arc<MemoryPublisher>) {
    let config = ForgerConfig::default();
    let publisher = Arc::new(MemoryPublisher::new());
    let orchestrator = Orchestrator::from_config(&config, publisher.clone()).unwrap();
    let state = Arc::new(AppState::new(config, orchestrator));
    (build_router(state), publisher)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header("content-type", "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };
    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn push_body(data: Value) -> String {
    json!({
        "message": {
            "data": data,
            "attributes": {"bucketId": "inbox"},
            "message_id": "1001",
            "publish_time": "2024-06-01T12:00:00Z"
        },
        "subscription": "projects/demo/subscriptions/forger"
    })
    .to_string()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"Status": "OK"}));
}

#[tokio::test]
async fn test_status() {
    let (app, _) = app();
    let (status, body) = send(app, "GET", "/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pipeline"], "heuristic-en");
    assert_eq!(body["redaction_targets"], json!(["sender", "recipient", "title"]));
    assert_eq!(body["output_topic"], OUTPUT_TOPIC);
}

#[tokio::test]
async fn test_push_success() {
    let (app, publisher) = app();
    let email = json!({
        "sender": "Jane Doe",
        "content": "Excellent presentation skills."
    });
    let data = Value::String(STANDARD.encode(email.to_string()));
    let (status, body) = send(app, "POST", "/", Some(push_body(data))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Success");
    assert_eq!(body["pubsub_message_id"], "1001");
    assert_eq!(body["pubsub_publish_timestamp"], "2024-06-01T12:00:00Z");
    assert!(body["acknowledge_timestamp"].is_string());

    let out = publisher.published_to(OUTPUT_TOPIC);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].data["redacted"]["sender"], "Jane [REDACTED]");
}

#[tokio::test]
async fn test_push_without_content_is_dead_lettered() {
    let (app, publisher) = app();
    let (status, body) = send(app, "POST", "/", Some(push_body(json!({"title": "hi"})))).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["exception"], "ManualDLQError");
    assert!(body["detail"].as_str().unwrap().contains("content"));

    let dlq = publisher.published_to(DLQ_TOPIC);
    assert_eq!(dlq.len(), 1);
    assert_eq!(dlq[0].data, json!({"title": "hi"}));
    assert_eq!(dlq[0].attributes["error_stage"], "MESSAGE_VALIDATION");
}

#[tokio::test]
async fn test_invalid_envelope_is_dead_lettered() {
    let (app, publisher) = app();
    let body = json!({"message": {"data": {"content": "hello"}, "publishTime": "t"}}).to_string();
    let (status, body) = send(app, "POST", "/", Some(body)).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["exception"], "Request Validation Error");

    let dlq = publisher.published_to(DLQ_TOPIC);
    assert_eq!(dlq.len(), 1);
    assert_eq!(dlq[0].data, json!({"content": "hello"}));
    assert_eq!(dlq[0].attributes["source_publish_time"], "t");
    assert_eq!(dlq[0].attributes["source_message_uuid"], "");
}

#[tokio::test]
async fn test_non_json_body_is_accepted_without_dead_letter() {
    let (app, publisher) = app();
    let (status, body) = send(app, "POST", "/", Some("not json".to_string())).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["exception"], "Request Validation Error");
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn test_publish_failure_requests_retry() {
    let (app, publisher) = app();
    publisher.fail_on(OUTPUT_TOPIC);
    let (status, body) = send(app, "POST", "/", Some(push_body(json!({"content": "Good work."})))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["exception"], "PubsubReprocessError");
}

#[tokio::test]
async fn test_dead_letter_failure_reports_publish_error() {
    let (app, publisher) = app();
    publisher.fail_on(DLQ_TOPIC);
    let (status, body) = send(app, "POST", "/", Some(push_body(json!({"sender": "x"})))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["exception"], "Pubsub Publish Error");
}

#[tokio::test]
async fn test_analyse_endpoint() {
    let (app, publisher) = app();
    let email = json!({
        "recipient": "bob@acme.com",
        "content": "Late reports. Excellent presentation skills."
    });
    let (status, body) = send(app, "POST", "/v1/analyse", Some(email.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Success");
    assert_eq!(body["response"]["redacted"]["recipient"], "[REDACTED]@acme.com");
    let phrases = body["response"]["phrases"].as_array().unwrap();
    assert!(phrases
        .iter()
        .any(|p| p["phrase"] == "excellent presentation skills" && p["category"] == "strengths"));
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn test_analyse_without_content_is_unprocessable() {
    let (app, _) = app();
    let (status, body) = send(app, "POST", "/v1/analyse", Some(json!({"title": "x"}).to_string())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["exception"], "Request Validation Error");
}

#[tokio::test]
async fn test_analyse_malformed_body_is_unprocessable() {
    let (app, publisher) = app();
    let (status, body) = send(app, "POST", "/v1/analyse", Some("{\"content\": ".into())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["exception"], "Request Validation Error");
    assert!(body["detail"].as_str().unwrap().contains("not valid JSON"));
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn test_analyse_without_content_type() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/analyse")
        .body(Body::from(json!({"content": "Excellent teamwork."}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
