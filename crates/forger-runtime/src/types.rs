//! Runtime types: inbound envelope, email body, outbound payload, outcomes.

use std::fmt;

use chrono::{DateTime, Utc};
use forger_classify::ClassificationRecord;
use forger_core::{Disposition, RedactionTarget};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pub/Sub push request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEnvelope {
    pub message: PubSubMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

/// The message inside a push request.
///
/// `data` is either base64-encoded UTF-8 JSON or an already-decoded object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubMessage {
    pub data: serde_json::Value,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(alias = "messageId")]
    pub message_id: String,
    #[serde(alias = "publishTime")]
    pub publish_time: String,
}

/// Email carried in the message data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailInfo {
    pub date_sent: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub title: Option<String>,
    pub content_type: Option<String>,
    pub content: Option<String>,
}

impl EmailInfo {
    /// Raw value of a redactable field.
    pub fn field(&self, target: RedactionTarget) -> Option<&str> {
        match target {
            RedactionTarget::Sender => self.sender.as_deref(),
            RedactionTarget::Recipient => self.recipient.as_deref(),
            RedactionTarget::Title => self.title.as_deref(),
        }
    }
}

/// Analysis result handed to the publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPayload {
    pub payload_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub date_sent: Option<String>,
    pub content_type: Option<String>,
    pub phrases: Vec<ClassificationRecord>,
    /// Redacted value per field name; fields absent from the email are omitted.
    pub redacted: IndexMap<String, String>,
    /// Error text per field whose redaction failed; its value is not published.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub redaction_errors: IndexMap<String, String>,
    pub processed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Where in the flow a message failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorStage {
    #[serde(rename = "MESSAGE_VALIDATION")]
    MessageValidation,
    #[serde(rename = "EMAIL_NLP_ANALYSIS_ERROR")]
    EmailNlpAnalysis,
    #[serde(rename = "PUSH_TO_PUBSUB")]
    PushToPubsub,
    #[serde(rename = "SENDING_TO_DLQ")]
    SendingToDlq,
}

impl ErrorStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MessageValidation => "MESSAGE_VALIDATION",
            Self::EmailNlpAnalysis => "EMAIL_NLP_ANALYSIS_ERROR",
            Self::PushToPubsub => "PUSH_TO_PUBSUB",
            Self::SendingToDlq => "SENDING_TO_DLQ",
        }
    }
}

impl fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling one push delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Analysed and published.
    Ack {
        message_id: String,
        publish_time: String,
        payload_id: Uuid,
    },
    /// Forwarded to the dead-letter topic; must not be redelivered.
    DeadLetter { stage: ErrorStage, detail: String },
    /// Transient or unexpected failure; the transport should redeliver.
    Retry { stage: ErrorStage, detail: String },
}

impl Outcome {
    pub fn disposition(&self) -> Disposition {
        match self {
            Outcome::Ack { .. } => Disposition::Ack,
            Outcome::DeadLetter { .. } => Disposition::DeadLetter,
            Outcome::Retry { .. } => Disposition::Retry,
        }
    }
}

/// Runtime status information.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeStatus {
    pub api_name: String,
    pub pipeline: String,
    pub scorer: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub redaction_targets: Vec<RedactionTarget>,
    pub output_topic: String,
    pub dead_letter_topic: String,
    pub skip_empty_sentences: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_both_casings() {
        let snake: PushEnvelope = serde_json::from_value(serde_json::json!({
            "message": {"data": "e30=", "attributes": {}, "message_id": "1", "publish_time": "t"}
        }))
        .unwrap();
        assert_eq!(snake.message.message_id, "1");

        let camel: PushEnvelope = serde_json::from_value(serde_json::json!({
            "message": {"data": {"content": "hi"}, "messageId": "2", "publishTime": "t"},
            "subscription": "projects/p/subscriptions/s"
        }))
        .unwrap();
        assert_eq!(camel.message.message_id, "2");
        assert!(camel.message.attributes.is_empty());
    }

    #[test]
    fn test_email_info_fields_optional() {
        let email: EmailInfo = serde_json::from_str(r#"{"content": "x", "extra": 1}"#).unwrap();
        assert_eq!(email.content.as_deref(), Some("x"));
        assert!(email.field(RedactionTarget::Sender).is_none());
    }

    #[test]
    fn test_error_stage_serialization() {
        let json = serde_json::to_string(&ErrorStage::EmailNlpAnalysis).unwrap();
        assert_eq!(json, "\"EMAIL_NLP_ANALYSIS_ERROR\"");
        assert_eq!(ErrorStage::SendingToDlq.to_string(), "SENDING_TO_DLQ");
    }

    #[test]
    fn test_outcome_disposition() {
        let outcome = Outcome::DeadLetter {
            stage: ErrorStage::MessageValidation,
            detail: "bad".into(),
        };
        assert_eq!(outcome.disposition(), Disposition::DeadLetter);
    }
}
