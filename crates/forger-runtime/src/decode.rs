//! Pub/Sub message decoding and email validation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use forger_core::{Error, Result};
use serde_json::Value;

use crate::types::{EmailInfo, PubSubMessage};

/// Decode a message `data` field to text.
///
/// Strings are base64-encoded UTF-8; objects are already decoded and are
/// re-serialized. Any other JSON value is a decode error when `strict`,
/// otherwise its JSON text.
pub fn decode_data(data: &Value, strict: bool) -> Result<String> {
    match data {
        Value::String(encoded) => {
            let bytes = STANDARD
                .decode(encoded.trim())
                .map_err(|e| Error::Decode(format!("invalid base64 data: {}", e)))?;
            let text = String::from_utf8(bytes)
                .map_err(|e| Error::Decode(format!("data is not UTF-8: {}", e)))?;
            Ok(text.trim().to_string())
        }
        Value::Object(_) => Ok(data.to_string()),
        other if strict => Err(Error::Decode(format!(
            "unsupported data type: {}",
            json_type(other)
        ))),
        other => Ok(other.to_string()),
    }
}

/// Decode and validate the email carried by `message`.
pub fn decode_email(message: &PubSubMessage) -> Result<EmailInfo> {
    let text = decode_data(&message.data, true)?;
    parse_email(text.as_bytes())
}

/// Parse and validate an email from raw JSON bytes.
pub fn parse_email(raw: &[u8]) -> Result<EmailInfo> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| Error::Validation(format!("data is not valid JSON: {}", e)))?;
    let email: EmailInfo = serde_json::from_value(value)
        .map_err(|e| Error::Validation(format!("data is not a valid email: {}", e)))?;
    validate_email(&email)?;
    Ok(email)
}

/// Reject emails without analysable content.
pub fn validate_email(email: &EmailInfo) -> Result<()> {
    match email.content.as_deref() {
        None => Err(Error::Validation("missing field: content".into())),
        Some(content) if content.trim().is_empty() => {
            Err(Error::Validation("field content is empty".into()))
        }
        Some(_) => Ok(()),
    }
}

/// Best-effort decoded form of the message data, for dead-lettering.
pub fn original_data(message: &PubSubMessage) -> Value {
    decode_value(&message.data)
}

/// Decode a raw `data` value to JSON, falling back to the value itself when
/// it is not base64-encoded JSON.
pub fn decode_value(data: &Value) -> Value {
    decode_data(data, false)
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_else(|| data.clone())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
