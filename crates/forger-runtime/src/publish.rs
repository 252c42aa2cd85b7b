//! Outbound publisher seam.

use forger_core::{Error, Result};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

/// A message ready for a topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub data: serde_json::Value,
    pub attributes: IndexMap<String, String>,
}

impl OutboundMessage {
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            data,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Message transport. Returns the id assigned to the published message.
pub trait Publisher: Send + Sync {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<String>;
}

/// Publisher that only logs; used when no transport is configured.
#[derive(Debug, Default)]
pub struct LogPublisher;

impl Publisher for LogPublisher {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        tracing::info!(
            "Published message {} to {} ({} attributes)",
            id,
            topic,
            message.attributes.len()
        );
        tracing::debug!("Message body: {}", message.data);
        Ok(id)
    }
}

/// In-memory publisher recording every message, with optional failing topics.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    published: Mutex<Vec<(String, OutboundMessage)>>,
    failing: Mutex<Vec<String>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every publish to `topic` fail.
    pub fn fail_on(&self, topic: impl Into<String>) {
        self.failing.lock().push(topic.into());
    }

    /// Messages published so far, in order.
    pub fn published(&self) -> Vec<(String, OutboundMessage)> {
        self.published.lock().clone()
    }

    /// Messages published to `topic`.
    pub fn published_to(&self, topic: &str) -> Vec<OutboundMessage> {
        self.published
            .lock()
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Publisher for MemoryPublisher {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<String> {
        if self.failing.lock().iter().any(|t| t == topic) {
            return Err(Error::Publish(format!("topic {} unavailable", topic)));
        }
        let mut published = self.published.lock();
        published.push((topic.to_string(), message));
        Ok(published.len().to_string())
    }
}
