//! Error types for Forger.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Message decode error: {0}")]
    Decode(String),

    #[error("Message validation error: {0}")]
    Validation(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// What the transport should do with a message after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Processed; acknowledge.
    Ack,
    /// Transient or unexpected failure; let the transport redeliver.
    Retry,
    /// Malformed input; never retry.
    DeadLetter,
}

impl Error {
    /// Failure signal for the transport. Only malformed input is dead-lettered.
    pub fn disposition(&self) -> Disposition {
        match self {
            Error::Decode(_) | Error::Validation(_) | Error::Json(_) => Disposition::DeadLetter,
            Error::Config(_)
            | Error::Inference(_)
            | Error::Publish(_)
            | Error::Io(_)
            | Error::Internal(_) => Disposition::Retry,
        }
    }
}
