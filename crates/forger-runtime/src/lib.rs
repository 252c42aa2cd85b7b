//! Forger Runtime: message decoding, the analysis orchestrator and the
//! publisher seam.
//!
//! The orchestrator owns the shared pipeline, classifier and redactor and
//! turns each push delivery into an [`Outcome`] the transport acts on.

pub mod decode;
pub mod orchestrator;
pub mod publish;
pub mod types;

pub use decode::{
    decode_data, decode_email, decode_value, original_data, parse_email, validate_email,
};
pub use orchestrator::{Components, Orchestrator};
pub use publish::{LogPublisher, MemoryPublisher, OutboundMessage, Publisher};
pub use types::*;
