//! Privacy protocol: PII redaction of raw message fields.
//!
//! Redaction is driven by the entity spans of an injected NLP pipeline and
//! rewrites each span in place with a configurable marker.

pub mod pii;

pub use pii::{Redaction, RedactionResult, Redactor};
