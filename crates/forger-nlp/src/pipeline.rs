//! NLP pipeline trait.
//!
//! The pipeline is the only source of tokenization, sentence boundaries,
//! part-of-speech tags, noun chunks and named entities. Implementations:
//! - `HeuristicPipeline`: rule-based English pipeline, no model files
//! - any external model adapter that can fill a [`Doc`]

use forger_core::Result;

use crate::types::Doc;

/// Trait for NLP pipelines.
///
/// Pipelines are shared read-only across request handlers, so `parse`
/// takes `&self` and implementations must not keep per-call state.
pub trait NlpPipeline: Send + Sync {
    /// Short identifier for logs and status output.
    fn name(&self) -> &str;

    /// Annotate a text. Failures are reported as `Error::Inference`.
    fn parse(&self, text: &str) -> Result<Doc>;
}
