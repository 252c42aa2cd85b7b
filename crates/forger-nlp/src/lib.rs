//! Forger NLP: document model, pipeline and sentiment traits.
//!
//! Provides the `NlpPipeline` trait for tokenization, sentence splitting,
//! tagging, noun chunks and entities, and the `SentimentScorer` trait for
//! polarity. The built-in `HeuristicPipeline` and `LexiconScorer` need no
//! model files.

pub mod heuristic;
pub mod pipeline;
pub mod sentiment;
pub mod stopwords;
pub mod types;

pub use heuristic::HeuristicPipeline;
pub use pipeline::NlpPipeline;
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use stopwords::StopwordSet;
pub use types::{Doc, EntityLabel, EntitySpan, NounChunk, PosTag, Sentence, Token};

use std::path::Path;
use std::sync::Arc;

use forger_core::Result;

/// Load the configured stopword file, or the built-in English list.
pub fn load_stopwords(path: Option<&Path>) -> Result<StopwordSet> {
    match path {
        Some(path) => {
            let stopwords = StopwordSet::load(path)?;
            tracing::info!("Loaded {} stopwords from {}", stopwords.len(), path.display());
            Ok(stopwords)
        }
        None => Ok(StopwordSet::english()),
    }
}

/// Create the NLP pipeline, flagging `stopwords` as stop tokens.
pub fn create_pipeline(stopwords: Arc<StopwordSet>) -> Arc<dyn NlpPipeline> {
    let pipeline = HeuristicPipeline::new(stopwords);
    tracing::info!("Using {} NLP pipeline", pipeline.name());
    Arc::new(pipeline)
}

/// Create the sentiment scorer.
pub fn create_scorer() -> Arc<dyn SentimentScorer> {
    Arc::new(LexiconScorer::new())
}
