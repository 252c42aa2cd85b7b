//! Text normalization: lower-case, sentence split, token filtering.

use std::sync::Arc;

use forger_core::{Error, Result};
use forger_nlp::{NlpPipeline, StopwordSet, Token};

use crate::policy::EntityPolicy;

/// Turns raw email text into cleaned sentences.
///
/// A token survives when it is not flagged as a stopword by the pipeline,
/// not in the configured stopword set, not punctuation, and not part of an
/// excluded entity. Survivors are joined with single spaces.
pub struct TextNormalizer {
    pipeline: Arc<dyn NlpPipeline>,
    stopwords: Arc<StopwordSet>,
    policy: EntityPolicy,
    skip_empty: bool,
}

impl TextNormalizer {
    pub fn new(pipeline: Arc<dyn NlpPipeline>, stopwords: Arc<StopwordSet>) -> Self {
        Self {
            pipeline,
            stopwords,
            policy: EntityPolicy::default(),
            skip_empty: false,
        }
    }

    pub fn with_policy(mut self, policy: EntityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Drop sentences that end up with no tokens instead of keeping `""`.
    pub fn skip_empty_sentences(mut self, skip: bool) -> Self {
        self.skip_empty = skip;
        self
    }

    pub fn normalize(&self, raw: &str) -> Result<Vec<String>> {
        let lowered = raw.to_lowercase();
        let doc = self.pipeline.parse(&lowered)?;

        let mut cleaned = Vec::with_capacity(doc.sentences.len());
        for sentence in &doc.sentences {
            let tokens = doc.sentence_tokens(sentence).ok_or_else(|| {
                Error::Inference(format!(
                    "{} returned sentence {}..{} outside {} tokens",
                    self.pipeline.name(),
                    sentence.start_token,
                    sentence.end_token,
                    doc.tokens.len()
                ))
            })?;
            let kept: Vec<&str> = tokens
                .iter()
                .filter(|token| self.keep(token))
                .map(|token| token.text.as_str())
                .collect();
            if kept.is_empty() && self.skip_empty {
                continue;
            }
            cleaned.push(kept.join(" "));
        }

        tracing::debug!(
            "Normalized {} sentences into {} cleaned",
            doc.sentences.len(),
            cleaned.len()
        );
        Ok(cleaned)
    }

    fn keep(&self, token: &Token) -> bool {
        !token.is_stop
            && !token.is_punct
            && !self.stopwords.contains(&token.text)
            && !token
                .entity
                .as_ref()
                .is_some_and(|label| self.policy.is_excluded(label))
    }
}
