//! Feedback phrase extraction from cleaned sentences.
//!
//! Each sentence is re-parsed; every noun chunk becomes a phrase, extended
//! with a governing verb lemma when the [`VerbSelector`] finds one, followed
//! by the sentence's non-excluded named entities.

use std::sync::Arc;

use forger_core::Result;
use forger_nlp::{Doc, NlpPipeline, NounChunk, PosTag};

use crate::policy::EntityPolicy;

/// Strategy picking the verb that extends a noun chunk.
pub trait VerbSelector: Send + Sync {
    /// Lemma of the verb to append to `chunk`, if any.
    fn select(&self, doc: &Doc, chunk: &NounChunk) -> Option<String>;
}

/// First verb among the children of the chunk root's head.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSiblingVerb;

impl VerbSelector for FirstSiblingVerb {
    fn select(&self, doc: &Doc, chunk: &NounChunk) -> Option<String> {
        let root = doc.tokens.get(chunk.root)?;
        doc.children(root.head)
            .find(|token| token.pos == PosTag::Verb)
            .map(|token| token.lemma.clone())
    }
}

impl<F> VerbSelector for F
where
    F: Fn(&Doc, &NounChunk) -> Option<String> + Send + Sync,
{
    fn select(&self, doc: &Doc, chunk: &NounChunk) -> Option<String> {
        self(doc, chunk)
    }
}

pub struct PhraseExtractor {
    pipeline: Arc<dyn NlpPipeline>,
    policy: EntityPolicy,
    verbs: Box<dyn VerbSelector>,
}

impl PhraseExtractor {
    pub fn new(pipeline: Arc<dyn NlpPipeline>) -> Self {
        Self {
            pipeline,
            policy: EntityPolicy::default(),
            verbs: Box::new(FirstSiblingVerb),
        }
    }

    pub fn with_policy(mut self, policy: EntityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_verb_selector(mut self, selector: impl VerbSelector + 'static) -> Self {
        self.verbs = Box::new(selector);
        self
    }

    /// Phrases in sentence order; chunks before entities, duplicates kept.
    pub fn extract(&self, sentences: &[String]) -> Result<Vec<String>> {
        let mut phrases = Vec::new();
        for sentence in sentences {
            let doc = self.pipeline.parse(sentence)?;

            for chunk in &doc.noun_chunks {
                match self.verbs.select(&doc, chunk) {
                    Some(verb) => phrases.push(format!("{} {}", chunk.text, verb)),
                    None => phrases.push(chunk.text.clone()),
                }
            }

            phrases.extend(
                doc.entities
                    .iter()
                    .filter(|entity| !self.policy.is_excluded(&entity.label))
                    .map(|entity| entity.text.clone()),
            );
        }
        tracing::debug!("Extracted {} phrases from {} sentences", phrases.len(), sentences.len());
        Ok(phrases)
    }
}
