//! Rule-based English pipeline.
//!
//! Needs no model files: a regex tokenizer, list/suffix POS tagging, a
//! gazetteer entity recognizer and a shallow attachment parser. Good enough
//! for the short feedback emails the service sees; a statistical pipeline can
//! be swapped in behind [`NlpPipeline`].

mod entities;
mod lemma;
mod parser;
mod tagger;
mod tokenizer;

use std::sync::Arc;

use forger_core::Result;

use crate::pipeline::NlpPipeline;
use crate::stopwords::StopwordSet;
use crate::types::{Doc, EntitySpan, NounChunk, PosTag, Sentence, Token};

pub struct HeuristicPipeline {
    stopwords: Arc<StopwordSet>,
}

impl HeuristicPipeline {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self { stopwords }
    }

    /// Pipeline flagging the built-in English stopwords.
    pub fn english() -> Self {
        Self::new(Arc::new(StopwordSet::english()))
    }
}

impl NlpPipeline for HeuristicPipeline {
    fn name(&self) -> &str {
        "heuristic-en"
    }

    fn parse(&self, text: &str) -> Result<Doc> {
        let raw = tokenizer::tokenize(text);
        let ranges = parser::split_sentences(text, &raw);

        let mut tokens: Vec<Token> = Vec::with_capacity(raw.len());
        let mut pos: Vec<PosTag> = Vec::with_capacity(raw.len());
        for range in &ranges {
            for (offset, tagged) in tagger::tag_sentence(&raw[range.clone()])
                .into_iter()
                .enumerate()
            {
                let token = &raw[range.start + offset];
                let is_punct = tagged.pos == PosTag::Punct;
                pos.push(tagged.pos);
                tokens.push(Token {
                    text: token.text.to_string(),
                    lemma: tagged.lemma,
                    pos: tagged.pos,
                    is_stop: !is_punct && self.stopwords.contains(token.text),
                    is_punct,
                    entity: None,
                    start: token.start,
                    end: token.end,
                    head: range.start + offset,
                });
            }
        }

        let mut sentences = Vec::with_capacity(ranges.len());
        let mut noun_chunks = Vec::new();
        let mut entity_spans = Vec::new();

        for range in ranges {
            let chunks = parser::noun_chunks(&pos, range.clone());
            let heads = parser::attach_heads(&pos, range.clone(), &chunks);
            for (offset, head) in heads.into_iter().enumerate() {
                tokens[range.start + offset].head = head;
            }

            for chunk in chunks {
                let start = tokens[chunk.start].start;
                let end = tokens[chunk.end - 1].end;
                noun_chunks.push(NounChunk {
                    text: text[start..end].to_string(),
                    start_token: chunk.start,
                    end_token: chunk.end,
                    root: chunk.end - 1,
                });
            }

            for (span, label) in entities::recognize(&raw, &pos, range.clone()) {
                let start = tokens[span.start].start;
                let end = tokens[span.end - 1].end;
                for token in &mut tokens[span.clone()] {
                    token.entity = Some(label.clone());
                }
                entity_spans.push(EntitySpan {
                    text: text[start..end].to_string(),
                    label,
                    start,
                    end,
                });
            }

            sentences.push(Sentence {
                start_token: range.start,
                end_token: range.end,
            });
        }

        tracing::debug!(
            "Parsed {} tokens, {} sentences, {} entities",
            tokens.len(),
            sentences.len(),
            entity_spans.len()
        );

        Ok(Doc {
            text: text.to_string(),
            tokens,
            sentences,
            noun_chunks,
            entities: entity_spans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityLabel;

    #[test]
    fn test_empty_text() {
        let doc = HeuristicPipeline::english().parse("").unwrap();
        assert!(doc.tokens.is_empty());
        assert!(doc.sentences.is_empty());
    }

    #[test]
    fn test_stop_and_punct_flags() {
        let doc = HeuristicPipeline::english()
            .parse("alice and bob went to the store.")
            .unwrap();
        let kept: Vec<&str> = doc
            .tokens
            .iter()
            .filter(|t| !t.is_stop && !t.is_punct)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(kept, vec!["alice", "bob", "went", "store"]);
    }

    #[test]
    fn test_custom_stopwords() {
        let pipeline = HeuristicPipeline::new(Arc::new(StopwordSet::from_words(["store"])));
        let doc = pipeline.parse("the store").unwrap();
        assert!(!doc.tokens[0].is_stop);
        assert!(doc.tokens[1].is_stop);
    }

    #[test]
    fn test_sentences_chunks_and_heads() {
        let doc = HeuristicPipeline::english()
            .parse("The team helped deliver the project. Great work!")
            .unwrap();
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentence_text(&doc.sentences[1]), "Great work!");

        let chunks: Vec<&str> = doc.noun_chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(chunks, vec!["The team", "the project", "Great work"]);

        let team = &doc.noun_chunks[0];
        let head = doc.tokens[team.root].head;
        assert_eq!(doc.tokens[head].text, "helped");
        let verbs: Vec<&str> = doc
            .children(head)
            .filter(|t| t.pos == PosTag::Verb)
            .map(|t| t.lemma.as_str())
            .collect();
        assert_eq!(verbs, vec!["deliver"]);
    }

    #[test]
    fn test_entities_are_marked_on_tokens() {
        let doc = HeuristicPipeline::english()
            .parse("Ask John Smith at john.smith@acme.com")
            .unwrap();
        let labels: Vec<&EntityLabel> = doc.entities.iter().map(|e| &e.label).collect();
        assert_eq!(labels, vec![&EntityLabel::Person, &EntityLabel::Email]);
        assert_eq!(doc.entities[0].text, "John Smith");
        assert_eq!(doc.tokens[1].entity, Some(EntityLabel::Person));
        assert_eq!(doc.tokens[2].entity, Some(EntityLabel::Person));
        assert_eq!(&doc.text[doc.entities[1].start..doc.entities[1].end], "john.smith@acme.com");
    }
}
