//! Scripted pipeline for unit tests.

use std::collections::HashMap;

use forger_core::{Error, Result};
use forger_nlp::{Doc, EntityLabel, EntitySpan, NlpPipeline, NounChunk, PosTag, Sentence, Token};

/// Returns a prepared [`Doc`] per input text; unknown texts fail.
#[derive(Default)]
pub struct ScriptedPipeline {
    docs: HashMap<String, Doc>,
}

impl ScriptedPipeline {
    pub fn with(mut self, doc: Doc) -> Self {
        self.docs.insert(doc.text.clone(), doc);
        self
    }
}

impl NlpPipeline for ScriptedPipeline {
    fn name(&self) -> &str {
        "scripted"
    }

    fn parse(&self, text: &str) -> Result<Doc> {
        if text.is_empty() {
            return Ok(Doc::default());
        }
        self.docs
            .get(text)
            .cloned()
            .ok_or_else(|| Error::Inference(format!("no scripted doc for {:?}", text)))
    }
}

/// One token: `(text, pos, head, entity)`.
pub type TokenDef<'a> = (&'a str, PosTag, usize, Option<EntityLabel>);

/// Build a doc from whitespace-separated token specs.
///
/// `sentences` and `chunks` are half-open token ranges; a chunk's root is
/// its last token. Entities are derived from runs of equal token labels.
pub fn build_doc(
    tokens: &[TokenDef<'_>],
    sentences: &[(usize, usize)],
    chunks: &[(usize, usize)],
) -> Doc {
    let mut text = String::new();
    let mut built = Vec::new();
    for (word, pos, head, entity) in tokens {
        if !text.is_empty() {
            text.push(' ');
        }
        let start = text.len();
        text.push_str(word);
        built.push(Token {
            text: word.to_string(),
            lemma: word.to_lowercase(),
            pos: *pos,
            is_stop: false,
            is_punct: *pos == PosTag::Punct,
            entity: entity.clone(),
            start,
            end: text.len(),
            head: *head,
        });
    }

    let mut entities: Vec<EntitySpan> = Vec::new();
    for (i, token) in built.iter().enumerate() {
        let Some(label) = &token.entity else { continue };
        let continues = i > 0
            && built[i - 1].entity.as_ref() == Some(label)
            && entities.last().is_some_and(|e| e.end == built[i - 1].end);
        if continues {
            if let Some(last) = entities.last_mut() {
                last.end = token.end;
                last.text = text[last.start..last.end].to_string();
            }
        } else {
            entities.push(EntitySpan {
                text: token.text.clone(),
                label: label.clone(),
                start: token.start,
                end: token.end,
            });
        }
    }

    let noun_chunks = chunks
        .iter()
        .map(|&(start, end)| NounChunk {
            text: text[built[start].start..built[end - 1].end].to_string(),
            start_token: start,
            end_token: end,
            root: end - 1,
        })
        .collect();

    Doc {
        text,
        tokens: built,
        sentences: sentences
            .iter()
            .map(|&(start_token, end_token)| Sentence {
                start_token,
                end_token,
            })
            .collect(),
        noun_chunks,
        entities,
    }
}

/// Mark tokens as pipeline stopwords.
pub fn with_stop_flags(mut doc: Doc, stop: &[&str]) -> Doc {
    for token in &mut doc.tokens {
        token.is_stop = stop.contains(&token.text.as_str());
    }
    doc
}
