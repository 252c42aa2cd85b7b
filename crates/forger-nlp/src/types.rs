//! Annotated document model produced by an [`NlpPipeline`](crate::NlpPipeline).
//!
//! All spans are byte offsets into [`Doc::text`]; token ranges are
//! half-open indices into [`Doc::tokens`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tag (Universal Dependencies subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Det,
    Pron,
    Adp,
    Cconj,
    Num,
    Part,
    Punct,
    X,
}

impl PosTag {
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }
}

/// Named-entity label.
///
/// The privacy-relevant labels are closed variants; anything else a
/// pipeline emits is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Email,
    Phone,
    Other(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Email => "EMAIL",
            EntityLabel::Phone => "PHONE",
            EntityLabel::Other(label) => label,
        }
    }

    /// Parse a pipeline label; unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "PERSON" => EntityLabel::Person,
            "ORG" | "ORGANIZATION" => EntityLabel::Org,
            "GPE" => EntityLabel::Gpe,
            "EMAIL" => EntityLabel::Email,
            "PHONE" => EntityLabel::Phone,
            other => EntityLabel::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(EntityLabel::from_label(&label))
    }
}

/// A token with its linguistic attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
    pub is_punct: bool,
    /// Entity type of the span this token belongs to, if any.
    pub entity: Option<EntityLabel>,
    pub start: usize,
    pub end: usize,
    /// Index of the syntactic head; the sentence root points at itself.
    pub head: usize,
}

/// A sentence as a token range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub start_token: usize,
    pub end_token: usize,
}

/// A base noun phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounChunk {
    pub text: String,
    pub start_token: usize,
    pub end_token: usize,
    /// Index of the chunk's syntactic root token.
    pub root: usize,
}

/// A named-entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// A fully annotated document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<Sentence>,
    pub noun_chunks: Vec<NounChunk>,
    pub entities: Vec<EntitySpan>,
}

impl Doc {
    /// Tokens of a sentence, or `None` when its range is outside the document.
    pub fn sentence_tokens(&self, sentence: &Sentence) -> Option<&[Token]> {
        self.tokens.get(sentence.start_token..sentence.end_token)
    }

    /// Surface text of a sentence.
    pub fn sentence_text(&self, sentence: &Sentence) -> &str {
        match self.span_bounds(sentence.start_token, sentence.end_token) {
            Some((start, end)) => &self.text[start..end],
            None => "",
        }
    }

    /// Syntactic children of a token, in token order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(i, t)| *i != index && t.head == index)
            .map(|(_, t)| t)
    }

    fn span_bounds(&self, start_token: usize, end_token: usize) -> Option<(usize, usize)> {
        if start_token >= end_token || end_token > self.tokens.len() {
            return None;
        }
        Some((self.tokens[start_token].start, self.tokens[end_token - 1].end))
    }
}
