//! Compiled keyword alternation patterns.

use forger_core::{Error, Result};
use regex::Regex;

use crate::lexicon::Lexicon;

/// How a pattern is applied to a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Keyword anywhere in the phrase.
    Search,
    /// Match anchored at the phrase start; `.*` before the keyword does not
    /// cross a line break.
    Anchored,
}

/// One label's case-insensitive whole-word alternation.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    label: String,
    regex: Regex,
}

impl CompiledPattern {
    pub fn compile(label: &str, keywords: &[String], mode: MatchMode) -> Result<Self> {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let source = match mode {
            MatchMode::Search => format!(r"(?i)\b(?:{alternation})\b"),
            MatchMode::Anchored => format!(r"(?i)^.*\b(?:{alternation})\b"),
        };
        let regex = Regex::new(&source)
            .map_err(|e| Error::Config(format!("invalid pattern for label {label:?}: {e}")))?;
        Ok(Self {
            label: label.to_string(),
            regex,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_match(&self, phrase: &str) -> bool {
        self.regex.is_match(phrase)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// All patterns of a lexicon, in declaration order.
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    patterns: Vec<CompiledPattern>,
}

impl CompiledLexicon {
    pub fn compile(lexicon: &Lexicon, mode: MatchMode) -> Result<Self> {
        let patterns = lexicon
            .iter()
            .map(|(label, keywords)| CompiledPattern::compile(label, keywords, mode))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// First label whose pattern matches.
    pub fn first_match(&self, phrase: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.is_match(phrase))
            .map(CompiledPattern::label)
    }

    /// Every matching label, in declaration order.
    pub fn matches<'a>(&'a self, phrase: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.patterns
            .iter()
            .filter(move |p| p.is_match(phrase))
            .map(CompiledPattern::label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(CompiledPattern::label)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
