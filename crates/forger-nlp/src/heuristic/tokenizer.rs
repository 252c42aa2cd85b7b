//! Regex tokenizer.
//!
//! Emails and phone numbers are kept whole so later stages can label them.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Email,
    Phone,
    Clitic,
    Word,
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawToken<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl RawToken<'_> {
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().map_or(false, |c| c.is_uppercase())
    }
}

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<email>[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})",
        r"|(?P<phone>\+\d{1,3}[ .-]?\(?\d{1,4}\)?(?:[ .-]?\d{2,4}){2,3}",
        r"|\(?\d{3,5}\)?[ .-]?\d{3,4}[ .-]?\d{3,4})",
        r"|(?P<clitic>['’](?:[sStTdDmM]|re|RE|ve|VE|ll|LL)\b)",
        r"|(?P<word>[\p{L}\p{N}]+(?:[-_][\p{L}\p{N}]+)*)",
        r"|(?P<punct>[^\s\p{L}\p{N}])",
    ))
    .expect("token pattern is valid")
});

pub(crate) fn tokenize(text: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    for caps in TOKEN_RE.captures_iter(text) {
        let (m, kind) = if let Some(m) = caps.name("email") {
            (m, TokenKind::Email)
        } else if let Some(m) = caps.name("phone") {
            (m, TokenKind::Phone)
        } else if let Some(m) = caps.name("clitic") {
            (m, TokenKind::Clitic)
        } else if let Some(m) = caps.name("word") {
            (m, TokenKind::Word)
        } else if let Some(m) = caps.name("punct") {
            (m, TokenKind::Punct)
        } else {
            continue;
        };
        tokens.push(RawToken {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
            kind,
        });
    }
    tokens
}
