//! Sentence segmentation, noun chunking and a shallow dependency attachment.
//!
//! The attachment is flat: every sentence has one root (its
//! first main verb when there is one), noun chunks hang off the nearest
//! verb, and chunk-internal tokens hang off the chunk root.

use std::ops::Range;

use super::tokenizer::{RawToken, TokenKind};
use crate::types::PosTag;

const TERMINALS: &[&str] = &[".", "!", "?", "…"];
const CLOSERS: &[&str] = &["\"", "'", ")", "]", "”", "’"];
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
];

/// Split a token stream into sentence ranges.
///
/// A sentence ends after terminal punctuation (plus any closing quotes or
/// brackets) that is followed by whitespace or the end of input, unless the
/// full stop closes a known abbreviation. A blank line also ends a sentence.
pub(crate) fn split_sentences(text: &str, tokens: &[RawToken<'_>]) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let mut end = i + 1;

        let mut boundary = false;
        if token.kind == TokenKind::Punct && TERMINALS.contains(&token.text) {
            while end < tokens.len()
                && tokens[end].kind == TokenKind::Punct
                && (TERMINALS.contains(&tokens[end].text) || CLOSERS.contains(&tokens[end].text))
                && tokens[end].start == tokens[end - 1].end
            {
                end += 1;
            }
            let followed_by_space = end == tokens.len() || tokens[end].start > tokens[end - 1].end;
            let abbreviation = token.text == "."
                && i > 0
                && tokens[i - 1].end == token.start
                && ABBREVIATIONS.contains(&tokens[i - 1].text.to_lowercase().as_str());
            boundary = followed_by_space && !abbreviation;
        }
        if !boundary && end < tokens.len() {
            let gap = &text[tokens[end - 1].end..tokens[end].start];
            boundary = gap.matches('\n').count() >= 2;
        }

        if boundary || end == tokens.len() {
            sentences.push(start..end);
            start = end;
        }
        i = end;
    }
    sentences
}

/// Noun chunks of one sentence as absolute token ranges.
///
/// A chunk is `DET? (ADJ|NUM)* (NOUN|PROPN)+`, or a standalone pronoun.
pub(crate) fn noun_chunks(pos: &[PosTag], sentence: Range<usize>) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    let mut i = sentence.start;

    while i < sentence.end {
        if pos[i] == PosTag::Pron {
            chunks.push(i..i + 1);
            i += 1;
            continue;
        }
        let start = i;
        let mut j = i;
        if pos[j] == PosTag::Det {
            j += 1;
        }
        while j < sentence.end && matches!(pos[j], PosTag::Adj | PosTag::Num) {
            j += 1;
        }
        let nouns_start = j;
        while j < sentence.end && pos[j].is_noun() {
            j += 1;
        }
        if j > nouns_start {
            chunks.push(start..j);
            i = j;
        } else {
            i += 1;
        }
    }
    chunks
}

/// Head index for every token of one sentence.
///
/// `chunks` are the sentence's noun chunks; a chunk's root is its last token.
pub(crate) fn attach_heads(
    pos: &[PosTag],
    sentence: Range<usize>,
    chunks: &[Range<usize>],
) -> Vec<usize> {
    if sentence.is_empty() {
        return Vec::new();
    }

    let verbs: Vec<usize> = sentence.clone().filter(|&i| pos[i] == PosTag::Verb).collect();
    let root = verbs
        .first()
        .copied()
        .or_else(|| sentence.clone().find(|&i| pos[i] == PosTag::Aux))
        .or_else(|| chunks.first().map(|c| c.end - 1))
        .or_else(|| sentence.clone().find(|&i| pos[i] != PosTag::Punct))
        .unwrap_or(sentence.start);

    let offset = sentence.start;
    let mut heads = vec![root; sentence.len()];

    for i in sentence.clone() {
        if pos[i] == PosTag::Aux && i != root {
            if let Some(&next_verb) = verbs.iter().find(|&&v| v > i) {
                heads[i - offset] = next_verb;
            }
        }
    }

    for chunk in chunks {
        let chunk_root = chunk.end - 1;
        for i in chunk.start..chunk_root {
            heads[i - offset] = chunk_root;
        }
        if chunk_root == root {
            continue;
        }
        let governor = verbs
            .iter()
            .rev()
            .find(|&&v| v < chunk.start)
            .or_else(|| verbs.iter().find(|&&v| v >= chunk.end))
            .copied()
            .unwrap_or(root);
        heads[chunk_root - offset] = governor;
    }

    heads[root - offset] = root;
    heads
}
