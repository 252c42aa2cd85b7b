//! Gazetteer and capitalisation based entity recognition.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;

use super::tagger::FIRST_NAMES;
use super::tokenizer::{RawToken, TokenKind};
use crate::types::{EntityLabel, PosTag};

static TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["mr", "mrs", "ms", "miss", "dr", "prof", "sir", "madam"]
        .into_iter()
        .collect()
});

static ORG_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "inc", "ltd", "llc", "plc", "corp", "corporation", "group", "company", "bank",
        "university", "labs", "technologies", "solutions", "systems", "partners",
    ]
    .into_iter()
    .collect()
});

static KNOWN_ORGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "google", "microsoft", "amazon", "apple", "meta", "ibm", "netflix", "deloitte",
        "accenture", "oracle", "salesforce", "nhs", "bbc",
    ]
    .into_iter()
    .collect()
});

static PLACES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "london", "paris", "berlin", "madrid", "rome", "dublin", "edinburgh", "manchester",
        "new york", "san francisco", "los angeles", "chicago", "boston", "seattle",
        "toronto", "sydney", "tokyo", "singapore", "mumbai", "bangalore", "uk", "usa",
        "us", "england", "scotland", "wales", "ireland", "france", "germany", "spain",
        "italy", "india", "china", "japan", "canada", "australia", "united kingdom",
        "united states", "europe",
    ]
    .into_iter()
    .collect()
});

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Entities of one sentence as absolute token ranges.
pub(crate) fn recognize(
    tokens: &[RawToken<'_>],
    pos: &[PosTag],
    sentence: Range<usize>,
) -> Vec<(Range<usize>, EntityLabel)> {
    let mut found: Vec<(Range<usize>, EntityLabel)> = Vec::new();
    let mut i = sentence.start;

    while i < sentence.end {
        let token = &tokens[i];
        let lower = token.text.to_lowercase();

        match token.kind {
            TokenKind::Email => {
                found.push((i..i + 1, EntityLabel::Email));
                i += 1;
                continue;
            }
            TokenKind::Phone => {
                found.push((i..i + 1, EntityLabel::Phone));
                i += 1;
                continue;
            }
            _ => {}
        }

        if MONTHS.contains(&lower.as_str()) {
            let mut j = i + 1;
            while j < sentence.end && (pos[j] == PosTag::Num || tokens[j].text == ",") {
                j += 1;
            }
            while j > i + 1 && tokens[j - 1].text == "," {
                j -= 1;
            }
            if j > i + 1 {
                found.push((i..j, EntityLabel::Other("DATE".into())));
                i = j;
                continue;
            }
        }

        if token.is_capitalized() && TITLES.contains(lower.as_str()) {
            let mut j = i + 1;
            if j < sentence.end && tokens[j].text == "." && tokens[j].start == token.end {
                j += 1;
            }
            let run_end = capitalised_run(tokens, pos, j, sentence.end);
            if run_end > j {
                found.push((i..run_end, EntityLabel::Person));
                i = run_end;
                continue;
            }
        }

        if pos[i] == PosTag::Propn && token.kind == TokenKind::Word && token.is_capitalized() {
            let end = capitalised_run(tokens, pos, i, sentence.end);
            found.push((i..end, classify_run(&tokens[i..end])));
            i = end;
            continue;
        }

        i += 1;
    }

    merge_places(tokens, found)
}

fn capitalised_run(tokens: &[RawToken<'_>], pos: &[PosTag], from: usize, limit: usize) -> usize {
    let mut end = from;
    while end < limit
        && tokens[end].kind == TokenKind::Word
        && tokens[end].is_capitalized()
        && (pos[end] == PosTag::Propn || (end > from && pos[end] == PosTag::Noun))
    {
        end += 1;
    }
    end
}

fn classify_run(run: &[RawToken<'_>]) -> EntityLabel {
    let words: Vec<String> = run.iter().map(|t| t.text.to_lowercase()).collect();
    let joined = words.join(" ");

    let last = words.last().map(String::as_str).unwrap_or_default();
    if ORG_SUFFIXES.contains(last) || words.iter().any(|w| KNOWN_ORGS.contains(w.as_str())) {
        EntityLabel::Org
    } else if PLACES.contains(joined.as_str()) {
        EntityLabel::Gpe
    } else if FIRST_NAMES.contains(words[0].as_str()) || words.len() >= 2 {
        EntityLabel::Person
    } else {
        EntityLabel::Other("MISC".into())
    }
}

/// Merge `Place , Place` into one GPE span.
fn merge_places(
    tokens: &[RawToken<'_>],
    found: Vec<(Range<usize>, EntityLabel)>,
) -> Vec<(Range<usize>, EntityLabel)> {
    let mut merged: Vec<(Range<usize>, EntityLabel)> = Vec::with_capacity(found.len());
    for (range, label) in found {
        if let Some((prev_range, prev_label)) = merged.last_mut() {
            let comma_between = range.start == prev_range.end + 1 && tokens[prev_range.end].text == ",";
            if *prev_label == EntityLabel::Gpe && label == EntityLabel::Gpe && comma_between {
                prev_range.end = range.end;
                continue;
            }
        }
        merged.push((range, label));
    }
    merged
}
