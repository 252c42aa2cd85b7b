//! Verb and noun lemmatization with suffix rules and an irregular-form table.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Verb lemmas the tagger recognises regardless of suffix.
static VERB_LEMMAS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "go", "make", "take", "give", "get", "show", "need", "improve", "work", "help",
        "deliver", "lead", "manage", "communicate", "present", "build", "learn", "write",
        "speak", "listen", "support", "handle", "meet", "complete", "finish", "start",
        "continue", "keep", "try", "want", "think", "know", "feel", "see", "say", "tell",
        "ask", "use", "find", "provide", "create", "develop", "focus", "share",
        "demonstrate", "contribute", "collaborate", "struggle", "miss", "exceed", "drive",
        "own", "plan", "prepare", "review", "respond", "solve", "adapt", "grow", "mentor",
        "coach", "run", "become", "seem", "look", "come", "bring", "understand", "attend",
        "organise", "organize", "prioritise", "prioritize", "explain", "engage", "raise",
        "follow", "answer", "teach", "choose", "begin", "seek", "appreciate",
        "enjoy", "love", "like", "encourage", "recommend", "expect", "ensure", "consider",
        "spend", "lose", "win", "set", "put", "let", "leave", "stay", "join",
    ]
    .into_iter()
    .collect()
});

/// Irregular verb forms → lemma.
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("went", "go"),
        ("gone", "go"),
        ("made", "make"),
        ("took", "take"),
        ("taken", "take"),
        ("gave", "give"),
        ("given", "give"),
        ("got", "get"),
        ("gotten", "get"),
        ("shown", "show"),
        ("led", "lead"),
        ("built", "build"),
        ("wrote", "write"),
        ("written", "write"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("met", "meet"),
        ("kept", "keep"),
        ("thought", "think"),
        ("knew", "know"),
        ("known", "know"),
        ("felt", "feel"),
        ("saw", "see"),
        ("seen", "see"),
        ("said", "say"),
        ("told", "tell"),
        ("found", "find"),
        ("brought", "bring"),
        ("understood", "understand"),
        ("became", "become"),
        ("came", "come"),
        ("ran", "run"),
        ("grew", "grow"),
        ("grown", "grow"),
        ("began", "begin"),
        ("begun", "begin"),
        ("taught", "teach"),
        ("sought", "seek"),
        ("drove", "drive"),
        ("driven", "drive"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("spent", "spend"),
        ("lost", "lose"),
        ("won", "win"),
        ("left", "leave"),
    ])
});

/// Lemma of a known verb form, or `None` when the word is not a known verb.
pub(crate) fn known_verb_lemma(word: &str) -> Option<String> {
    if let Some(lemma) = IRREGULAR.get(word) {
        return Some((*lemma).to_string());
    }
    if VERB_LEMMAS.contains(word) {
        return Some(word.to_string());
    }
    verb_candidates(word)
        .into_iter()
        .find(|c| VERB_LEMMAS.contains(c.as_str()))
}

/// Best-effort lemma for a word tagged as a verb.
pub(crate) fn verb_lemma(word: &str) -> String {
    if let Some(lemma) = known_verb_lemma(word) {
        return lemma;
    }
    verb_candidates(word)
        .into_iter()
        .next()
        .unwrap_or_else(|| word.to_string())
}

/// Singular form of a noun.
pub(crate) fn noun_lemma(word: &str) -> String {
    if word.len() <= 3 {
        return word.to_string();
    }
    // (suffix, replacement); longer suffixes first.
    let rules: &[(&str, &str)] = &[
        ("sses", "ss"),
        ("ies", "y"),
        ("ches", "ch"),
        ("shes", "sh"),
        ("xes", "x"),
        ("ss", "ss"),
        ("us", "us"),
        ("is", "is"),
        ("s", ""),
    ];
    for (suffix, replacement) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{stem}{replacement}");
        }
    }
    word.to_string()
}

/// Candidate base forms of an inflected verb, most likely first.
fn verb_candidates(word: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    if word.len() <= 3 {
        return candidates;
    }
    if let Some(stem) = word.strip_suffix("ied").or_else(|| word.strip_suffix("ies")) {
        candidates.push(format!("{stem}y"));
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() < 2 {
                continue;
            }
            if let Some(undoubled) = undouble(stem) {
                candidates.push(undoubled);
            }
            if suffix == "ed" && stem.ends_with('e') {
                // "agreed" → "agree"
                candidates.push(stem.to_string());
            } else if wants_silent_e(stem) {
                candidates.push(format!("{stem}e"));
                candidates.push(stem.to_string());
            } else {
                candidates.push(stem.to_string());
                candidates.push(format!("{stem}e"));
            }
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !stem.ends_with('s') {
            candidates.push(stem.to_string());
        }
    }
    candidates
}

/// Stems like "solv", "produc" or "creat" lost a final "e" when inflected.
fn wants_silent_e(stem: &str) -> bool {
    stem.ends_with(['v', 'c', 'u', 'z'])
        || stem.ends_with("at")
        || (stem.ends_with("it") && !stem.ends_with("ait"))
}

/// "runn" → "run"; `None` when the stem does not end in a doubled consonant.
fn undouble(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && !b"aeioulsz".contains(&bytes[n - 1]) {
        Some(stem[..n - 1].to_string())
    } else {
        None
    }
}
