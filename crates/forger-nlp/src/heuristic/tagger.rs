//! Rule-based part-of-speech tagger.
//!
//! Closed-class words come from fixed lists; open-class words are decided
//! from the verb lexicon, adjective lists and suffixes, and capitalisation.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::lemma::{known_verb_lemma, noun_lemma, verb_lemma};
use super::tokenizer::{RawToken, TokenKind};
use crate::types::PosTag;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tagged {
    pub pos: PosTag,
    pub lemma: String,
}

fn set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her",
        "its", "our", "their", "each", "every", "some", "any", "no", "all", "both",
        "another", "such", "either", "neither",
    ])
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who",
        "whom", "what", "which", "someone", "everyone", "anyone", "something",
        "everything", "anything", "nothing", "mine", "yours", "hers", "ours", "theirs",
    ])
});

static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
        "into", "through", "during", "before", "after", "above", "below", "from", "up",
        "down", "out", "off", "over", "under", "to", "across", "within", "without",
        "towards", "toward", "upon", "via", "around", "per", "like",
    ])
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "and", "or", "but", "nor", "yet", "because", "if", "while", "although", "though",
        "unless", "until", "whereas", "than", "as", "whether", "since",
    ])
});

static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had",
        "having", "do", "does", "did", "will", "would", "shall", "should", "can",
        "could", "may", "might", "must",
    ])
});

static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "very", "really", "also", "too", "quite", "just", "never", "always", "often",
        "sometimes", "still", "already", "again", "well", "here", "there", "now",
        "then", "soon", "more", "most", "less", "rather", "almost", "even", "only",
        "ever", "perhaps", "so", "how", "when", "where", "why",
    ])
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "good", "great", "excellent", "bad", "poor", "strong", "weak", "clear", "new",
        "old", "high", "low", "big", "small", "late", "early", "quick", "slow", "nice",
        "happy", "best", "better", "worse", "worst", "outstanding", "brilliant",
        "superb", "amazing", "fantastic", "terrible", "awful", "difficult", "hard",
        "easy", "proactive", "thorough", "friendly", "rude", "sloppy", "confident",
        "efficient", "consistent", "inconsistent", "professional",
        "technical", "overall", "key", "important", "different", "many", "much",
        "several", "few", "other", "same", "first", "last", "next", "unclear",
        "reliable", "unreliable", "positive", "negative", "wonderful", "exceptional",
        "impressive", "creative", "effective", "valuable", "enthusiastic", "pleased",
        "disappointed", "unhappy", "wrong", "right", "quiet", "busy", "senior", "junior",
    ])
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less", "ical", "ish"];

/// Common given names; only consulted for capitalised tokens.
pub(crate) static FIRST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "alice", "bob", "john", "jane", "mary", "james", "robert", "michael", "william",
        "david", "richard", "joseph", "thomas", "charles", "sarah", "emma", "olivia",
        "sophia", "emily", "jessica", "daniel", "matthew", "anthony", "paul", "steven",
        "andrew", "peter", "laura", "anna", "lisa", "karen", "nancy", "linda", "susan",
        "kevin", "brian", "george", "edward", "helen", "rachel", "chris", "tom", "sam",
        "alex", "kate", "lucy", "oliver", "harry", "jack", "charlie", "amelia", "isla",
        "ava", "mia", "noah", "liam", "ethan", "lucas", "maria", "carlos", "ahmed",
        "priya", "raj", "wei", "yuki", "fatima", "hannah", "claire", "simon", "ben",
    ])
});

/// Tag one sentence worth of tokens.
pub(crate) fn tag_sentence(tokens: &[RawToken<'_>]) -> Vec<Tagged> {
    let first_word = tokens.iter().position(|t| t.kind == TokenKind::Word);
    let mut tagged: Vec<Tagged> = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let lower = token.text.to_lowercase();
        let prev = tagged.last().map(|t| t.pos);
        let next = tokens.get(i + 1);

        let entry = match token.kind {
            TokenKind::Email | TokenKind::Phone => Tagged {
                pos: PosTag::Propn,
                lemma: lower,
            },
            TokenKind::Punct => Tagged {
                pos: PosTag::Punct,
                lemma: lower,
            },
            TokenKind::Clitic => tag_clitic(&lower),
            TokenKind::Word => {
                let sentence_initial = first_word == Some(i);
                tag_word(token, lower, prev, next, sentence_initial)
            }
        };
        tagged.push(entry);
    }
    tagged
}

fn tag_clitic(lower: &str) -> Tagged {
    let body = lower.trim_start_matches(['\'', '’']);
    let (pos, lemma) = match body {
        "s" => (PosTag::Part, "'s"),
        "t" => (PosTag::Part, "not"),
        "re" | "m" => (PosTag::Aux, "be"),
        "ve" => (PosTag::Aux, "have"),
        "ll" => (PosTag::Aux, "will"),
        "d" => (PosTag::Aux, "would"),
        _ => (PosTag::Part, body),
    };
    Tagged {
        pos,
        lemma: lemma.to_string(),
    }
}

fn tag_word(
    token: &RawToken<'_>,
    lower: String,
    prev: Option<PosTag>,
    next: Option<&RawToken<'_>>,
    sentence_initial: bool,
) -> Tagged {
    let word = lower.as_str();
    let after_modifier = matches!(prev, Some(PosTag::Det | PosTag::Adj));

    let pos = if word.chars().all(|c| c.is_numeric() || c == '-' || c == '_') {
        PosTag::Num
    } else if word == "not" || (word == "to" && next.is_some_and(|n| is_verb_form(n.text))) {
        PosTag::Part
    } else if DETERMINERS.contains(word) {
        PosTag::Det
    } else if PRONOUNS.contains(word) {
        PosTag::Pron
    } else if AUXILIARIES.contains(word) {
        PosTag::Aux
    } else if ADPOSITIONS.contains(word) {
        PosTag::Adp
    } else if CONJUNCTIONS.contains(word) {
        PosTag::Cconj
    } else if ADVERBS.contains(word) {
        PosTag::Adv
    } else if token.is_capitalized() && (!sentence_initial || FIRST_NAMES.contains(word)) {
        PosTag::Propn
    } else if ADJECTIVES.contains(word) {
        PosTag::Adj
    } else if known_verb_lemma(word).is_some() {
        if after_modifier {
            PosTag::Noun
        } else {
            PosTag::Verb
        }
    } else if word.len() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        PosTag::Adj
    } else if word.len() > 4 && word.ends_with("ly") {
        PosTag::Adv
    } else if word.len() > 4 && word.ends_with("ing") {
        if after_modifier {
            PosTag::Noun
        } else {
            PosTag::Verb
        }
    } else if word.len() > 4 && word.ends_with("ed") {
        if after_modifier {
            PosTag::Adj
        } else {
            PosTag::Verb
        }
    } else {
        PosTag::Noun
    };

    let lemma = match pos {
        PosTag::Verb => verb_lemma(word),
        PosTag::Noun => noun_lemma(word),
        PosTag::Aux => aux_lemma(word).to_string(),
        _ => lower.clone(),
    };
    Tagged { pos, lemma }
}

fn is_verb_form(text: &str) -> bool {
    let lower = text.to_lowercase();
    AUXILIARIES.contains(lower.as_str()) || known_verb_lemma(&lower).is_some()
}

fn aux_lemma(word: &str) -> &str {
    match word {
        "am" | "is" | "are" | "was" | "were" | "been" | "being" => "be",
        "has" | "had" | "having" => "have",
        "does" | "did" => "do",
        other => other,
    }
}
