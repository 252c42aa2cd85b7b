//! Sentiment polarity scoring.
//!
//! The `SentimentScorer` trait abstracts over polarity models.
//! `LexiconScorer` is the built-in implementation: a word-polarity table
//! with negation and intensifier handling, averaged over the assessed words.

use std::collections::HashMap;

use forger_core::{Error, Result};
use once_cell::sync::Lazy;

/// Trait for polarity scorers.
pub trait SentimentScorer: Send + Sync {
    fn name(&self) -> &str;

    /// Polarity in `[-1.0, 1.0]`. Empty input is an error.
    fn polarity(&self, text: &str) -> Result<f64>;
}

/// Word → polarity table.
static POLARITY: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for (word, score) in [
        ("excellent", 1.0),
        ("outstanding", 0.9),
        ("brilliant", 0.9),
        ("exceptional", 0.8),
        ("superb", 0.8),
        ("great", 0.8),
        ("impressive", 0.8),
        ("good", 0.7),
        ("strong", 0.4),
        ("clear", 0.3),
        ("helpful", 0.5),
        ("positive", 0.3),
        ("creative", 0.5),
        ("reliable", 0.5),
        ("proactive", 0.5),
        ("thorough", 0.4),
        ("effective", 0.6),
        ("efficient", 0.5),
        ("confident", 0.5),
        ("friendly", 0.4),
        ("nice", 0.6),
        ("happy", 0.8),
        ("pleased", 0.5),
        ("well", 0.3),
        ("best", 1.0),
        ("better", 0.5),
        ("amazing", 0.6),
        ("fantastic", 0.4),
        ("wonderful", 1.0),
        ("quick", 0.3),
        ("valuable", 0.5),
        ("enthusiastic", 0.6),
        ("professional", 0.3),
    ] {
        m.insert(word, score);
    }
    for (word, score) in [
        ("poor", -0.4),
        ("bad", -0.7),
        ("terrible", -1.0),
        ("awful", -1.0),
        ("worst", -1.0),
        ("worse", -0.4),
        ("weak", -0.4),
        ("slow", -0.3),
        ("late", -0.3),
        ("unclear", -0.3),
        ("confusing", -0.4),
        ("disappointing", -0.6),
        ("disappointed", -0.6),
        ("unhappy", -0.6),
        ("difficult", -0.5),
        ("careless", -0.5),
        ("unreliable", -0.5),
        ("inconsistent", -0.4),
        ("negative", -0.3),
        ("rude", -0.6),
        ("sloppy", -0.5),
        ("lacking", -0.4),
        ("missing", -0.2),
        ("wrong", -0.5),
        ("problem", -0.2),
        ("problematic", -0.4),
        ("frustrating", -0.6),
        ("disorganised", -0.5),
        ("disorganized", -0.5),
    ] {
        m.insert(word, score);
    }
    m
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("very", 1.3),
        ("really", 1.2),
        ("extremely", 1.5),
        ("incredibly", 1.4),
        ("quite", 1.1),
        ("so", 1.2),
        ("slightly", 0.6),
        ("somewhat", 0.7),
    ])
});

const NEGATIONS: &[&str] = &["not", "never", "no", "n't", "hardly", "barely"];

/// Negated assessments are flipped and damped.
const NEGATION_FACTOR: f64 = -0.5;

/// Lexicon-based polarity scorer.
pub struct LexiconScorer {
    overrides: HashMap<String, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Add or replace word polarities on top of the built-in table.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (word, score) in words {
            self.overrides
                .insert(word.into().to_lowercase(), score.clamp(-1.0, 1.0));
        }
        self
    }

    fn word_polarity(&self, word: &str) -> Option<f64> {
        self.overrides
            .get(word)
            .copied()
            .or_else(|| POLARITY.get(word).copied())
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> Result<f64> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(Error::Inference("cannot score empty text".into()));
        }

        let mut assessments = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;

        for word in words {
            if NEGATIONS.contains(&word) || word.ends_with("n't") {
                negated = true;
                continue;
            }
            if let Some(factor) = INTENSIFIERS.get(word) {
                intensity *= factor;
                continue;
            }
            match self.word_polarity(word) {
                Some(score) => {
                    let mut score = score * intensity;
                    if negated {
                        score *= NEGATION_FACTOR;
                    }
                    assessments.push(score.clamp(-1.0, 1.0));
                    negated = false;
                    intensity = 1.0;
                }
                None => intensity = 1.0,
            }
        }

        if assessments.is_empty() {
            return Ok(0.0);
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        Ok(mean.clamp(-1.0, 1.0))
    }
}
