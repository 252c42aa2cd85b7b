//! Phrase classifier: regex-first categorisation with a sentiment fallback,
//! plus multi-label tagging.

use std::sync::Arc;

use forger_core::{Error, Result};
use forger_nlp::SentimentScorer;
use indexmap::IndexMap;

use crate::lexicon::{Lexicon, LexiconSet};
use crate::pattern::{CompiledLexicon, MatchMode};
use crate::types::{Category, ClassificationRecord};

/// Assigns a category and tags to feedback phrases.
///
/// Patterns are compiled once at construction. Category patterns use
/// unanchored search and the first declared match wins; tag patterns use
/// anchored matching and every match is kept.
pub struct Classifier {
    categories: CompiledLexicon,
    tags: CompiledLexicon,
    scorer: Arc<dyn SentimentScorer>,
}

impl Classifier {
    pub fn new(
        categories: &Lexicon,
        tags: &Lexicon,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::Config("category lexicon is empty".into()));
        }
        if tags.is_empty() {
            return Err(Error::Config("tag lexicon is empty".into()));
        }
        for label in categories.labels() {
            label.parse::<Category>()?;
        }

        let classifier = Self {
            categories: CompiledLexicon::compile(categories, MatchMode::Search)?,
            tags: CompiledLexicon::compile(tags, MatchMode::Anchored)?,
            scorer,
        };
        tracing::info!(
            "Classifier ready: {} category patterns, {} tag patterns, scorer={}",
            classifier.categories.len(),
            classifier.tags.len(),
            classifier.scorer.name()
        );
        Ok(classifier)
    }

    pub fn from_lexicons(lexicons: &LexiconSet, scorer: Arc<dyn SentimentScorer>) -> Result<Self> {
        Self::new(&lexicons.categories, &lexicons.tags, scorer)
    }

    /// Category per distinct phrase, keyed in first-seen order.
    pub fn categorise(&self, phrases: &[String]) -> IndexMap<String, Category> {
        let mut categorised = IndexMap::with_capacity(phrases.len());
        for phrase in phrases {
            let category = self.category_of(phrase);
            categorised.insert(phrase.clone(), category);
        }
        categorised
    }

    /// Matching tags per distinct phrase, in tag declaration order.
    pub fn tag(&self, phrases: &[String]) -> IndexMap<String, Vec<String>> {
        phrases
            .iter()
            .map(|phrase| {
                let tags = self.tags.matches(phrase).map(str::to_string).collect();
                (phrase.clone(), tags)
            })
            .collect()
    }

    /// One record per categorised phrase; phrases without tags get none.
    pub fn join(
        categorised: &IndexMap<String, Category>,
        tagged: &IndexMap<String, Vec<String>>,
    ) -> Vec<ClassificationRecord> {
        categorised
            .iter()
            .map(|(phrase, category)| ClassificationRecord {
                phrase: phrase.clone(),
                category: *category,
                tags: tagged.get(phrase).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// `categorise`, `tag` and `join` in one call.
    pub fn classify(&self, phrases: &[String]) -> Vec<ClassificationRecord> {
        let categorised = self.categorise(phrases);
        let tagged = self.tag(phrases);
        Self::join(&categorised, &tagged)
    }

    pub fn category_labels(&self) -> impl Iterator<Item = &str> {
        self.categories.labels()
    }

    pub fn tag_labels(&self) -> impl Iterator<Item = &str> {
        self.tags.labels()
    }

    fn category_of(&self, phrase: &str) -> Category {
        let matched = self
            .categories
            .first_match(phrase)
            .and_then(|label| label.parse::<Category>().ok());
        if let Some(category) = matched {
            return category;
        }

        match self.scorer.polarity(phrase) {
            Ok(polarity) if polarity.is_finite() => Category::from_polarity(polarity),
            Ok(polarity) => {
                tracing::warn!(
                    "Non-finite polarity {} for phrase {:?}, defaulting to improvements",
                    polarity,
                    phrase
                );
                Category::Improvements
            }
            Err(e) => {
                tracing::warn!(
                    "Sentiment scoring failed for phrase {:?}: {}. Defaulting to improvements",
                    phrase,
                    e
                );
                Category::Improvements
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forger_nlp::LexiconScorer;
    use std::collections::HashMap;

    /// Scorer with fixed polarities; unknown phrases fail.
    struct FixedScorer(HashMap<&'static str, f64>);

    impl SentimentScorer for FixedScorer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn polarity(&self, text: &str) -> Result<f64> {
            self.0
                .get(text)
                .copied()
                .ok_or_else(|| Error::Inference(format!("no polarity for {text:?}")))
        }
    }

    fn phrases(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn classifier(scores: &[(&'static str, f64)]) -> Classifier {
        let categories = Lexicon::from_entries([
            ("strengths", vec!["excellent"]),
            ("weaknesses", vec!["late"]),
            ("improvements", vec!["improve"]),
        ])
        .unwrap();
        let tags = Lexicon::from_entries([
            ("delivery", vec!["project", "deadline"]),
            ("communication", vec!["email", "presentation"]),
        ])
        .unwrap();
        let scorer = Arc::new(FixedScorer(scores.iter().copied().collect()));
        Classifier::new(&categories, &tags, scorer).unwrap()
    }

    #[test]
    fn test_keyword_beats_polarity() {
        let classifier = classifier(&[("excellent but late", -0.9)]);
        let categorised = classifier.categorise(&phrases(&["excellent but late"]));
        assert_eq!(categorised["excellent but late"], Category::Strengths);
    }

    #[test]
    fn test_first_declared_category_wins() {
        let categories = Lexicon::from_entries([
            ("weaknesses", vec!["late"]),
            ("strengths", vec!["excellent"]),
        ])
        .unwrap();
        let tags = Lexicon::from_entries([("delivery", vec!["project"])]).unwrap();
        let classifier =
            Classifier::new(&categories, &tags, Arc::new(FixedScorer(HashMap::new()))).unwrap();
        let categorised = classifier.categorise(&phrases(&["excellent but late"]));
        assert_eq!(categorised["excellent but late"], Category::Weaknesses);
    }

    #[test]
    fn test_polarity_fallback() {
        let classifier = classifier(&[
            ("nice slides", 0.6),
            ("messy handover", -0.3),
            ("average experience", 0.0),
        ]);
        let categorised =
            classifier.categorise(&phrases(&["nice slides", "messy handover", "average experience"]));
        assert_eq!(categorised["nice slides"], Category::Strengths);
        assert_eq!(categorised["messy handover"], Category::Weaknesses);
        assert_eq!(categorised["average experience"], Category::Improvements);
    }

    #[test]
    fn test_scoring_failures_degrade_to_improvements() {
        let classifier = classifier(&[("odd", f64::NAN)]);
        let categorised = classifier.categorise(&phrases(&["", "odd", "unscored"]));
        assert!(categorised.values().all(|c| *c == Category::Improvements));
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let classifier = classifier(&[("b", 0.1), ("a", -0.1)]);
        let categorised = classifier.categorise(&phrases(&["b", "a", "b"]));
        let keys: Vec<&str> = categorised.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_tags_in_declaration_order() {
        let classifier = classifier(&[]);
        let tagged = classifier.tag(&phrases(&[
            "presentation on the project deadline",
            "nothing relevant",
        ]));
        assert_eq!(
            tagged["presentation on the project deadline"],
            vec!["delivery", "communication"]
        );
        assert!(tagged["nothing relevant"].is_empty());
    }

    #[test]
    fn test_tag_is_monotonic_in_lexicon_size() {
        let small = classifier(&[]);
        let categories = Lexicon::from_entries([("strengths", vec!["excellent"])]).unwrap();
        let tags = Lexicon::from_entries([
            ("delivery", vec!["project", "deadline"]),
            ("communication", vec!["email", "presentation"]),
            ("teamwork", vec!["team"]),
        ])
        .unwrap();
        let large = Classifier::new(&categories, &tags, Arc::new(LexiconScorer::new())).unwrap();

        let input = phrases(&["team project", "email the team"]);
        let before = small.tag(&input);
        let after = large.tag(&input);
        for phrase in &input {
            assert!(before[phrase].iter().all(|t| after[phrase].contains(t)));
        }
    }

    #[test]
    fn test_join_defaults_missing_tags() {
        let mut categorised = IndexMap::new();
        categorised.insert("a".to_string(), Category::Strengths);
        categorised.insert("b".to_string(), Category::Weaknesses);
        let mut tagged = IndexMap::new();
        tagged.insert("a".to_string(), vec!["delivery".to_string()]);
        tagged.insert("orphan".to_string(), vec!["x".to_string()]);

        let records = Classifier::join(&categorised, &tagged);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tags, vec!["delivery"]);
        assert!(records[1].tags.is_empty());
    }

    #[test]
    fn test_classify_with_lexicon_scorer() {
        let categories = Lexicon::from_entries([("strengths", vec!["excellent"])]).unwrap();
        let tags = Lexicon::from_entries([("service", vec!["service"])]).unwrap();
        let classifier =
            Classifier::new(&categories, &tags, Arc::new(LexiconScorer::new())).unwrap();

        let records =
            classifier.classify(&phrases(&["The service was excellent", "Average experience"]));
        assert_eq!(records[0].category, Category::Strengths);
        assert_eq!(records[0].tags, vec!["service"]);
        assert_eq!(records[1].category, Category::Improvements);
    }

    #[test]
    fn test_invalid_lexicons() {
        let scorer: Arc<dyn SentimentScorer> = Arc::new(LexiconScorer::new());
        let tags = Lexicon::from_entries([("t", vec!["x"])]).unwrap();
        let unknown = Lexicon::from_entries([("praise", vec!["x"])]).unwrap();
        assert!(matches!(
            Classifier::new(&unknown, &tags, scorer.clone()),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Classifier::new(&Lexicon::default(), &tags, scorer),
            Err(Error::Config(_))
        ));
    }
}
