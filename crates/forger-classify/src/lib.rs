//! Forger Classify: keyword lexicons, compiled patterns and the phrase classifier.
//!
//! Categories come from the first matching category pattern, falling back
//! to sentiment polarity. Tags are every matching tag pattern.

pub mod classifier;
pub mod lexicon;
pub mod pattern;
pub mod types;

pub use classifier::Classifier;
pub use lexicon::{Lexicon, LexiconSet};
pub use pattern::{CompiledLexicon, CompiledPattern, MatchMode};
pub use types::{Category, ClassificationRecord};
