//! Keyword lexicons: label → ordered keyword set.
//!
//! Lexicons are JSON objects `{label: [keyword, ...]}`. Declaration order is
//! significant (it drives first-match categorisation and tag order) and is
//! preserved from the source document.

use std::path::Path;

use forger_core::{DataPaths, Error, Result};
use indexmap::IndexMap;

/// Built-in career-feedback lexicons.
const BUILTIN_CATEGORIES: &str = include_str!("../data/categories.json");
const BUILTIN_TAGS: &str = include_str!("../data/tags.json");

/// An immutable label → keywords table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: IndexMap<String, Vec<String>>,
}

impl Lexicon {
    /// Build from `(label, keywords)` pairs.
    ///
    /// Keywords are trimmed, blanks dropped and duplicates collapsed to the
    /// first occurrence. A label with no keywords left, a blank label or a
    /// repeated label is a configuration error.
    pub fn from_entries<I, L, K, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, K)>,
        L: Into<String>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = IndexMap::new();
        for (label, keywords) in entries {
            let label: String = label.into().trim().to_string();
            if label.is_empty() {
                return Err(Error::Config("lexicon label must not be blank".into()));
            }
            let mut cleaned: Vec<String> = Vec::new();
            for keyword in keywords {
                let keyword = keyword.as_ref().trim();
                if !keyword.is_empty() && !cleaned.iter().any(|k| k == keyword) {
                    cleaned.push(keyword.to_string());
                }
            }
            if cleaned.is_empty() {
                return Err(Error::Config(format!("lexicon label {label:?} has no keywords")));
            }
            if table.insert(label.clone(), cleaned).is_some() {
                return Err(Error::Config(format!("lexicon label {label:?} is declared twice")));
            }
        }
        Ok(Self { entries: table })
    }

    /// Parse a JSON lexicon.
    pub fn from_json(data: &str) -> Result<Self> {
        let table: IndexMap<String, Vec<String>> = serde_json::from_str(data)
            .map_err(|e| Error::Config(format!("malformed lexicon: {e}")))?;
        Self::from_entries(table)
    }

    /// Read and parse a JSON lexicon file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read lexicon {}: {}", path.display(), e))
        })?;
        Self::from_json(&data).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn keywords(&self, label: &str) -> Option<&[String]> {
        self.entries.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(l, k)| (l.as_str(), k.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The category and tag lexicons used by the classifier.
#[derive(Debug, Clone)]
pub struct LexiconSet {
    pub categories: Lexicon,
    pub tags: Lexicon,
}

impl LexiconSet {
    /// Load `categories.json` and `tags.json` from a directory.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let paths = DataPaths::with_lexicon_dir(dir);
        Self::from_paths(&paths)
    }

    /// Lexicons compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            categories: Lexicon::from_json(BUILTIN_CATEGORIES)?,
            tags: Lexicon::from_json(BUILTIN_TAGS)?,
        })
    }

    /// Load the configured lexicon directory, or the built-in lexicons.
    pub fn from_paths(paths: &DataPaths) -> Result<Self> {
        match (paths.categories_file(), paths.tags_file()) {
            (Some(categories), Some(tags)) => {
                let set = Self {
                    categories: Lexicon::load(&categories)?,
                    tags: Lexicon::load(&tags)?,
                };
                tracing::info!(
                    "Loaded lexicons: {} categories, {} tags",
                    set.categories.len(),
                    set.tags.len()
                );
                Ok(set)
            }
            _ => {
                tracing::info!("No lexicon directory configured, using built-in lexicons");
                Self::builtin()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_preserves_order() {
        let lexicon = Lexicon::from_json(r#"{"zeta": ["z"], "alpha": ["a"], "mid": ["m"]}"#).unwrap();
        let labels: Vec<&str> = lexicon.labels().collect();
        assert_eq!(labels, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_keywords_cleaned() {
        let lexicon = Lexicon::from_entries([("tag", vec![" team ", "", "team", "peers"])]).unwrap();
        assert_eq!(lexicon.keywords("tag").unwrap(), ["team", "peers"]);
    }

    #[test]
    fn test_empty_keyword_list_is_config_error() {
        let err = Lexicon::from_json(r#"{"strengths": []}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let err = Lexicon::from_entries([("tag", vec!["  "])]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        for bad in [r#"["a", "b"]"#, r#"{"a": "not a list"}"#, "{not json"] {
            let err = Lexicon::from_json(bad).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{bad}");
        }
    }

    #[test]
    fn test_duplicate_label_in_entries() {
        let err = Lexicon::from_entries([("a", vec!["x"]), ("a", vec!["y"])]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Lexicon::load(Path::new("/nonexistent/categories.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("categories.json"), r#"{"strengths": ["great"]}"#).unwrap();
        std::fs::write(dir.path().join("tags.json"), r#"{"delivery": ["project"]}"#).unwrap();
        let set = LexiconSet::load_dir(dir.path()).unwrap();
        assert_eq!(set.categories.len(), 1);
        assert_eq!(set.tags.keywords("delivery").unwrap(), ["project"]);
    }

    #[test]
    fn test_load_dir_missing_tags() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("categories.json"), r#"{"strengths": ["great"]}"#).unwrap();
        assert!(LexiconSet::load_dir(dir.path()).is_err());
    }

    #[test]
    fn test_builtin_lexicons() {
        let set = LexiconSet::builtin().unwrap();
        let categories: Vec<&str> = set.categories.labels().collect();
        assert_eq!(categories, vec!["strengths", "weaknesses", "improvements"]);
        assert!(set.tags.len() >= 5);
        assert!(LexiconSet::from_paths(&DataPaths::default()).is_ok());
    }
}
