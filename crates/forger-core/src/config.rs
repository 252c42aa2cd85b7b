//! Configuration and data file locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default literal substituted for redacted spans.
pub const DEFAULT_REDACTION_MARKER: &str = "[REDACTED]";
/// File name of the category lexicon inside a lexicon directory.
pub const CATEGORIES_FILE: &str = "categories.json";
/// File name of the tag lexicon inside a lexicon directory.
pub const TAGS_FILE: &str = "tags.json";

/// Raw message field that is redacted independently of phrase analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionTarget {
    Sender,
    Recipient,
    Title,
}

impl RedactionTarget {
    pub const DEFAULTS: [RedactionTarget; 3] = [Self::Sender, Self::Recipient, Self::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sender => "sender",
            Self::Recipient => "recipient",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for RedactionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RedactionTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sender" => Ok(Self::Sender),
            "recipient" => Ok(Self::Recipient),
            "title" => Ok(Self::Title),
            other => Err(Error::Config(format!("unknown redaction field: {other:?}"))),
        }
    }
}

/// Locations of the optional on-disk data files.
///
/// Unset paths mean the built-in lexicons and stopword list are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataPaths {
    /// Directory holding `categories.json` and `tags.json`.
    pub lexicon_dir: Option<PathBuf>,
    /// Newline-separated stopword list.
    pub stopwords_file: Option<PathBuf>,
}

impl DataPaths {
    pub fn with_lexicon_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            lexicon_dir: Some(dir.as_ref().to_path_buf()),
            stopwords_file: None,
        }
    }

    pub fn categories_file(&self) -> Option<PathBuf> {
        self.lexicon_dir.as_ref().map(|d| d.join(CATEGORIES_FILE))
    }

    pub fn tags_file(&self) -> Option<PathBuf> {
        self.lexicon_dir.as_ref().map(|d| d.join(TAGS_FILE))
    }
}

/// Redaction policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    pub marker: String,
    pub targets: Vec<RedactionTarget>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_REDACTION_MARKER.to_string(),
            targets: RedactionTarget::DEFAULTS.to_vec(),
        }
    }
}

/// Outbound topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    pub output: String,
    pub dead_letter: String,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            output: "career_forger_analysis.topic".to_string(),
            dead_letter: "career_forger_analysis_dlq.topic".to_string(),
        }
    }
}

/// Top-level Forger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgerConfig {
    pub api_name: String,
    /// HTTP server port.
    pub port: u16,
    pub project_id: Option<String>,
    pub is_test_env: bool,
    pub data_paths: DataPaths,
    pub redaction: RedactionConfig,
    pub topics: TopicConfig,
    /// Drop sentences that are empty after normalization.
    pub skip_empty_sentences: bool,
}

impl Default for ForgerConfig {
    fn default() -> Self {
        Self {
            api_name: "career-forger-nlp-api".to_string(),
            port: 8080,
            project_id: None,
            is_test_env: false,
            data_paths: DataPaths::default(),
            redaction: RedactionConfig::default(),
            topics: TopicConfig::default(),
            skip_empty_sentences: false,
        }
    }
}

impl ForgerConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let marker = match lookup("FORGER_REDACTION_MARKER") {
            Some(m) if m.is_empty() => {
                return Err(Error::Config("FORGER_REDACTION_MARKER must not be empty".into()))
            }
            Some(m) => m,
            None => defaults.redaction.marker,
        };

        let targets = match get("FORGER_REDACT_FIELDS") {
            Some(list) => parse_targets(&list)?,
            None => defaults.redaction.targets,
        };

        Ok(Self {
            api_name: get("API_NAME").unwrap_or(defaults.api_name),
            port,
            project_id: get("GCP_PROJECT_ID"),
            is_test_env: get("IS_TEST_ENV").map(|v| parse_flag(&v)).unwrap_or(false),
            data_paths: DataPaths {
                lexicon_dir: get("FORGER_LEXICON_DIR").map(PathBuf::from),
                stopwords_file: get("FORGER_STOPWORDS_FILE").map(PathBuf::from),
            },
            redaction: RedactionConfig { marker, targets },
            topics: TopicConfig {
                output: get("PUBSUB_TOPIC").unwrap_or(defaults.topics.output),
                dead_letter: get("DLQ_TOPIC").unwrap_or(defaults.topics.dead_letter),
            },
            skip_empty_sentences: get("FORGER_SKIP_EMPTY_SENTENCES")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Parse a comma-separated field list, dropping repeats.
fn parse_targets(list: &str) -> Result<Vec<RedactionTarget>> {
    let mut targets = Vec::new();
    for part in list.split(',').filter(|p| !p.trim().is_empty()) {
        let target: RedactionTarget = part.parse()?;
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    Ok(targets)
}
