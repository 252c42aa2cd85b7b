//! Classification types.

use std::fmt;
use std::str::FromStr;

use forger_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Feedback category of a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strengths,
    Weaknesses,
    Improvements,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Strengths, Self::Weaknesses, Self::Improvements];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strengths => "strengths",
            Self::Weaknesses => "weaknesses",
            Self::Improvements => "improvements",
        }
    }

    /// Category implied by a sentiment polarity: positive, negative or neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Strengths
        } else if polarity < 0.0 {
            Self::Weaknesses
        } else {
            Self::Improvements
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strengths" => Ok(Self::Strengths),
            "weaknesses" => Ok(Self::Weaknesses),
            "improvements" => Ok(Self::Improvements),
            other => Err(Error::Config(format!("unknown category label: {other:?}"))),
        }
    }
}

/// One classified phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub phrase: String,
    pub category: Category,
    pub tags: Vec<String>,
}
