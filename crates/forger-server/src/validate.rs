//! Data file validation for the `validate` subcommand.
//!
//! Loads the configured lexicons and stopwords the same way the server does
//! at startup and reports what would be used, so a bad deploy fails before
//! the service takes traffic.

use std::collections::HashMap;

use forger_classify::{Classifier, LexiconSet};
use forger_core::DataPaths;
use tracing::{error, info};

/// Result of a validation run.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Lexicon directory, or `None` for the built-in lexicons.
    pub source: Option<String>,
    /// (label, keyword count) per category, in declaration order.
    pub categories: Vec<(String, usize)>,
    pub tags: Vec<(String, usize)>,
    pub stopwords: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Load and compile the data files named by `paths`.
pub fn validate(paths: &DataPaths) -> ValidationReport {
    let mut report = ValidationReport {
        source: paths.lexicon_dir.as_ref().map(|d| d.display().to_string()),
        ..Default::default()
    };

    match forger_nlp::load_stopwords(paths.stopwords_file.as_deref()) {
        Ok(stopwords) => report.stopwords = stopwords.len(),
        Err(e) => report.errors.push(e.to_string()),
    }

    let lexicons = match LexiconSet::from_paths(paths) {
        Ok(lexicons) => lexicons,
        Err(e) => {
            error!("Lexicon load failed: {}", e);
            report.errors.push(e.to_string());
            return report;
        }
    };

    report.categories = counts(&lexicons.categories);
    report.tags = counts(&lexicons.tags);
    report.warnings = shadowed_keywords(&lexicons);

    if let Err(e) = Classifier::from_lexicons(&lexicons, forger_nlp::create_scorer()) {
        report.errors.push(e.to_string());
    } else {
        info!(
            "Validated {} categories and {} tags",
            report.categories.len(),
            report.tags.len()
        );
    }

    report
}

fn counts(lexicon: &forger_classify::Lexicon) -> Vec<(String, usize)> {
    lexicon
        .iter()
        .map(|(label, keywords)| (label.to_string(), keywords.len()))
        .collect()
}

/// Keywords listed under more than one category; only the first label can match.
fn shadowed_keywords(lexicons: &LexiconSet) -> Vec<String> {
    let mut first_owner: HashMap<String, &str> = HashMap::new();
    let mut warnings = Vec::new();
    for (label, keywords) in lexicons.categories.iter() {
        for keyword in keywords {
            let key = keyword.to_lowercase();
            match first_owner.get(&key) {
                Some(owner) if *owner != label => warnings.push(format!(
                    "keyword {:?} in {} is shadowed by {}",
                    keyword, label, owner
                )),
                Some(_) => {}
                None => {
                    first_owner.insert(key, label);
                }
            }
        }
    }
    warnings
}

pub fn print_report(report: &ValidationReport) {
    println!("=== Forger Data Validation ===");
    println!();
    println!(
        "Lexicons:           {}",
        report.source.as_deref().unwrap_or("built-in")
    );
    println!("Stopwords:          {}", report.stopwords);

    if !report.categories.is_empty() {
        println!();
        println!("Categories:");
        for (label, count) in &report.categories {
            println!("  {:<20} {} keywords", label, count);
        }
    }
    if !report.tags.is_empty() {
        println!();
        println!("Tags:");
        for (label, count) in &report.tags {
            println!("  {:<20} {} keywords", label, count);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &report.warnings {
            println!("  - {}", w);
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for e in &report.errors {
            println!("  - {}", e);
        }
    }

    println!();
    if report.is_valid() {
        println!("Status: OK");
    } else {
        println!("Status: INVALID");
    }
}
