//! PII redaction over pipeline entity spans.
//!
//! Each entity's byte span is rewritten in place:
//! - `PERSON`: first word kept, every further word becomes the marker
//! - `EMAIL`: local part becomes the marker, `@domain` kept
//! - `GPE`: comma-separated places collapse to the last part
//! - `PHONE`: a leading `+CC` country code is kept, every other digit group
//!   becomes the marker; without a country code the whole number does
//!
//! Other labels are left alone. Overlapping spans keep the earliest, then
//! longest, one.

use std::sync::Arc;

use forger_core::{Error, Result};
use forger_nlp::{EntityLabel, EntitySpan, NlpPipeline};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::Serialize;

static COUNTRY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d{1,3}[ .(-]").unwrap());
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// One applied replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redaction {
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub replacement: String,
}

/// Result of redacting a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactionResult {
    pub text: String,
    pub redactions: Vec<Redaction>,
}

/// Entity-driven PII redactor.
pub struct Redactor {
    pipeline: Arc<dyn NlpPipeline>,
    marker: String,
}

impl Redactor {
    pub fn new(pipeline: Arc<dyn NlpPipeline>, marker: impl Into<String>) -> Result<Self> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(Error::Config("redaction marker must not be empty".into()));
        }
        Ok(Self { pipeline, marker })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Redact `text` and return the rewritten string.
    pub fn redact(&self, text: &str) -> Result<String> {
        Ok(self.redact_detailed(text)?.text)
    }

    /// Redact `text`, also reporting each replacement.
    pub fn redact_detailed(&self, text: &str) -> Result<RedactionResult> {
        let doc = self.pipeline.parse(text)?;
        Ok(self.redact_entities(text, &doc.entities))
    }

    /// Apply redactions for already-recognised entities.
    pub fn redact_entities(&self, text: &str, entities: &[EntitySpan]) -> RedactionResult {
        let mut candidates: Vec<Redaction> = Vec::new();
        for entity in entities {
            if !matches!(
                entity.label,
                EntityLabel::Person | EntityLabel::Email | EntityLabel::Gpe | EntityLabel::Phone
            ) {
                continue;
            }
            let Some(original) = span_text(text, entity) else {
                tracing::warn!(
                    "Skipping {} entity with invalid span {}..{}",
                    entity.label,
                    entity.start,
                    entity.end
                );
                continue;
            };
            let Some(replacement) = self.replacement(&entity.label, original) else {
                continue;
            };
            if replacement == original {
                continue;
            }
            candidates.push(Redaction {
                label: entity.label.clone(),
                start: entity.start,
                end: entity.end,
                original: original.to_string(),
                replacement,
            });
        }

        // Sort by position, longest match first for overlapping
        candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut redactions = Vec::with_capacity(candidates.len());
        let mut last_end = 0;
        for candidate in candidates {
            if candidate.start >= last_end {
                last_end = candidate.end;
                redactions.push(candidate);
            }
        }

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;
        for redaction in &redactions {
            result.push_str(&text[last_end..redaction.start]);
            result.push_str(&redaction.replacement);
            last_end = redaction.end;
        }
        result.push_str(&text[last_end..]);

        if !redactions.is_empty() {
            tracing::debug!("Applied {} redactions", redactions.len());
        }
        RedactionResult {
            text: result,
            redactions,
        }
    }

    fn replacement(&self, label: &EntityLabel, original: &str) -> Option<String> {
        match label {
            EntityLabel::Person => self.redact_person(original),
            EntityLabel::Email => match original.rfind('@') {
                Some(at) => Some(format!("{}{}", self.marker, &original[at..])),
                None => {
                    tracing::warn!("Email entity without '@' left unredacted");
                    None
                }
            },
            EntityLabel::Gpe => original
                .rsplit(',')
                .next()
                .filter(|_| original.contains(','))
                .map(|last| last.trim().to_string()),
            EntityLabel::Phone => Some(self.redact_phone(original)),
            _ => None,
        }
    }

    /// Every word after the first becomes the marker; separators are kept.
    fn redact_person(&self, name: &str) -> Option<String> {
        let mut out = String::with_capacity(name.len());
        let mut last_end = 0;
        for (i, word) in WORD_RE.find_iter(name).enumerate() {
            out.push_str(&name[last_end..word.start()]);
            out.push_str(if i == 0 { word.as_str() } else { self.marker.as_str() });
            last_end = word.end();
        }
        if last_end == 0 {
            return None;
        }
        out.push_str(&name[last_end..]);
        Some(out)
    }

    fn redact_phone(&self, number: &str) -> String {
        match COUNTRY_CODE_RE.find(number) {
            Some(code) => {
                let rest = &number[code.end()..];
                let body = DIGITS_RE.replace_all(rest, NoExpand(&self.marker));
                format!("{}{}", code.as_str(), body)
            }
            None => self.marker.clone(),
        }
    }
}

fn span_text<'a>(text: &'a str, entity: &EntitySpan) -> Option<&'a str> {
    if entity.start > entity.end || entity.end > text.len() {
        return None;
    }
    text.get(entity.start..entity.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use forger_nlp::{Doc, HeuristicPipeline};

    /// Pipeline that reports no entities.
    struct NoEntities;

    impl NlpPipeline for NoEntities {
        fn name(&self) -> &str {
            "none"
        }

        fn parse(&self, text: &str) -> Result<Doc> {
            Ok(Doc {
                text: text.to_string(),
                ..Doc::default()
            })
        }
    }

    fn redactor() -> Redactor {
        Redactor::new(Arc::new(NoEntities), "[REDACTED]").unwrap()
    }

    fn entity(text: &str, needle: &str, label: EntityLabel) -> EntitySpan {
        let start = text.rfind(needle).unwrap();
        EntitySpan {
            text: needle.to_string(),
            label,
            start,
            end: start + needle.len(),
        }
    }

    #[test]
    fn test_no_entities_is_identity() {
        let text = "Bob Jones wrote from bob@x.io";
        assert_eq!(redactor().redact(text).unwrap(), text);
    }

    #[test]
    fn test_person_keeps_first_name() {
        let text = "Thanks Mary Ann Smith!";
        let result = redactor().redact_entities(text, &[entity(text, "Mary Ann Smith", EntityLabel::Person)]);
        assert_eq!(result.text, "Thanks Mary [REDACTED] [REDACTED]!");
    }

    #[test]
    fn test_person_keeps_original_separators() {
        let text = "From: John\nSmith\t Jr";
        let result =
            redactor().redact_entities(text, &[entity(text, "John\nSmith\t Jr", EntityLabel::Person)]);
        assert_eq!(result.text, "From: John\n[REDACTED]\t [REDACTED]");
        assert_eq!(result.redactions[0].replacement, "John\n[REDACTED]\t [REDACTED]");
    }

    #[test]
    fn test_email_keeps_domain() {
        let text = "Alice's email is alice@example.com.";
        let result = redactor().redact_entities(
            text,
            &[
                entity(text, "Alice", EntityLabel::Person),
                entity(text, "alice@example.com", EntityLabel::Email),
            ],
        );
        assert_eq!(result.text, "Alice's email is [REDACTED]@example.com.");
        assert_eq!(result.redactions.len(), 1);
        assert_eq!(result.redactions[0].original, "alice@example.com");
    }

    #[test]
    fn test_gpe_keeps_last_part() {
        let text = "Based in Leeds, West Yorkshire, UK now";
        let result = redactor().redact_entities(
            text,
            &[entity(text, "Leeds, West Yorkshire, UK", EntityLabel::Gpe)],
        );
        assert_eq!(result.text, "Based in UK now");

        let single = "Based in Paris";
        let result = redactor().redact_entities(single, &[entity(single, "Paris", EntityLabel::Gpe)]);
        assert_eq!(result.text, single);
    }

    #[test]
    fn test_phone_with_country_code() {
        let text = "call +44 20-7946 0958";
        let result = redactor().redact_entities(text, &[entity(text, "+44 20-7946 0958", EntityLabel::Phone)]);
        assert_eq!(result.text, "call +44 [REDACTED]-[REDACTED] [REDACTED]");
    }

    #[test]
    fn test_phone_without_country_code() {
        let text = "call (555) 123-4567 now";
        let result = redactor().redact_entities(text, &[entity(text, "(555) 123-4567", EntityLabel::Phone)]);
        assert_eq!(result.text, "call [REDACTED] now");
    }

    #[test]
    fn test_marker_is_literal() {
        let redactor = Redactor::new(Arc::new(NoEntities), "$1").unwrap();
        let text = "+1 555 0100";
        let result = redactor.redact_entities(text, &[entity(text, text, EntityLabel::Phone)]);
        assert_eq!(result.text, "+1 $1 $1");
    }

    #[test]
    fn test_span_based_not_literal() {
        let text = "Smith met John Smith";
        let result = redactor().redact_entities(text, &[entity(text, "John Smith", EntityLabel::Person)]);
        assert_eq!(result.text, "Smith met John [REDACTED]");
    }

    #[test]
    fn test_overlaps_keep_earliest_longest() {
        let text = "Ask Jane Doe now";
        let long = entity(text, "Jane Doe", EntityLabel::Person);
        let inner = entity(text, "Doe now", EntityLabel::Person);
        let result = redactor().redact_entities(text, &[inner, long]);
        assert_eq!(result.text, "Ask Jane [REDACTED] now");
        assert_eq!(result.redactions.len(), 1);
    }

    #[test]
    fn test_invalid_spans_are_skipped() {
        let text = "café owner";
        let bad = [
            EntitySpan {
                text: "x".into(),
                label: EntityLabel::Person,
                start: 4,
                end: 200,
            },
            EntitySpan {
                text: "é".into(),
                label: EntityLabel::Phone,
                start: 4,
                end: 5,
            },
            EntitySpan {
                text: "owner".into(),
                label: EntityLabel::Email,
                start: 6,
                end: 11,
            },
        ];
        let result = redactor().redact_entities(text, &bad);
        assert_eq!(result.text, text);
        assert!(result.redactions.is_empty());
    }

    #[test]
    fn test_other_labels_untouched() {
        let text = "Joined Acme Labs";
        let result = redactor().redact_entities(text, &[entity(text, "Acme Labs", EntityLabel::Org)]);
        assert_eq!(result.text, text);
    }

    #[test]
    fn test_empty_marker_is_config_error() {
        assert!(matches!(
            Redactor::new(Arc::new(NoEntities), ""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_with_heuristic_pipeline() {
        let redactor = Redactor::new(Arc::new(HeuristicPipeline::english()), "[REDACTED]").unwrap();
        assert_eq!(
            redactor.redact("Alice's email is alice@example.com.").unwrap(),
            "Alice's email is [REDACTED]@example.com."
        );
        assert_eq!(
            redactor.redact("Feedback from John Smith").unwrap(),
            "Feedback from John [REDACTED]"
        );
    }
}
