//! Forger Ingest: text normalization and feedback phrase extraction.

pub mod normalize;
pub mod phrases;
pub mod policy;

#[cfg(test)]
mod test_support;

pub use normalize::TextNormalizer;
pub use phrases::{FirstSiblingVerb, PhraseExtractor, VerbSelector};
pub use policy::EntityPolicy;
