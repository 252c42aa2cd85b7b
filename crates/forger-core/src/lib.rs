//! Forger Core: error type, failure dispositions, configuration.

pub mod config;
pub mod error;

pub use config::{DataPaths, ForgerConfig, RedactionConfig, RedactionTarget, TopicConfig};
pub use error::{Disposition, Error, Result};
