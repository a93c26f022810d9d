#![forbid(unsafe_code)]

//! Topic tree model + ingestion (headless).
//!
//! Design goals:
//! - accept whatever a chat-completion model returns and degrade gracefully
//! - deterministic, testable outputs
//! - runtime-agnostic async APIs (no specific executor required)

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod provider;

pub use config::SylvaConfig;
pub use diagnostics::{Diagnostic, check_tree, disambiguate_ids, duplicate_ids};
pub use error::{Error, Result, Stage};
pub use model::TopicNode;
pub use parse::{ParsedTree, parse_topic_tree, strip_code_fence};
pub use pipeline::{Extraction, Pipeline, PipelineConfig};
pub use provider::{ChatCompletion, ProviderError, Transcriber};

#[cfg(test)]
mod tests;
