#![forbid(unsafe_code)]

//! `sylva` turns free text into a hierarchical topic tree and lays it out for progressive,
//! click-driven exploration.
//!
//! # Features
//!
//! - `layout` (default): the layout engine (`sylva::layout`)

pub use sylva_core::*;

#[cfg(feature = "layout")]
pub mod layout {
    pub use sylva_layout::*;

    /// Parses `text` and installs the tree into a new engine configured from `config`.
    ///
    /// Repairs made while parsing come first in the returned diagnostics, followed by the
    /// structural findings of [`crate::check_tree`]. Neither prevents installation.
    pub fn engine_from_text(
        text: &str,
        config: &crate::SylvaConfig,
    ) -> crate::Result<(TopicTreeEngine, Vec<crate::Diagnostic>)> {
        let parsed = crate::parse_topic_tree(text)?;
        let mut diagnostics = parsed.diagnostics;
        diagnostics.extend(crate::check_tree(&parsed.tree));

        let mut engine = TopicTreeEngine::new(LayoutConfig::from_config(config));
        engine.initialize_tree(parsed.tree);
        Ok((engine, diagnostics))
    }
}
