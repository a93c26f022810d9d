#![forbid(unsafe_code)]

//! Topic tree layout and progressive disclosure.
//!
//! Pipeline per state change: [`TopicIndex`] (built once per tree, caches subtree widths) +
//! [`ExpansionState`] -> [`layout_index`] -> [`LayoutGraph`] -> publisher.

pub mod config;
pub mod diff;
pub mod drilldown;
pub mod engine;
pub mod expansion;
pub mod graph;
pub mod index;
pub mod layout;
pub mod width;

pub use config::LayoutConfig;
pub use diff::GraphDiff;
pub use drilldown::DrillDown;
pub use engine::{Generation, TopicTreeEngine};
pub use expansion::ExpansionState;
pub use graph::{Bounds, LayoutEdge, LayoutGraph, PositionedNode};
pub use index::{TopicEntry, TopicIndex};
pub use layout::{layout_index, layout_tree};
pub use width::subtree_width;
