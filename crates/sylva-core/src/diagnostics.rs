//! Structural checks over a topic tree.
//!
//! None of these are fatal: the layout engine accepts any tree. They exist so callers can log,
//! reject, or repair model output before installing it.

use crate::model::TopicNode;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The same id appears more than once; diagram identities collide.
    DuplicateId { id: String, occurrences: usize },
    /// Accuracy is outside `[0.0, 1.0]` or not a finite number.
    AccuracyOutOfRange { id: String, accuracy: f64 },
    EmptyLabel { id: String },
    /// The source had no usable id; one was derived from the node's position.
    SynthesizedId { id: String },
    /// A `subtopics` entry was not a JSON object and was dropped.
    SkippedSubtopic {
        parent_id: String,
        index: usize,
        found: &'static str,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::DuplicateId { id, occurrences } => {
                write!(f, "duplicate id `{id}` ({occurrences} occurrences)")
            }
            Diagnostic::AccuracyOutOfRange { id, accuracy } => {
                write!(f, "accuracy of `{id}` is out of range: {accuracy}")
            }
            Diagnostic::EmptyLabel { id } => write!(f, "topic `{id}` has an empty label"),
            Diagnostic::SynthesizedId { id } => write!(f, "missing id replaced with `{id}`"),
            Diagnostic::SkippedSubtopic {
                parent_id,
                index,
                found,
            } => write!(
                f,
                "subtopic #{index} of `{parent_id}` is {found}, not an object; skipped"
            ),
        }
    }
}

/// Runs every structural check over `tree`. Output order follows the pre-order position of the
/// first offending node.
pub fn check_tree(tree: &TopicNode) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut seen: IndexMap<&str, usize> = IndexMap::new();

    for node in tree.walk() {
        *seen.entry(node.id.as_str()).or_insert(0) += 1;
        if !(node.accuracy.is_finite() && (0.0..=1.0).contains(&node.accuracy)) {
            out.push(Diagnostic::AccuracyOutOfRange {
                id: node.id.clone(),
                accuracy: node.accuracy,
            });
        }
        if node.topic.trim().is_empty() {
            out.push(Diagnostic::EmptyLabel {
                id: node.id.clone(),
            });
        }
    }

    for (id, occurrences) in seen {
        if occurrences > 1 {
            out.push(Diagnostic::DuplicateId {
                id: id.to_string(),
                occurrences,
            });
        }
    }
    out
}

/// Ids that occur more than once, in first-seen order.
pub fn duplicate_ids(tree: &TopicNode) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for node in tree.walk() {
        *counts.entry(node.id.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Renames the second and later occurrences of every id to `{id}~{n}`, walking in pre-order.
///
/// `n` starts at 2 and skips any name already present in the tree, so the result is unique.
/// Returns how many nodes were renamed.
pub fn disambiguate_ids(tree: &mut TopicNode) -> usize {
    let mut taken: FxHashSet<String> = tree.walk().map(|n| n.id.clone()).collect();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut renamed = 0;

    let mut stack: Vec<&mut TopicNode> = vec![tree];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id.clone()) {
            let mut n = 2usize;
            let fresh = loop {
                let candidate = format!("{}~{n}", node.id);
                if !taken.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            tracing::debug!(from = %node.id, to = %fresh, "renamed duplicate topic id");
            taken.insert(fresh.clone());
            seen.insert(fresh.clone());
            node.id = fresh;
            renamed += 1;
        }
        stack.extend(node.subtopics.iter_mut().rev());
    }
    renamed
}
