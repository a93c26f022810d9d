//! Node/edge differences between two layout graphs.
//!
//! The engine republishes whole graphs; renderers that animate transitions can use this to find
//! what actually changed.

use crate::graph::{LayoutGraph, PositionedNode};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphDiff {
    pub added_nodes: Vec<String>,
    pub removed_nodes: Vec<String>,
    /// Same id, different position.
    pub moved_nodes: Vec<String>,
    /// Same id and position, different label, accuracy or disclosure flags.
    pub restyled_nodes: Vec<String>,
    pub added_edges: Vec<String>,
    pub removed_edges: Vec<String>,
}

impl GraphDiff {
    pub fn between(old: &LayoutGraph, new: &LayoutGraph) -> Self {
        let old_nodes = by_id(&old.nodes, |n| &n.id);
        let new_nodes = by_id(&new.nodes, |n| &n.id);
        let old_edges = by_id(&old.edges, |e| &e.id);
        let new_edges = by_id(&new.edges, |e| &e.id);

        let mut diff = Self::default();
        for (id, n) in &new_nodes {
            match old_nodes.get(id) {
                None => diff.added_nodes.push(id.to_string()),
                Some(o) if o.x != n.x || o.y != n.y => diff.moved_nodes.push(id.to_string()),
                Some(o) if !same_style(o, n) => diff.restyled_nodes.push(id.to_string()),
                Some(_) => {}
            }
        }
        diff.removed_nodes = missing_from(&old_nodes, &new_nodes);
        diff.added_edges = missing_from(&new_edges, &old_edges);
        diff.removed_edges = missing_from(&old_edges, &new_edges);
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.moved_nodes.is_empty()
            && self.restyled_nodes.is_empty()
            && self.added_edges.is_empty()
            && self.removed_edges.is_empty()
    }
}

// Last write wins for repeated ids, like a renderer keyed by id.
fn by_id<'a, T>(items: &'a [T], key: impl Fn(&'a T) -> &'a String) -> IndexMap<&'a str, &'a T> {
    items.iter().map(|item| (key(item).as_str(), item)).collect()
}

fn missing_from<T>(from: &IndexMap<&str, T>, other: &IndexMap<&str, T>) -> Vec<String> {
    from.keys()
        .filter(|id| !other.contains_key(*id))
        .map(|id| id.to_string())
        .collect()
}

fn same_style(a: &PositionedNode, b: &PositionedNode) -> bool {
    a.label == b.label
        && a.has_children == b.has_children
        && a.is_expanded == b.is_expanded
        && (a.accuracy == b.accuracy || (a.accuracy.is_nan() && b.accuracy.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExpansionState, LayoutConfig, layout_tree};
    use sylva_core::TopicNode;

    fn sample() -> TopicNode {
        TopicNode::leaf("r", "R", 1.0).with_subtopics([
            TopicNode::leaf("a", "A", 0.9),
            TopicNode::leaf("b", "B", 0.8)
                .with_subtopics([TopicNode::leaf("b1", "B1", 0.7), TopicNode::leaf("b2", "B2", 0.6)]),
        ])
    }

    fn graph(expanded: &[&str]) -> LayoutGraph {
        let expansion: ExpansionState = expanded.iter().copied().collect();
        layout_tree(&sample(), &expansion, &LayoutConfig::default())
    }

    #[test]
    fn identical_graphs_have_an_empty_diff() {
        let g = graph(&["r", "b"]);
        assert!(GraphDiff::between(&g, &g.clone()).is_empty());
    }

    #[test]
    fn expanding_adds_nodes_and_edges_and_restyles_the_parent() {
        let diff = GraphDiff::between(&graph(&["r"]), &graph(&["r", "b"]));
        assert_eq!(diff.added_nodes, ["b1", "b2"]);
        assert_eq!(diff.added_edges, ["e-b-b1", "e-b-b2"]);
        assert_eq!(diff.restyled_nodes, ["b"]);
        assert!(diff.removed_nodes.is_empty());
        assert!(diff.moved_nodes.is_empty());
    }

    #[test]
    fn collapsing_the_root_removes_the_whole_visible_subtree() {
        let diff = GraphDiff::between(&graph(&["r", "b"]), &graph(&["b"]));
        assert_eq!(diff.removed_nodes, ["a", "b", "b1", "b2"]);
        assert_eq!(diff.removed_edges.len(), 4);
        assert_eq!(diff.restyled_nodes, ["r"]);
    }

    #[test]
    fn changed_positions_are_reported_as_moves() {
        let old = graph(&["r"]);
        let mut new = old.clone();
        new.nodes[1].x += 10.0;
        let diff = GraphDiff::between(&old, &new);
        assert_eq!(diff.moved_nodes, ["a"]);
    }
}
