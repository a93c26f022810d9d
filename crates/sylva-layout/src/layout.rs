use crate::config::LayoutConfig;
use crate::expansion::ExpansionState;
use crate::graph::{LayoutEdge, LayoutGraph, PositionedNode};
use crate::index::TopicIndex;
use sylva_core::TopicNode;

/// Lays out the visible part of `tree` with the root at `(0, 0)`.
///
/// Pure and deterministic: the same tree and expansion state always give the same graph.
pub fn layout_tree(
    tree: &TopicNode,
    expansion: &ExpansionState,
    config: &LayoutConfig,
) -> LayoutGraph {
    let index = TopicIndex::build(tree, config.node_slot_width);
    layout_index(&index, expansion, config)
}

/// Same as [`layout_tree`], over a prebuilt index (widths already cached).
pub fn layout_index(
    index: &TopicIndex,
    expansion: &ExpansionState,
    config: &LayoutConfig,
) -> LayoutGraph {
    let mut placer = Placer {
        index,
        expansion,
        level_spacing: config.level_spacing,
        graph: LayoutGraph::default(),
    };
    if !index.is_empty() {
        placer.place(index.root(), None, 0.0, 0.0);
    }
    placer.graph
}

struct Placer<'a> {
    index: &'a TopicIndex,
    expansion: &'a ExpansionState,
    level_spacing: f64,
    graph: LayoutGraph,
}

impl Placer<'_> {
    fn place(&mut self, ix: usize, parent_id: Option<&str>, center_x: f64, y: f64) {
        let index = self.index;
        let entry = index.entry(ix);
        let is_expanded = self.expansion.is_expanded(&entry.id);

        self.graph.nodes.push(PositionedNode {
            id: entry.id.clone(),
            label: entry.topic.clone(),
            accuracy: entry.accuracy,
            has_children: entry.has_children(),
            is_expanded,
            x: center_x,
            y,
            depth: entry.depth,
        });
        if let Some(parent_id) = parent_id {
            self.graph
                .edges
                .push(LayoutEdge::between(parent_id, &entry.id));
        }

        // Children of a collapsed node are never visited, so their whole subtree is absent.
        if !is_expanded || entry.children.is_empty() {
            return;
        }

        let total: f64 = entry.children.iter().map(|&c| index.entry(c).width).sum();
        let mut cursor = center_x - total / 2.0;
        let child_y = y + self.level_spacing;
        for &child in &entry.children {
            let width = index.entry(child).width;
            self.place(child, Some(&entry.id), cursor + width / 2.0, child_y);
            cursor += width;
        }
    }
}
