use sylva_core::TopicNode;

/// Horizontal footprint reserved for `node` and its whole descendant structure.
///
/// This is a function of the full tree and ignores expansion state: a collapsed subtree still
/// contributes its complete width to its parent, so a node's slot does not change when one of its
/// descendants is expanded later.
pub fn subtree_width(node: &TopicNode, slot: f64) -> f64 {
    let children: f64 = node
        .subtopics
        .iter()
        .map(|child| subtree_width(child, slot))
        .sum();
    children.max(slot)
}
