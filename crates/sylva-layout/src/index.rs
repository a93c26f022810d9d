//! Flattened, pre-order view of an installed topic tree.
//!
//! Built once per installed tree. Subtree widths are expansion-independent, so they are computed
//! here a single time instead of on every layout pass. Entries are addressed by pre-order
//! position, which stays correct even when the source tree repeats an id.

use rustc_hash::FxHashMap;
use sylva_core::TopicNode;

#[derive(Debug, Clone, PartialEq)]
pub struct TopicEntry {
    pub id: String,
    pub topic: String,
    pub accuracy: f64,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
    /// Cached [`crate::subtree_width`] of this entry.
    pub width: f64,
}

impl TopicEntry {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TopicIndex {
    entries: Vec<TopicEntry>,
    by_id: FxHashMap<String, Vec<usize>>,
}

impl TopicIndex {
    pub fn build(tree: &TopicNode, slot: f64) -> Self {
        let mut entries: Vec<TopicEntry> = Vec::with_capacity(tree.node_count());
        let mut by_id: FxHashMap<String, Vec<usize>> = FxHashMap::default();

        let mut stack: Vec<(&TopicNode, Option<usize>, usize)> = vec![(tree, None, 0)];
        while let Some((node, parent, depth)) = stack.pop() {
            let ix = entries.len();
            if let Some(p) = parent {
                entries[p].children.push(ix);
            }
            by_id.entry(node.id.clone()).or_default().push(ix);
            entries.push(TopicEntry {
                id: node.id.clone(),
                topic: node.topic.clone(),
                accuracy: node.accuracy,
                parent,
                children: Vec::with_capacity(node.subtopics.len()),
                depth,
                width: slot,
            });
            for child in node.subtopics.iter().rev() {
                stack.push((child, Some(ix), depth + 1));
            }
        }

        // Children always come after their parent in pre-order, so a reverse sweep is bottom-up.
        for ix in (0..entries.len()).rev() {
            let sum: f64 = entries[ix].children.iter().map(|&c| entries[c].width).sum();
            entries[ix].width = sum.max(slot);
        }

        Self { entries, by_id }
    }

    pub const fn root(&self) -> usize {
        0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, ix: usize) -> &TopicEntry {
        &self.entries[ix]
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    /// Pre-order positions of every node carrying `id`.
    pub fn occurrences(&self, id: &str) -> &[usize] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First pre-order position of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.occurrences(id).first().copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Whether any node carrying `id` has subtopics.
    pub fn has_children(&self, id: &str) -> bool {
        self.occurrences(id)
            .iter()
            .any(|&ix| self.entries[ix].has_children())
    }

    /// Ids carried by more than one node, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut out: Vec<(usize, &str)> = self
            .by_id
            .iter()
            .filter(|(_, v)| v.len() > 1)
            .map(|(id, v)| (v[0], id.as_str()))
            .collect();
        out.sort_unstable();
        out.into_iter().map(|(_, id)| id).collect()
    }
}
