//! Breadcrumb-style navigation: a path from the root down to the node being inspected, plus a
//! panel listing the selected node's subtopics.

use crate::index::{TopicEntry, TopicIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillDown {
    path: Vec<usize>,
    selected: Option<usize>,
}

impl DrillDown {
    /// Path holds only the root; nothing is selected.
    pub fn new(index: &TopicIndex) -> Self {
        let path = if index.is_empty() {
            Vec::new()
        } else {
            vec![index.root()]
        };
        Self {
            path,
            selected: None,
        }
    }

    pub fn reset(&mut self, index: &TopicIndex) {
        *self = Self::new(index);
    }

    /// Selects a node that is already on the path. Other ids are ignored.
    pub fn select(&mut self, index: &TopicIndex, id: &str) -> bool {
        match self.path.iter().copied().find(|&ix| index.entry(ix).id == id) {
            Some(ix) => {
                self.selected = Some(ix);
                true
            }
            None => false,
        }
    }

    /// Descends into a subtopic of the selected node.
    ///
    /// Everything on the path below the selected node is dropped before the child is appended.
    pub fn select_child(&mut self, index: &TopicIndex, id: &str) -> bool {
        let Some(selected) = self.selected else {
            return false;
        };
        let Some(child) = index
            .entry(selected)
            .children
            .iter()
            .copied()
            .find(|&c| index.entry(c).id == id)
        else {
            return false;
        };

        if let Some(pos) = self.path.iter().position(|&ix| ix == selected) {
            self.path.truncate(pos + 1);
        }
        self.path.push(child);
        self.selected = Some(child);
        true
    }

    pub fn path<'a>(&self, index: &'a TopicIndex) -> Vec<&'a TopicEntry> {
        self.path.iter().map(|&ix| index.entry(ix)).collect()
    }

    pub fn selected<'a>(&self, index: &'a TopicIndex) -> Option<&'a TopicEntry> {
        self.selected.map(|ix| index.entry(ix))
    }

    /// Subtopics of the selected node; empty when nothing is selected or it is a leaf.
    pub fn panel<'a>(&self, index: &'a TopicIndex) -> Vec<&'a TopicEntry> {
        match self.selected {
            Some(ix) => index
                .entry(ix)
                .children
                .iter()
                .map(|&c| index.entry(c))
                .collect(),
            None => Vec::new(),
        }
    }
}
