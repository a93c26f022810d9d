use serde::{Deserialize, Deserializer, Serialize};

/// One extracted topic and its ordered subtopics.
///
/// Trees are produced by an external extraction step and replaced wholesale; nothing in this
/// workspace mutates an installed tree in place. `id` is expected to be unique across the whole
/// tree, but that is only checked by [`crate::diagnostics::check_tree`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicNode {
    pub id: String,
    pub topic: String,
    #[serde(default = "missing_accuracy", deserialize_with = "null_as_nan")]
    pub accuracy: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtopics: Vec<TopicNode>,
}

fn missing_accuracy() -> f64 {
    f64::NAN
}

fn null_as_nan<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<TopicNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TopicNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TopicNode {
    pub fn leaf(id: impl Into<String>, topic: impl Into<String>, accuracy: f64) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            accuracy,
            subtopics: Vec::new(),
        }
    }

    pub fn with_subtopics(mut self, subtopics: impl IntoIterator<Item = TopicNode>) -> Self {
        self.subtopics.extend(subtopics);
        self
    }

    pub fn has_subtopics(&self) -> bool {
        !self.subtopics.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Number of levels in this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .subtopics
            .iter()
            .map(TopicNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// First node with the given id in pre-order.
    pub fn find(&self, id: &str) -> Option<&TopicNode> {
        self.walk().find(|n| n.id == id)
    }

    /// Pre-order traversal over this subtree.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a TopicNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TopicNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.subtopics.iter().rev());
        Some(node)
    }
}
