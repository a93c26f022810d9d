use crate::config::LayoutConfig;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    /// Non-finite values serialize as `null` and read back as NaN.
    #[serde(deserialize_with = "null_as_nan")]
    pub accuracy: f64,
    pub has_children: bool,
    pub is_expanded: bool,
    pub x: f64,
    pub y: f64,
    /// Tree level; the root is 0.
    pub depth: usize,
}

impl PositionedNode {
    /// Accuracy as a whole percentage (`"85%"`), or `"n/a"` when it is not a finite number.
    pub fn accuracy_percent(&self) -> String {
        format_percent(self.accuracy, 0)
    }

    /// Accuracy with one decimal (`"85.0%"`), as shown in node tooltips.
    pub fn accuracy_detail(&self) -> String {
        format_percent(self.accuracy, 1)
    }
}

// Halves round away from zero (12.5 -> 13), not to even as `{:.0}` would.
fn format_percent(accuracy: f64, decimals: usize) -> String {
    if !accuracy.is_finite() {
        return "n/a".to_string();
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (accuracy * 100.0 * scale).round() / scale;
    format!("{rounded:.decimals$}%")
}

fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
}

impl LayoutEdge {
    pub fn between(source_id: &str, target_id: &str) -> Self {
        Self {
            id: format!("e-{source_id}-{target_id}"),
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Positioned nodes and edges handed to a rendering surface.
///
/// Rebuilt wholesale on every expansion or tree change. Nodes and edges are in pre-order of the
/// visible tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<LayoutEdge>,
}

impl LayoutGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node with `id`. With duplicate ids the output order decides which one a renderer
    /// keyed by id ends up showing; see [`crate::TopicIndex::duplicate_ids`].
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Every rendered node carrying `id`, in output order.
    pub fn nodes_with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a PositionedNode> {
        self.nodes.iter().filter(move |n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edge_between(&self, source_id: &str, target_id: &str) -> Option<&LayoutEdge> {
        self.edges
            .iter()
            .find(|e| e.source_id == source_id && e.target_id == target_id)
    }

    /// Bounding box of every node box (`node_width` x `node_height`, centered on the node).
    pub fn bounds(&self, config: &LayoutConfig) -> Option<Bounds> {
        let hw = config.node_width / 2.0;
        let hh = config.node_height / 2.0;
        Bounds::from_points(
            self.nodes
                .iter()
                .flat_map(|n| [(n.x - hw, n.y - hh), (n.x + hw, n.y + hh)]),
        )
    }
}
