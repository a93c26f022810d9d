use sylva_core::SylvaConfig;

pub const DEFAULT_NODE_SLOT_WIDTH: f64 = 180.0;
pub const DEFAULT_LEVEL_SPACING: f64 = 150.0;
pub const DEFAULT_NODE_WIDTH: f64 = 140.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Minimum horizontal footprint reserved for any subtree.
    pub node_slot_width: f64,
    /// Vertical distance between consecutive tree levels.
    pub level_spacing: f64,
    /// Rendered node box, used only for bounds.
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_slot_width: DEFAULT_NODE_SLOT_WIDTH,
            level_spacing: DEFAULT_LEVEL_SPACING,
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Reads `layout.*` keys; missing, non-finite or non-positive values keep their defaults.
    pub fn from_config(cfg: &SylvaConfig) -> Self {
        let positive = |key: &str, fallback: f64| {
            cfg.get_f64(key)
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(fallback)
        };
        Self {
            node_slot_width: positive("layout.nodeSlotWidth", DEFAULT_NODE_SLOT_WIDTH),
            level_spacing: positive("layout.levelSpacing", DEFAULT_LEVEL_SPACING),
            node_width: positive("layout.nodeWidth", DEFAULT_NODE_WIDTH),
            node_height: positive("layout.nodeHeight", DEFAULT_NODE_HEIGHT),
        }
    }
}
