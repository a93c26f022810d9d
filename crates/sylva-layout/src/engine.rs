//! Owns the installed tree, the expansion state and the derived layout graph.
//!
//! Every mutation rebuilds the whole graph with one root-level layout pass and hands it to the
//! publisher. Nothing here blocks or fails: unknown ids and childless nodes are ignored.

use crate::config::LayoutConfig;
use crate::diff::GraphDiff;
use crate::drilldown::DrillDown;
use crate::expansion::ExpansionState;
use crate::graph::LayoutGraph;
use crate::index::TopicIndex;
use crate::layout::layout_index;
use sylva_core::TopicNode;

/// Token identifying one asynchronous tree request.
///
/// Larger is newer. Only the most recently issued generation may install its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }
}

type Publisher = Box<dyn FnMut(&LayoutGraph)>;

struct Installed {
    tree: TopicNode,
    index: TopicIndex,
}

pub struct TopicTreeEngine {
    config: LayoutConfig,
    installed: Option<Installed>,
    expansion: ExpansionState,
    graph: LayoutGraph,
    drill_down: Option<DrillDown>,
    generation: u64,
    publisher: Option<Publisher>,
}

impl std::fmt::Debug for TopicTreeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicTreeEngine")
            .field("config", &self.config)
            .field("root", &self.installed.as_ref().map(|i| &i.tree.id))
            .field("expansion", &self.expansion)
            .field("nodes", &self.graph.nodes.len())
            .field("edges", &self.graph.edges.len())
            .field("generation", &self.generation)
            .field("publisher", &self.publisher.is_some())
            .finish()
    }
}

impl Default for TopicTreeEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl TopicTreeEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            installed: None,
            expansion: ExpansionState::new(),
            graph: LayoutGraph::default(),
            drill_down: None,
            generation: 0,
            publisher: None,
        }
    }

    /// Registers the rendering surface. It receives every recomputed graph.
    pub fn set_publisher(&mut self, publisher: impl FnMut(&LayoutGraph) + 'static) {
        self.publisher = Some(Box::new(publisher));
    }

    pub fn with_publisher(mut self, publisher: impl FnMut(&LayoutGraph) + 'static) -> Self {
        self.set_publisher(publisher);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn tree(&self) -> Option<&TopicNode> {
        self.installed.as_ref().map(|i| &i.tree)
    }

    pub fn index(&self) -> Option<&TopicIndex> {
        self.installed.as_ref().map(|i| &i.index)
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Replaces the tree, collapses everything and republishes a root-only graph.
    pub fn initialize_tree(&mut self, tree: TopicNode) {
        self.generation += 1;
        let index = TopicIndex::build(&tree, self.config.node_slot_width);
        for id in index.duplicate_ids() {
            tracing::warn!(id, "topic id is not unique; diagram identities will collide");
        }
        tracing::debug!(
            root = %tree.id,
            nodes = index.len(),
            generation = self.generation,
            "installed topic tree"
        );
        self.drill_down = Some(DrillDown::new(&index));
        self.installed = Some(Installed { tree, index });
        self.expansion.clear();
        self.relayout();
    }

    /// Starts an asynchronous request whose result will be installed with
    /// [`Self::install_if_current`].
    pub fn begin_request(&mut self) -> Generation {
        self.generation += 1;
        Generation(self.generation)
    }

    /// Installs `tree` unless a newer request was started or a newer tree installed since
    /// `generation` was issued. Returns whether the tree was installed.
    pub fn install_if_current(&mut self, generation: Generation, tree: TopicNode) -> bool {
        if generation.0 != self.generation {
            tracing::debug!(
                stale = generation.0,
                current = self.generation,
                "dropping out-of-date topic tree"
            );
            return false;
        }
        self.initialize_tree(tree);
        true
    }

    /// Flips the expansion flag of `id`.
    ///
    /// Unknown ids and nodes without subtopics are left alone. Returns whether anything changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(index) = self.index() else {
            return false;
        };
        if !index.has_children(id) {
            return false;
        }
        self.expansion.toggle(id);
        self.relayout();
        true
    }

    /// Click handler for the rendering surface: only rendered nodes with children react.
    ///
    /// With duplicate ids any rendered occurrence that has children makes the click count, since a
    /// renderer keyed by id may be showing any of them.
    pub fn on_node_click(&mut self, id: &str) -> bool {
        if !self.graph.nodes_with_id(id).any(|n| n.has_children) {
            return false;
        }
        self.toggle(id)
    }

    /// Marks every node with subtopics as expanded.
    pub fn expand_all(&mut self) -> bool {
        let Some(index) = self.index() else {
            return false;
        };
        let ids: Vec<String> = index
            .entries()
            .iter()
            .filter(|e| e.has_children())
            .map(|e| e.id.clone())
            .collect();
        let mut changed = false;
        for id in &ids {
            changed |= self.expansion.expand(id);
        }
        if changed {
            self.relayout();
        }
        changed
    }

    pub fn collapse_all(&mut self) -> bool {
        if self.expansion.is_empty() {
            return false;
        }
        self.expansion.clear();
        self.relayout();
        true
    }

    /// Breadcrumb navigator over the installed tree, reset on every install.
    pub fn drill_down(&self) -> Option<&DrillDown> {
        self.drill_down.as_ref()
    }

    /// See [`DrillDown::select`].
    pub fn drill_select(&mut self, id: &str) -> bool {
        match (&self.installed, self.drill_down.as_mut()) {
            (Some(installed), Some(nav)) => nav.select(&installed.index, id),
            _ => false,
        }
    }

    /// See [`DrillDown::select_child`].
    pub fn drill_select_child(&mut self, id: &str) -> bool {
        match (&self.installed, self.drill_down.as_mut()) {
            (Some(installed), Some(nav)) => nav.select_child(&installed.index, id),
            _ => false,
        }
    }

    fn relayout(&mut self) {
        let graph = match &self.installed {
            Some(installed) => layout_index(&installed.index, &self.expansion, &self.config),
            None => LayoutGraph::default(),
        };
        if tracing::enabled!(tracing::Level::DEBUG) {
            let diff = GraphDiff::between(&self.graph, &graph);
            tracing::debug!(
                nodes = graph.nodes.len(),
                added = diff.added_nodes.len(),
                removed = diff.removed_nodes.len(),
                moved = diff.moved_nodes.len(),
                "recomputed topic layout"
            );
        }
        self.graph = graph;
        if let Some(publish) = self.publisher.as_mut() {
            publish(&self.graph);
        }
    }
}
