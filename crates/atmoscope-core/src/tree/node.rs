//! Display-tree arena
//!
//! Every adapter builds one of these per fetch: a flat arena of display
//! nodes with explicit parent indices. Ownership runs top-down (the arena
//! owns everything); the parent index is an advisory back-reference,
//! recomputed from scratch on the next fetch. Building the arena is a
//! single depth-first traversal, so parent links are resolved exactly
//! once per fetch, before any lookup can observe the new tree.

use super::adapter::Activation;

/// Index of a node within its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One displayable node.
#[derive(Debug, Clone)]
pub struct Node {
    pub label: String,
    /// Workbench icon name, e.g. `symbol-variable`.
    pub icon: &'static str,
    pub description: String,
    pub tooltip: Option<String>,
    /// Set when the node records a parse/analysis error; rendered
    /// distinctly from normal nodes.
    pub is_error: bool,
    /// What happens when the user activates the node.
    pub action: Option<Activation>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    #[must_use]
    pub fn new(label: impl Into<String>, icon: &'static str) -> Self {
        Self {
            label: label.into(),
            icon,
            description: String::new(),
            tooltip: None,
            is_error: false,
            action: None,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Activation) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_error(mut self, is_error: bool) -> Self {
        self.is_error = is_error;
        self
    }
}

/// What the workbench needs to render one node.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor<'a> {
    pub label: &'a str,
    pub icon: &'static str,
    pub description: &'a str,
    pub tooltip: Option<&'a str>,
    pub expandable: bool,
    pub is_error: bool,
}

/// Arena of display nodes for one fetched payload.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Tree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under the given parent (or as a root), linking the
    /// parent back-reference and the parent's child list in one step.
    pub fn push(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        self.nodes.push(node);
        match parent {
            Some(parent_id) => self.nodes[parent_id.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    #[must_use]
    pub fn descriptor(&self, id: NodeId) -> Descriptor<'_> {
        let node = self.get(id);
        Descriptor {
            label: &node.label,
            icon: node.icon,
            description: &node.description,
            tooltip: node.tooltip.as_deref(),
            expandable: !node.children.is_empty(),
            is_error: node.is_error,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in insertion (depth-first) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }
}
