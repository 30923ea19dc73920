use super::node::{Node, NodeId};
use crate::TreeFloat;
use slotmap::SlotMap;
use std::sync::Arc;
use thiserror::Error;

/// Arena-backed phylogenetic tree.
///
/// Nodes are stored in a [SlotMap]; their keys double as node identities,
/// assigned once at insertion and never reused within a tree. Invariant: a
/// node is reachable from its parent's `child_id` via the `sib_id` chain
/// exactly once, and the root is the unique node with no parent. The
/// NEWICK parser is the only writer, so the invariant holds by
/// construction.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    root_id: Option<NodeId>,
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Node with NodeId: {0} does not exist.")]
    NodeDoesNotExist(NodeId),
}

impl Tree {
    // =========================================================================
    // Construction
    // =========================================================================

    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_node(&mut self, mut node: Node) -> NodeId {
        self.nodes.insert_with_key(|node_id| {
            node.set_node_id(node_id);
            node
        })
    }

    /// Creates a new node and links it as the first child of `parent_id`.
    pub(crate) fn add_child(
        &mut self,
        parent_id: NodeId,
    ) -> Result<NodeId, TreeError> {
        if !self.node_exists(Some(parent_id)) {
            return Err(TreeError::NodeDoesNotExist(parent_id));
        }

        let mut node = Node::new();
        node.set_parent_id(Some(parent_id));
        let child_id = self.add_node(node);

        if let Some(parent_node) = self.node_mut(Some(parent_id)) {
            parent_node.set_child_id(Some(child_id));
        }

        Ok(child_id)
    }

    /// Creates a new node sharing `node_id`'s parent and links it as the
    /// next sibling of `node_id`.
    pub(crate) fn add_sibling(
        &mut self,
        node_id: NodeId,
    ) -> Result<NodeId, TreeError> {
        let parent_id = match self.node(Some(node_id)) {
            Some(node) => node.parent_id(),
            None => return Err(TreeError::NodeDoesNotExist(node_id)),
        };

        let mut node = Node::new();
        node.set_parent_id(parent_id);
        let sib_id = self.add_node(node);

        if let Some(node) = self.node_mut(Some(node_id)) {
            node.set_sib_id(Some(sib_id));
        }

        Ok(sib_id)
    }

    pub(crate) fn set_root_id(&mut self, root_id: Option<NodeId>) {
        self.root_id = root_id;
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    pub fn node(&self, node_id: Option<NodeId>) -> Option<&Node> {
        if let Some(node_id) = node_id { self.nodes.get(node_id) } else { None }
    }

    pub(crate) fn node_mut(&mut self, node_id: Option<NodeId>) -> Option<&mut Node> {
        if let Some(node_id) = node_id {
            self.nodes.get_mut(node_id)
        } else {
            None
        }
    }

    pub fn node_exists(&self, node_id: Option<NodeId>) -> bool {
        self.node(node_id).is_some()
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    pub fn node_ids_all(&self) -> Vec<NodeId> {
        self.nodes.keys().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn label(&self, node_id: NodeId) -> Option<Arc<str>> {
        self.nodes.get(node_id)?.label()
    }

    pub fn branch_length(&self, node_id: NodeId) -> Option<TreeFloat> {
        self.nodes.get(node_id)?.branch_length()
    }

    pub fn has_branch_length(&self, node_id: NodeId) -> bool {
        self.branch_length(node_id).is_some()
    }

    // =========================================================================
    // Link Access
    // =========================================================================

    pub fn parent_id(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id)?.parent_id()
    }

    pub fn first_child_id(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id)?.child_id()
    }

    pub fn next_sib_id(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id)?.sib_id()
    }

    pub fn is_tip(&self, node_id: NodeId) -> bool {
        self.first_child_id(node_id).is_none()
    }

    /// Iterates over the children of `node_id` by walking the sibling
    /// chain that starts at its first child.
    pub fn children(&self, node_id: NodeId) -> Children<'_> {
        Children { tree: self, next: self.first_child_id(node_id) }
    }
}

pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.tree.node(self.next)?;
        self.next = node.sib_id();
        Some(node)
    }
}
