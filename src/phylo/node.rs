use crate::TreeFloat;
use slotmap::new_key_type;
use std::{fmt::Display, sync::Arc};

new_key_type! { pub struct NodeId; }

/// A single vertex of a phylogenetic tree.
///
/// Nodes live in a [Tree](crate::Tree) arena and reference each other by
/// [NodeId]. A node owns its first child through `child_id`; the remaining
/// children hang off that child's `sib_id` chain. The parent link is a
/// plain back-index used only for upward navigation, so the link structure
/// carries no cycles of ownership.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    node_id: Option<NodeId>,
    parent_id: Option<NodeId>,
    child_id: Option<NodeId>,
    sib_id: Option<NodeId>,
    label: Option<Arc<str>>,
    branch_length: Option<TreeFloat>,
}

impl Node {
    pub fn new() -> Self { Self::default() }
    pub fn is_tip(&self) -> bool { self.child_id.is_none() }

    pub fn node_id(&self) -> Option<NodeId> { self.node_id }
    pub(crate) fn set_node_id(&mut self, node_id: NodeId) { self.node_id = Some(node_id); }
    pub fn parent_id(&self) -> Option<NodeId> { self.parent_id }
    pub(crate) fn set_parent_id(&mut self, node_id: Option<NodeId>) { self.parent_id = node_id; }
    pub fn child_id(&self) -> Option<NodeId> { self.child_id }
    pub(crate) fn set_child_id(&mut self, node_id: Option<NodeId>) { self.child_id = node_id; }
    pub fn sib_id(&self) -> Option<NodeId> { self.sib_id }
    pub(crate) fn set_sib_id(&mut self, node_id: Option<NodeId>) { self.sib_id = node_id; }

    pub fn branch_length(&self) -> Option<TreeFloat> { self.branch_length }
    pub fn has_branch_length(&self) -> bool { self.branch_length.is_some() }
    pub fn set_branch_length(&mut self, branch_length: Option<TreeFloat>) { self.branch_length = branch_length; }
    pub fn label(&self) -> Option<Arc<str>> { self.label.clone() }

    pub fn set_label<'a>(&mut self, label: Option<impl Into<&'a str>>) {
        self.label = label.map(|label| label.into().into());
    }
}

impl<'a> From<&'a str> for Node {
    fn from(value: &'a str) -> Self {
        let mut node = Node::default();
        let label = match value {
            "" => None,
            v => Some(v),
        };
        node.set_label(label);
        node
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let disp = format!("{self:?}");
        write!(f, "{}", &disp[7..disp.len() - 1])
    }
}

impl From<NodeId> for String {
    fn from(node_id: NodeId) -> Self { format!("{node_id}") }
}
