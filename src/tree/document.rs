//! Document - In-memory element tree.
//!
//! Nodes live in a generational slot map. A removed node's handle never
//! matches a node created later, so a recreated element is a new element as far
//! as the builder is concerned.

use indexmap::IndexMap;
use slotmap::{SlotMap, new_key_type};

use super::{CellTree, Marked};

new_key_type! {
    /// Handle to a node of a [`Document`].
    pub struct NodeId;
}

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: IndexMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: IndexMap::new(),
            parent,
            children: Vec::new(),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Document {
    /// Tag of the root node. The root is never reported as a marked element.
    pub const ROOT_TAG: &'static str = "#document";

    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Self::ROOT_TAG, None));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is not in the document.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let node = self.nodes.insert(Node::new(tag, Some(parent)));
        self.nodes[parent].children.push(node);
        Some(node)
    }

    /// Append a new element carrying `marker="type_name"`.
    pub fn append_marked(
        &mut self,
        parent: NodeId,
        tag: &str,
        marker: &str,
        type_name: &str,
    ) -> Option<NodeId> {
        let node = self.append_element(parent, tag)?;
        self.set_attribute(node, marker, type_name);
        Some(node)
    }

    /// Set an attribute. Returns `false` if the node is not in the document.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        match self.nodes.get_mut(node) {
            Some(node) => {
                node.attributes.insert(name.to_owned(), value.to_owned());
                true
            }
            None => false,
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.get_mut(node)?.attributes.shift_remove(name)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(node)?.attributes.get(name).map(String::as_str)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|node| node.tag.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of elements below the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True if the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `node` and its whole subtree. Returns the number of nodes removed.
    ///
    /// The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> usize {
        if node == self.root || !self.nodes.contains_key(node) {
            return 0;
        }

        if let Some(parent) = self.nodes[node].parent {
            if let Some(parent) = self.nodes.get_mut(parent) {
                parent.children.retain(|&child| child != node);
            }
        }

        let mut doomed = vec![node];
        doomed.extend(self.descendants(node));
        for &id in &doomed {
            self.nodes.remove(id);
        }
        doomed.len()
    }

    /// Move `node` (with its subtree) to the end of `new_parent`'s children.
    ///
    /// The node keeps its handle. Returns `false` for the root, for missing
    /// nodes, and when `new_parent` lies inside `node`'s own subtree.
    pub fn move_to(&mut self, node: NodeId, new_parent: NodeId) -> bool {
        if node == self.root || !self.contains(node) || !self.contains(new_parent) {
            return false;
        }
        if node == new_parent || self.is_ancestor(node, new_parent) {
            return false;
        }

        if let Some(old_parent) = self.nodes[node].parent {
            if let Some(old_parent) = self.nodes.get_mut(old_parent) {
                old_parent.children.retain(|&child| child != node);
            }
        }
        self.nodes[node].parent = Some(new_parent);
        self.nodes[new_parent].children.push(node);
        true
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// All nodes below `node` in document (pre-)order, `node` excluded.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Query restricted to the subtree below `scope`.
    pub fn subtree(&self, scope: NodeId) -> Subtree<'_> {
        Subtree {
            document: self,
            scope,
        }
    }

    fn marked_below(&self, scope: NodeId, marker: &str) -> Vec<Marked<NodeId>> {
        self.descendants(scope)
            .into_iter()
            .filter_map(|id| {
                self.attribute(id, marker)
                    .map(|type_name| Marked::new(id, type_name))
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl CellTree for Document {
    type Element = NodeId;

    fn query_marked(&self, marker: &str) -> Vec<Marked<NodeId>> {
        self.marked_below(self.root, marker)
    }
}

// =============================================================================
// Subtree
// =============================================================================

/// A [`Document`] scoped to the descendants of one node.
#[derive(Debug, Clone, Copy)]
pub struct Subtree<'a> {
    document: &'a Document,
    scope: NodeId,
}

impl Subtree<'_> {
    pub fn scope(&self) -> NodeId {
        self.scope
    }
}

impl CellTree for Subtree<'_> {
    type Element = NodeId;

    fn query_marked(&self, marker: &str) -> Vec<Marked<NodeId>> {
        self.document.marked_below(self.scope, marker)
    }
}
