use crate::error::MetaData;

use std::ops::Index;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Index of a node in a `ParseTree`.
pub struct NodeId(pub usize);

impl NodeId {
    /// Every tree has its root at this index.
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Clone, Debug, PartialEq)]
/// Single conditional scope of a fork.
///
/// The root and plain text nodes have an empty condition. Blocks opened by `if` carry
/// the full `if ...` line as their condition.
pub struct ParseNode {
    /// Condition line of the block, empty if the node is always processed.
    pub condition: String,
    /// Text belonging to this node and not to any of its children.
    pub text: String,
    /// Parent node. Only the root has none.
    pub parent: Option<NodeId>,
    /// Child nodes in the order they appear in the fork.
    pub children: Vec<NodeId>,
    /// Line the node starts at: the condition line for blocks.
    pub meta_data: MetaData,
    /// Line the node's own text starts at.
    pub text_meta_data: MetaData,
}

impl ParseNode {
    fn new(condition: &str, parent: Option<NodeId>, meta_data: &MetaData) -> Self {
        ParseNode {
            condition: condition.to_string(),
            text: String::new(),
            parent,
            children: Vec::new(),
            meta_data: meta_data.clone(),
            text_meta_data: meta_data.clone(),
        }
    }

    /// Whether the node has neither text nor children of its own.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Conditional tree of a single fork, stored as an arena of nodes.
///
/// Nodes refer to their parent and children by `NodeId`. Nodes are never removed,
/// so every id handed out by the tree stays valid.
pub struct ParseTree {
    nodes: Vec<ParseNode>,
}

impl ParseTree {
    /// Create a tree with only an empty root node.
    pub fn new(meta_data: &MetaData) -> Self {
        ParseTree {
            nodes: vec![ParseNode::new("", None, meta_data)],
        }
    }

    pub fn root(&self) -> &ParseNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&ParseNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ParseNode> {
        self.nodes.get_mut(id.0)
    }

    /// Add a child node at the end of a parent's children and return its id.
    pub(crate) fn push_child(
        &mut self,
        parent: NodeId,
        condition: &str,
        text: &str,
        meta_data: &MetaData,
        text_meta_data: &MetaData,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());

        let mut node = ParseNode::new(condition, Some(parent), meta_data);
        node.text = text.to_string();
        node.text_meta_data = text_meta_data.clone();

        self.nodes.push(node);

        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }

        id
    }

    /// Ids of a node's children, or an empty list if the node does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of nodes in the tree, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|node| node.text.trim().is_empty())
    }
}

impl Index<NodeId> for ParseTree {
    type Output = ParseNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}
