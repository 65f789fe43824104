//! Tree nodes for constraint expressions.
//!
//! A node refers to its parent by token index, never by reference; the `Ast`
//! arena owns every node.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies a node by the position of its token in the normalized token
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    /// A named feature; always a leaf
    Feature,
    /// A prefix operator with exactly one operand
    UnaryOperator,
    /// An infix operator with a left and a right operand
    BinaryOperator,
}

impl NodeKind {
    /// Number of children a well-formed node of this kind has.
    pub fn arity(self) -> usize {
        match self {
            NodeKind::Feature => 0,
            NodeKind::UnaryOperator => 1,
            NodeKind::BinaryOperator => 2,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Feature => "feature",
            NodeKind::UnaryOperator => "unary operator",
            NodeKind::BinaryOperator => "binary operator",
        })
    }
}

/// A feature or operator of a parsed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Feature name or operator keyword, without parentheses
    pub symbol: String,
    /// Token index of the parent operator, `None` for the root
    pub parent: Option<NodeId>,
    /// 1-based depth; the root has depth 1
    pub depth: usize,
}

impl Node {
    pub fn new<S: Into<String>>(
        id: NodeId,
        kind: NodeKind,
        symbol: S,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        Self {
            id,
            kind,
            symbol: symbol.into(),
            parent,
            depth,
        }
    }

    pub fn feature<S: Into<String>>(id: NodeId, symbol: S, parent: Option<NodeId>, depth: usize) -> Self {
        Self::new(id, NodeKind::Feature, symbol, parent, depth)
    }

    pub fn unary<S: Into<String>>(id: NodeId, symbol: S, parent: Option<NodeId>, depth: usize) -> Self {
        Self::new(id, NodeKind::UnaryOperator, symbol, parent, depth)
    }

    pub fn binary<S: Into<String>>(id: NodeId, symbol: S, parent: Option<NodeId>, depth: usize) -> Self {
        Self::new(id, NodeKind::BinaryOperator, symbol, parent, depth)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_feature(&self) -> bool {
        self.kind == NodeKind::Feature
    }

    /// Same as [`Node::is_feature`]: only features are leaves.
    pub fn is_leaf(&self) -> bool {
        self.is_feature()
    }

    pub fn is_unary(&self) -> bool {
        self.kind == NodeKind::UnaryOperator
    }

    pub fn is_binary(&self) -> bool {
        self.kind == NodeKind::BinaryOperator
    }

    pub fn is_operator(&self) -> bool {
        !self.is_feature()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node: {}, points to: ", self.symbol)?;
        match self.parent {
            Some(parent) => write!(f, "{parent}")?,
            None => f.write_str("None")?,
        }
        write!(f, ", token: {}, level: {}", self.id, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_node_display() {
        let root = Node::binary(NodeId(1), "implies", None, 1);
        assert_eq!(root.to_string(), "Node: implies, points to: None, token: 1, level: 1");

        let leaf = Node::feature(NodeId(2), "B", Some(NodeId(1)), 2);
        assert_eq!(leaf.to_string(), "Node: B, points to: 1, token: 2, level: 2");
    }

    #[test]
    fn test_predicates() {
        let not = Node::unary(NodeId(0), "not", None, 1);
        assert!(not.is_root());
        assert!(not.is_unary());
        assert!(not.is_operator());
        assert!(!not.is_leaf());
        assert_eq!(not.kind().arity(), 1);

        let a = Node::feature(NodeId(1), "A", Some(NodeId(0)), 2);
        assert!(a.is_leaf());
        assert!(!a.is_root());
        assert_eq!(a.parent(), Some(NodeId(0)));
    }
}
