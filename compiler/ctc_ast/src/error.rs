use crate::node::{NodeId, NodeKind};

/// Reasons a node collection cannot form a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("a tree needs at least one node")]
    Empty,

    #[error("node {0} is outside the token range 0..{1}")]
    OutOfRange(NodeId, usize),

    #[error("node {0} appears more than once")]
    Duplicate(NodeId),

    #[error("no root node (every node points to a parent)")]
    NoRoot,

    #[error("nodes {0} and {1} both claim to be the root")]
    MultipleRoots(NodeId, NodeId),

    #[error("node {node} points to missing parent {parent}")]
    DanglingParent { node: NodeId, parent: NodeId },

    #[error("node {node} points to parent {parent}, which is a feature")]
    FeatureParent { node: NodeId, parent: NodeId },

    #[error("{kind} node {node} has {found} children, expected {expected}")]
    ChildCount {
        node: NodeId,
        kind: NodeKind,
        expected: usize,
        found: usize,
    },

    #[error("node {node} has depth {found}, expected {expected}")]
    Depth {
        node: NodeId,
        expected: usize,
        found: usize,
    },
}
