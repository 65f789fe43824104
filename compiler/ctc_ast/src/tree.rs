//! The node arena and its read-only queries.
//!
//! An [`Ast`] owns every node of one parsed expression in a flat vector, in
//! the order the builder produced them. Parent links are token indices, and
//! the children of each node are resolved once when the arena is assembled.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::AstError;
use crate::node::{Node, NodeId, NodeKind};

/// A parsed constraint: an immutable, arena-backed tree of [`Node`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "AstRepr", try_from = "AstRepr")
)]
pub struct Ast {
    source: String,
    nodes: Vec<Node>,
    // token index -> position in `nodes`
    slots: Vec<usize>,
    // position in `nodes` -> positions of its children, in insertion order
    children: Vec<Vec<usize>>,
    root: usize,
}

/// Serialized form: the normalized expression and the nodes in insertion
/// order. Deserializing re-runs every structural check.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct AstRepr {
    source: String,
    nodes: Vec<Node>,
}

#[cfg(feature = "serde")]
impl From<Ast> for AstRepr {
    fn from(ast: Ast) -> Self {
        AstRepr {
            source: ast.source,
            nodes: ast.nodes,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<AstRepr> for Ast {
    type Error = AstError;

    fn try_from(repr: AstRepr) -> Result<Self, Self::Error> {
        Ast::from_nodes(repr.source, repr.nodes)
    }
}

impl Ast {
    /// Assembles a tree from nodes in insertion order.
    ///
    /// Node ids must cover every token position `0..nodes.len()` exactly
    /// once, exactly one node may lack a parent, every parent must be an
    /// operator with as many children as its arity, and each child sits one
    /// level below its parent.
    pub fn from_nodes<S: Into<String>>(source: S, nodes: Vec<Node>) -> Result<Self, AstError> {
        if nodes.is_empty() {
            return Err(AstError::Empty);
        }

        let len = nodes.len();
        let mut slots = vec![usize::MAX; len];
        let mut root = None;
        for (pos, node) in nodes.iter().enumerate() {
            let index = node.id.index();
            if index >= len {
                return Err(AstError::OutOfRange(node.id, len));
            }
            if slots[index] != usize::MAX {
                return Err(AstError::Duplicate(node.id));
            }
            slots[index] = pos;

            if node.parent.is_none() {
                if let Some(first) = root {
                    let first: &Node = &nodes[first];
                    return Err(AstError::MultipleRoots(first.id, node.id));
                }
                root = Some(pos);
            }
        }
        let root = root.ok_or(AstError::NoRoot)?;

        let mut children = vec![Vec::new(); len];
        for (pos, node) in nodes.iter().enumerate() {
            let Some(parent) = node.parent else { continue };
            let parent_pos = slots
                .get(parent.index())
                .copied()
                .ok_or(AstError::DanglingParent {
                    node: node.id,
                    parent,
                })?;
            let parent_node = &nodes[parent_pos];
            if parent_node.is_feature() {
                return Err(AstError::FeatureParent {
                    node: node.id,
                    parent,
                });
            }
            if node.depth != parent_node.depth + 1 {
                return Err(AstError::Depth {
                    node: node.id,
                    expected: parent_node.depth + 1,
                    found: node.depth,
                });
            }
            children[parent_pos].push(pos);
        }

        if nodes[root].depth != 1 {
            return Err(AstError::Depth {
                node: nodes[root].id,
                expected: 1,
                found: nodes[root].depth,
            });
        }

        for (pos, node) in nodes.iter().enumerate() {
            let expected = node.kind.arity();
            if children[pos].len() != expected {
                return Err(AstError::ChildCount {
                    node: node.id,
                    kind: node.kind,
                    expected,
                    found: children[pos].len(),
                });
            }
        }

        Ok(Self {
            source: source.into(),
            nodes,
            slots,
            children,
            root,
        })
    }

    /// The normalized expression this tree was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks a node up by its token index.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).map(|&pos| &self.nodes[pos])
    }

    /// The unique node without a parent.
    pub fn root(&self) -> &Node {
        let node = &self.nodes[self.root];
        if !node.is_root() {
            log::warn!("root slot holds non-root node {}, falling back to first node", node.id);
            return &self.nodes[0];
        }
        node
    }

    /// Children of `node`, left operand first.
    pub fn children(&self, node: &Node) -> Vec<&Node> {
        self.child_positions(node)
            .iter()
            .map(|&pos| &self.nodes[pos])
            .collect()
    }

    pub fn first_child(&self, node: &Node) -> Option<&Node> {
        self.child_positions(node)
            .first()
            .map(|&pos| &self.nodes[pos])
    }

    /// The last child of `node`. For a unary operator this is the same node
    /// as [`Ast::first_child`].
    pub fn second_child(&self, node: &Node) -> Option<&Node> {
        self.child_positions(node)
            .last()
            .map(|&pos| &self.nodes[pos])
    }

    /// Feature leaves in insertion order.
    pub fn features(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_feature())
    }

    /// Operator nodes in insertion order.
    pub fn operators(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_operator())
    }

    /// Maximum depth of any node; 1 for a single feature.
    pub fn height(&self) -> usize {
        self.nodes.iter().map(Node::depth).max().unwrap_or(1)
    }

    /// Every node, operator or feature, whose symbol is `name`.
    pub fn nodes_by_symbol(&self, name: &str) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.symbol == name).collect()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    fn child_positions(&self, node: &Node) -> &[usize] {
        match self.slots.get(node.id.index()) {
            Some(&pos) if self.nodes[pos] == *node => &self.children[pos],
            _ => &[],
        }
    }

    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
        for child in self.children(node) {
            write!(f, "\n{}{}", "\t".repeat(child.depth - 1), child.symbol)?;
            self.fmt_subtree(f, child)?;
        }
        Ok(())
    }
}

/// Renders the normalized expression in quotes followed by the tree, one
/// node per line, indented by depth.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root();
        write!(f, "\"{}\"\n\n{}", self.source, root.symbol)?;
        self.fmt_subtree(f, root)
    }
}
