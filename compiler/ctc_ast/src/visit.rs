//! Visitor pattern implementation for traversing the AST.
//!
//! Traversal is pre-order from the root. A [`Visitor`] gets one callback per
//! node kind; the operator callbacks walk their children by default, so an
//! implementation only overrides the kinds it cares about.

use crate::node::{Node, NodeKind};
use crate::tree::Ast;

/// The result type for visitor operations.
pub type VisitResult<T = ()> = Result<T, VisitError>;

/// An error that can occur during AST traversal.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// An error with a custom message.
    #[error("{0}")]
    Custom(String),

    /// An error raised at a specific node.
    #[error("{message} at token {node}")]
    AtNode {
        /// The error message.
        message: String,
        /// Token index of the offending node.
        node: usize,
    },
}

impl VisitError {
    /// Creates a new custom error with the given message.
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        VisitError::Custom(msg.into())
    }

    /// Creates an error anchored at `node`.
    pub fn at_node<T: Into<String>>(msg: T, node: &Node) -> Self {
        VisitError::AtNode {
            message: msg.into(),
            node: node.id.index(),
        }
    }
}

/// A visitor for traversing the AST.
pub trait Visitor {
    /// The output type of the visitor.
    type Output: Default;

    fn visit_feature(&mut self, _ast: &Ast, _node: &Node) -> VisitResult<Self::Output> {
        Ok(Default::default())
    }

    fn visit_unary(&mut self, ast: &Ast, node: &Node) -> VisitResult<Self::Output> {
        walk_children(self, ast, node)
    }

    fn visit_binary(&mut self, ast: &Ast, node: &Node) -> VisitResult<Self::Output> {
        walk_children(self, ast, node)
    }
}

/// Visits the whole tree starting at the root.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, ast: &Ast) -> VisitResult<V::Output> {
    visit_node(visitor, ast, ast.root())
}

/// Dispatches `node` to the visitor callback for its kind.
pub fn visit_node<V: Visitor + ?Sized>(
    visitor: &mut V,
    ast: &Ast,
    node: &Node,
) -> VisitResult<V::Output> {
    match node.kind {
        NodeKind::Feature => visitor.visit_feature(ast, node),
        NodeKind::UnaryOperator => visitor.visit_unary(ast, node),
        NodeKind::BinaryOperator => visitor.visit_binary(ast, node),
    }
}

/// Visits every child of `node`, discarding their outputs.
pub fn walk_children<V: Visitor + ?Sized>(
    visitor: &mut V,
    ast: &Ast,
    node: &Node,
) -> VisitResult<V::Output> {
    for child in ast.children(node) {
        visit_node(visitor, ast, child)?;
    }
    Ok(Default::default())
}
