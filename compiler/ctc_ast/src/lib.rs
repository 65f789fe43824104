//! Abstract Syntax Tree (AST) for cross-tree constraint expressions.
//!
//! This crate defines the arena-backed tree produced by the constraint
//! parser, along with utilities for querying, traversing and printing it.

pub mod error;
pub mod node;
pub mod tree;
pub mod visit;

// Re-export commonly used types
pub use error::AstError;
pub use node::{Node, NodeId, NodeKind};
pub use tree::Ast;

use std::error::Error;

use visit::{visit_node, walk, VisitResult, Visitor};

/// A result type for AST operations.
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Serializes an AST (or any part of it) to a JSON string.
///
/// # Example
///
/// ```
/// use ctc_ast::{to_json, Node, NodeId};
///
/// let node = Node::feature(NodeId(0), "A", None, 1);
/// let json = to_json(&node).unwrap();
/// assert!(json.contains(r#""symbol": "A""#));
/// assert!(json.contains(r#""kind": "feature""#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserializes an AST from a JSON string. Trees are re-validated, so a
/// hand-edited document with a broken structure is rejected.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Prints a tree back as a fully parenthesized infix expression.
///
/// Every operator application gets its own pair of parentheses, so the
/// output makes the parsed precedence explicit: `A or B and C` prints as
/// `(A or (B and C))` under the default operator order.
#[derive(Default)]
pub struct AstPrinter;

impl AstPrinter {
    /// Creates a new `AstPrinter`.
    pub fn new() -> Self {
        Self
    }

    /// Prints the whole tree.
    pub fn print(&self, ast: &Ast) -> String {
        walk(&mut InfixWriter, ast).unwrap_or_default()
    }
}

struct InfixWriter;

impl Visitor for InfixWriter {
    type Output = String;

    fn visit_feature(&mut self, _ast: &Ast, node: &Node) -> VisitResult<String> {
        Ok(node.symbol.clone())
    }

    fn visit_unary(&mut self, ast: &Ast, node: &Node) -> VisitResult<String> {
        let operand = match ast.first_child(node) {
            Some(child) => visit_node(self, ast, child)?,
            None => String::new(),
        };
        Ok(format!("{} {}", node.symbol, operand))
    }

    fn visit_binary(&mut self, ast: &Ast, node: &Node) -> VisitResult<String> {
        let children = ast.children(node);
        let mut operands = Vec::with_capacity(children.len());
        for child in children {
            operands.push(visit_node(self, ast, child)?);
        }
        Ok(format!("({})", operands.join(&format!(" {} ", node.symbol))))
    }
}
