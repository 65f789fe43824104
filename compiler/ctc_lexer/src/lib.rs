//! Constraint expression lexical analysis
//!
//! This crate turns a raw cross-tree constraint expression such as
//! `A implies (not B or C)` into the normalized, whitespace-delimited token
//! sequence consumed by the parser, and holds the operator registry that
//! decides which symbols are operators.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod registry;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{normalize, tokenize, LexError, Lexer, TokenStream};
pub use registry::{
    global_registry, set_global_binary_operators, set_global_registry,
    set_global_unary_operators, OperatorRegistry,
};
pub use token::{strip_parentheses, Span, Token};
