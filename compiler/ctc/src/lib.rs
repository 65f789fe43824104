//! Cross-tree constraint parsing.
//!
//! Re-exports the tokenizer, tree model and parser, and adds
//! [`analyze`], a one-call summary of a constraint for tools that only need
//! the shape of an expression.

pub use ctc_ast as ast;
pub use ctc_lexer as lexer;
pub use ctc_parser as parser;

pub use ctc_ast::{Ast, AstPrinter, Node, NodeId, NodeKind};
pub use ctc_lexer::{
    global_registry, set_global_binary_operators, set_global_registry,
    set_global_unary_operators, OperatorRegistry,
};
pub use ctc_parser::{parse, parse_with, Diagnostic, ErrorKind, ParseError, Parser};

use ctc_parser::parser::render_snippet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorUse {
    pub symbol: String,
    pub token: usize,
    pub arity: usize,
}

/// Summary of one constraint expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Normalized expression, or the raw input when tokenizing failed
    pub source: String,
    pub features: Vec<String>,
    pub operators: Vec<OperatorUse>,
    pub height: usize,
    /// Fully parenthesized infix rendering
    pub infix: Option<String>,
    /// Indented tree rendering
    pub tree: Option<String>,
    pub errors: Vec<String>,
}

impl AnalysisReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Analyze a constraint with the process-wide operator registry.
pub fn analyze(input: &str) -> AnalysisReport {
    analyze_with(input, &global_registry())
}

/// Analyze a constraint with an explicit operator registry. Parse failures
/// are reported in `errors` rather than returned.
pub fn analyze_with(input: &str, registry: &OperatorRegistry) -> AnalysisReport {
    match parse_with(input, registry) {
        Ok(ast) => AnalysisReport {
            source: ast.source().to_string(),
            features: ast.features().map(|n| n.symbol().to_string()).collect(),
            operators: ast
                .operators()
                .map(|n| OperatorUse {
                    symbol: n.symbol().to_string(),
                    token: n.id().index(),
                    arity: n.kind().arity(),
                })
                .collect(),
            height: ast.height(),
            infix: Some(AstPrinter::new().print(&ast)),
            tree: Some(ast.to_string()),
            errors: Vec::new(),
        },
        Err(err) => {
            log::debug!("analysis of {:?} failed: {}", input, err);
            let source = ctc_lexer::normalize(input);
            let diag = Diagnostic::from(&err);
            AnalysisReport {
                source,
                features: Vec::new(),
                operators: Vec::new(),
                height: 0,
                infix: None,
                tree: None,
                errors: vec![format!("parse error: {}", render_snippet(&diag, input))],
            }
        }
    }
}
