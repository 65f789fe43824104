//! Constraint expression parser.
//!
//! Parsing runs three stages: the raw string is tokenized and normalized,
//! the token sequence goes through the validation battery, and the builder
//! turns it into an arena-backed [`Ast`]. Any failure is returned as a
//! [`ParseError`]; no partial tree is ever produced.

use ctc_ast::Ast;
use ctc_lexer::{global_registry, tokenize, OperatorRegistry};

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod split;
pub mod validate;

pub use builder::AstBuilder;
pub use diagnostics::{render_snippet, Diagnostic, Severity};
pub use error::{ErrorKind, ParseError, ParseResult};
pub use validate::validate;

/// Parses `input` with the operators of the process-wide registry.
///
/// The registry is read once at the start of the call, so a concurrent
/// reconfiguration never affects a parse that is already running.
pub fn parse(input: &str) -> ParseResult<Ast> {
    parse_with(input, &global_registry())
}

/// Parses `input` with an explicit operator registry.
pub fn parse_with(input: &str, registry: &OperatorRegistry) -> ParseResult<Ast> {
    log::debug!("=== parse {:?} ===", input);

    let tokens = tokenize(input)?;
    if let Err(err) = validate(&tokens, registry) {
        log::debug!("validation failed: {}", err);
        return Err(err);
    }

    let ast = AstBuilder::build(&tokens, registry)?;
    log::debug!(
        "parsed {} nodes, root {:?}, height {}",
        ast.len(),
        ast.root().symbol(),
        ast.height()
    );
    Ok(ast)
}

/// A parser bound to one operator registry.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    registry: OperatorRegistry,
}

impl Parser {
    pub fn new(registry: OperatorRegistry) -> Self {
        Self { registry }
    }

    /// A parser using a snapshot of the current process-wide registry.
    pub fn from_global() -> Self {
        Self::new(global_registry())
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut OperatorRegistry {
        &mut self.registry
    }

    pub fn parse(&self, input: &str) -> ParseResult<Ast> {
        parse_with(input, &self.registry)
    }

    /// Parses `input` and renders any failure as a diagnostic.
    pub fn parse_with_diagnostics(&self, input: &str) -> Result<Ast, Diagnostic> {
        self.parse(input).map_err(|err| Diagnostic::from(&err))
    }
}
