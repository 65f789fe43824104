use ctc_lexer::Span;

use super::error::{ErrorKind, ParseError};

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Bug,
}

/// A user-facing diagnostic describing why an expression was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: ErrorKind,
    pub message: String,
    /// Spans of the offending tokens in the raw input
    pub spans: Vec<Span>,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic from a parse error, anchored at its tokens
    pub fn from_error(err: &ParseError) -> Self {
        let kind = err.kind();
        Self {
            severity: if err.is_internal() {
                Severity::Bug
            } else {
                Severity::Error
            },
            kind,
            message: err.to_string(),
            spans: err.tokens().into_iter().map(|t| t.span).collect(),
            help: default_help_for_kind(kind),
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        Diagnostic::from_error(err)
    }
}

/// Provide a default help message for an error kind
fn default_help_for_kind(kind: ErrorKind) -> Option<String> {
    use ErrorKind::*;
    let help = match kind {
        EmptyExpression => "Write at least one feature name, e.g. 'A' or 'A implies B'",
        UnbalancedParentheses => "Every '(' needs a matching ')' after it",
        EmptyParentheses => "Put a feature or sub-expression between '(' and ')', or remove them",
        BinaryOperatorAtBoundary => {
            "Binary operators need an operand on both sides, e.g. 'A and B'"
        }
        UnaryOperatorAtEnd => "A unary operator needs an operand after it, e.g. 'not A'",
        AdjacentBinaryOperators => "Put an operand between the two operators",
        UnaryFollowedByBinary => "A unary operator applies to the operand right after it",
        AdjacentFeatures => "Join the features with an operator, e.g. 'A or B'",
        BinaryOperatorWrappedInParentheses => {
            "Parentheses group operands; move them off the binary operator"
        }
        UnaryOperatorSucceededByParentheses => {
            "Write 'not A' instead of 'not (A)'; parentheses after a unary operator must group an expression"
        }
        UnaryOperatorAfterFeature => {
            "A unary operator goes before its operand; did you forget a binary operator?"
        }
        InternalInconsistency => return None,
    };
    Some(help.to_string())
}

/// Render a diagnostic against its source, underlining the offending tokens.
///
/// ```text
/// error: There cannot be two adjacent binary operators: or or
///   | A or or B
///   |   ^^ ^^
///   = help: Put an operand between the two operators
/// ```
pub fn render_snippet(diag: &Diagnostic, source: &str) -> String {
    let label = match diag.severity {
        Severity::Error => "error",
        Severity::Bug => "internal error",
    };
    let mut out = format!("{label}: {}", diag.message);

    // only single-line sources get an underline
    if !diag.spans.is_empty() && !source.contains('\n') {
        let mut marker = String::new();
        let mut col = 0;
        for span in &diag.spans {
            let start = source[..span.start.min(source.len())].chars().count();
            let width = source
                .get(span.start..span.end)
                .map(|s| s.chars().count())
                .unwrap_or(1)
                .max(1);
            if start < col {
                continue;
            }
            marker.push_str(&" ".repeat(start - col));
            marker.push_str(&"^".repeat(width));
            col = start + width;
        }
        out.push_str(&format!("\n  | {source}\n  | {marker}"));
    }

    if let Some(help) = &diag.help {
        out.push_str(&format!("\n  = help: {help}"));
    }
    out
}
