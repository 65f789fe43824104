use std::fmt;

use ctc_ast::AstError;
use ctc_lexer::{LexError, Token};
use thiserror::Error;

/// Errors raised while parsing a constraint expression.
///
/// Every variant except [`ParseError::InternalInconsistency`] is caused by
/// malformed input and carries the offending token(s); the input has to be
/// corrected before parsing again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty expression")]
    EmptyExpression,

    #[error("There is not the same number of open parentheses as closed ones: {opened} open, {closed} closed")]
    UnbalancedParentheses { opened: usize, closed: usize },

    #[error("A closing parenthesis has no matching open one: {0}")]
    UnmatchedClosingParenthesis(Token),

    #[error("There cannot be empty parentheses: {0}")]
    EmptyParentheses(Token),

    #[error("There cannot be a binary operator at start: {0}")]
    BinaryOperatorAtStart(Token),

    #[error("There cannot be a binary operator at end: {0}")]
    BinaryOperatorAtEnd(Token),

    #[error("There cannot be a unary operator at end: {0}")]
    UnaryOperatorAtEnd(Token),

    #[error("There cannot be two adjacent binary operators: {0} {1}")]
    AdjacentBinaryOperators(Token, Token),

    #[error("There cannot be a unary operator followed by a binary operator: {0} {1}")]
    UnaryFollowedByBinary(Token, Token),

    #[error("There cannot be two adjacent features: {0} {1}")]
    AdjacentFeatures(Token, Token),

    #[error("A binary operator cannot be preceded or succeeded by parentheses: {0}")]
    BinaryOperatorWrappedInParentheses(Token),

    #[error("A unary operator cannot be succeeded by parentheses: {}", join(.0))]
    UnaryOperatorSucceededByParentheses(Vec<Token>),

    #[error("A unary operator cannot follow a feature: {0} {1}")]
    UnaryOperatorAfterFeature(Token, Token),

    #[error("internal inconsistency in tokens {start}..{end}: {reason}")]
    InternalInconsistency {
        start: usize,
        end: usize,
        reason: String,
    },
}

/// Classification of a [`ParseError`], without the offending tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyExpression,
    UnbalancedParentheses,
    EmptyParentheses,
    BinaryOperatorAtBoundary,
    UnaryOperatorAtEnd,
    AdjacentBinaryOperators,
    UnaryFollowedByBinary,
    AdjacentFeatures,
    BinaryOperatorWrappedInParentheses,
    UnaryOperatorSucceededByParentheses,
    UnaryOperatorAfterFeature,
    InternalInconsistency,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        use ParseError::*;
        match self {
            EmptyExpression => ErrorKind::EmptyExpression,
            UnbalancedParentheses { .. } | UnmatchedClosingParenthesis(_) => {
                ErrorKind::UnbalancedParentheses
            }
            EmptyParentheses(_) => ErrorKind::EmptyParentheses,
            BinaryOperatorAtStart(_) | BinaryOperatorAtEnd(_) => {
                ErrorKind::BinaryOperatorAtBoundary
            }
            UnaryOperatorAtEnd(_) => ErrorKind::UnaryOperatorAtEnd,
            AdjacentBinaryOperators(..) => ErrorKind::AdjacentBinaryOperators,
            UnaryFollowedByBinary(..) => ErrorKind::UnaryFollowedByBinary,
            AdjacentFeatures(..) => ErrorKind::AdjacentFeatures,
            BinaryOperatorWrappedInParentheses(_) => {
                ErrorKind::BinaryOperatorWrappedInParentheses
            }
            UnaryOperatorSucceededByParentheses(_) => {
                ErrorKind::UnaryOperatorSucceededByParentheses
            }
            UnaryOperatorAfterFeature(..) => ErrorKind::UnaryOperatorAfterFeature,
            InternalInconsistency { .. } => ErrorKind::InternalInconsistency,
        }
    }

    /// `true` when the parser itself is at fault rather than the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::InternalInconsistency { .. })
    }

    /// The tokens the error points at, in input order.
    pub fn tokens(&self) -> Vec<&Token> {
        use ParseError::*;
        match self {
            EmptyExpression | UnbalancedParentheses { .. } | InternalInconsistency { .. } => {
                Vec::new()
            }
            UnmatchedClosingParenthesis(t)
            | EmptyParentheses(t)
            | BinaryOperatorAtStart(t)
            | BinaryOperatorAtEnd(t)
            | UnaryOperatorAtEnd(t)
            | BinaryOperatorWrappedInParentheses(t) => vec![t],
            AdjacentBinaryOperators(a, b)
            | UnaryFollowedByBinary(a, b)
            | AdjacentFeatures(a, b)
            | UnaryOperatorAfterFeature(a, b) => vec![a, b],
            UnaryOperatorSucceededByParentheses(tokens) => tokens.iter().collect(),
        }
    }

    pub(crate) fn internal<S: Into<String>>(start: usize, end: usize, reason: S) -> Self {
        ParseError::InternalInconsistency {
            start,
            end,
            reason: reason.into(),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::EmptyExpression => ParseError::EmptyExpression,
        }
    }
}

impl From<AstError> for ParseError {
    fn from(err: AstError) -> Self {
        ParseError::internal(0, 0, err.to_string())
    }
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
