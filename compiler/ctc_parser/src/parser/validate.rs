//! Structural checks run over the normalized token sequence before a tree is
//! built.
//!
//! [`validate`] applies the checks in a fixed order and stops at the first
//! violation. Each check is also exposed on its own.

use ctc_lexer::{OperatorRegistry, Token, TokenStream};

use super::error::{ParseError, ParseResult};

/// Runs the whole battery of checks.
pub fn validate(tokens: &TokenStream, registry: &OperatorRegistry) -> ParseResult<()> {
    check_not_empty(tokens)?;
    check_balanced_parentheses(tokens)?;
    check_empty_parentheses(tokens)?;
    check_binary_operator_at_boundary(tokens, registry)?;
    check_unary_operator_at_end(tokens, registry)?;
    check_adjacent_binary_operators(tokens, registry)?;
    check_unary_followed_by_binary(tokens, registry)?;
    check_adjacent_features(tokens, registry)?;
    check_binary_operator_wrapped_in_parentheses(tokens, registry)?;
    check_unary_operator_succeeded_by_parentheses(tokens, registry)?;
    check_unary_operator_after_feature(tokens, registry)?;
    Ok(())
}

pub fn check_not_empty(tokens: &[Token]) -> ParseResult<()> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    Ok(())
}

/// The number of `(` must equal the number of `)`, and no `)` may close
/// before a matching `(` was opened.
pub fn check_balanced_parentheses(tokens: &[Token]) -> ParseResult<()> {
    let count = |c: char| {
        tokens
            .iter()
            .map(|t| t.text.chars().filter(|&x| x == c).count())
            .sum::<usize>()
    };
    let opened = count('(');
    let closed = count(')');
    if opened != closed {
        return Err(ParseError::UnbalancedParentheses { opened, closed });
    }

    let mut depth: isize = 0;
    for token in tokens {
        for c in token.text.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(ParseError::UnmatchedClosingParenthesis(token.clone()));
            }
        }
    }
    Ok(())
}

/// `()` cannot appear anywhere. Tokens are separated by spaces, so an empty
/// pair always sits inside a single token.
pub fn check_empty_parentheses(tokens: &[Token]) -> ParseResult<()> {
    match tokens.iter().find(|t| t.text.contains("()")) {
        Some(token) => Err(ParseError::EmptyParentheses(token.clone())),
        None => Ok(()),
    }
}

pub fn check_binary_operator_at_boundary(
    tokens: &[Token],
    registry: &OperatorRegistry,
) -> ParseResult<()> {
    if let Some(first) = tokens.first() {
        if registry.is_binary(&first.symbol()) {
            return Err(ParseError::BinaryOperatorAtStart(first.clone()));
        }
    }
    if let Some(last) = tokens.last() {
        if registry.is_binary(&last.symbol()) {
            return Err(ParseError::BinaryOperatorAtEnd(last.clone()));
        }
    }
    Ok(())
}

pub fn check_unary_operator_at_end(
    tokens: &[Token],
    registry: &OperatorRegistry,
) -> ParseResult<()> {
    match tokens.last() {
        Some(last) if registry.is_unary(&last.symbol()) => {
            Err(ParseError::UnaryOperatorAtEnd(last.clone()))
        }
        _ => Ok(()),
    }
}

pub fn check_adjacent_binary_operators(
    tokens: &[Token],
    registry: &OperatorRegistry,
) -> ParseResult<()> {
    check_pairs(tokens, |a, b| {
        (registry.is_binary(&a.symbol()) && registry.is_binary(&b.symbol()))
            .then(|| ParseError::AdjacentBinaryOperators(a.clone(), b.clone()))
    })
}

pub fn check_unary_followed_by_binary(
    tokens: &[Token],
    registry: &OperatorRegistry,
) -> ParseResult<()> {
    check_pairs(tokens, |a, b| {
        (registry.is_unary(&a.symbol()) && registry.is_binary(&b.symbol()))
            .then(|| ParseError::UnaryFollowedByBinary(a.clone(), b.clone()))
    })
}

pub fn check_adjacent_features(tokens: &[Token], registry: &OperatorRegistry) -> ParseResult<()> {
    check_pairs(tokens, |a, b| {
        (registry.is_feature(&a.symbol()) && registry.is_feature(&b.symbol()))
            .then(|| ParseError::AdjacentFeatures(a.clone(), b.clone()))
    })
}

/// A binary operator token must not carry any parenthesis.
pub fn check_binary_operator_wrapped_in_parentheses(
    tokens: &[Token],
    registry: &OperatorRegistry,
) -> ParseResult<()> {
    match tokens
        .iter()
        .find(|t| t.has_parentheses() && registry.is_binary(&t.symbol()))
    {
        Some(token) => Err(ParseError::BinaryOperatorWrappedInParentheses(token.clone())),
        None => Ok(()),
    }
}

/// A unary operator token must not carry a `)`, and must not be followed by
/// a single parenthesized feature such as `(A)`.
pub fn check_unary_operator_succeeded_by_parentheses(
    tokens: &[Token],
    registry: &OperatorRegistry,
) -> ParseResult<()> {
    for (i, token) in tokens.iter().enumerate() {
        if !registry.is_unary(&token.symbol()) {
            continue;
        }
        if token.has_close_paren() {
            return Err(ParseError::UnaryOperatorSucceededByParentheses(vec![
                token.clone(),
            ]));
        }
        if let Some(next) = tokens.get(i + 1) {
            if next.is_self_enclosed() && registry.is_feature(&next.symbol()) {
                return Err(ParseError::UnaryOperatorSucceededByParentheses(vec![
                    token.clone(),
                    next.clone(),
                ]));
            }
        }
    }
    Ok(())
}

/// A unary operator is a prefix operator, so it cannot directly follow an
/// operand.
pub fn check_unary_operator_after_feature(
    tokens: &[Token],
    registry: &OperatorRegistry,
) -> ParseResult<()> {
    check_pairs(tokens, |a, b| {
        (registry.is_feature(&a.symbol()) && registry.is_unary(&b.symbol()))
            .then(|| ParseError::UnaryOperatorAfterFeature(a.clone(), b.clone()))
    })
}

fn check_pairs<F>(tokens: &[Token], mut violation: F) -> ParseResult<()>
where
    F: FnMut(&Token, &Token) -> Option<ParseError>,
{
    for pair in tokens.windows(2) {
        if let Some(err) = violation(&pair[0], &pair[1]) {
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorKind;
    use ctc_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn check(input: &str) -> ParseResult<()> {
        let tokens = tokenize(input)?;
        validate(&tokens, &OperatorRegistry::default())
    }

    fn kind(input: &str) -> Option<ErrorKind> {
        check(input).err().map(|e| e.kind())
    }

    #[test]
    fn test_valid_expressions_pass() {
        for input in [
            "A",
            "(A)",
            "not A",
            "A implies B",
            "A implies (not B or C)",
            "((A or B) and C) or D",
            "not (A or B)",
            "not not A",
            "(not A) and B",
            "A and (B or C) and D",
            "not ((A) or B)",
            "not ((A) and B) or C",
        ] {
            assert_eq!(check(input), Ok(()), "{input}");
        }
    }

    #[test]
    fn test_each_rule() {
        assert_eq!(kind("   "), Some(ErrorKind::EmptyExpression));
        assert_eq!(kind("(A"), Some(ErrorKind::UnbalancedParentheses));
        assert_eq!(kind("A) or (B"), Some(ErrorKind::UnbalancedParentheses));
        assert_eq!(kind("()"), Some(ErrorKind::EmptyParentheses));
        assert_eq!(kind("A or ( )"), Some(ErrorKind::EmptyParentheses));
        assert_eq!(kind("or A"), Some(ErrorKind::BinaryOperatorAtBoundary));
        assert_eq!(kind("A and"), Some(ErrorKind::BinaryOperatorAtBoundary));
        assert_eq!(kind("A or not"), Some(ErrorKind::UnaryOperatorAtEnd));
        assert_eq!(kind("A or or B"), Some(ErrorKind::AdjacentBinaryOperators));
        assert_eq!(kind("not or A"), Some(ErrorKind::UnaryFollowedByBinary));
        assert_eq!(kind("A B or C"), Some(ErrorKind::AdjacentFeatures));
        assert_eq!(
            kind("(A or) B"),
            Some(ErrorKind::BinaryOperatorWrappedInParentheses)
        );
        assert_eq!(
            kind("not (A)"),
            Some(ErrorKind::UnaryOperatorSucceededByParentheses)
        );
        assert_eq!(
            kind("not ((A)) or B"),
            Some(ErrorKind::UnaryOperatorSucceededByParentheses)
        );
        assert_eq!(
            kind("(B or not) A"),
            Some(ErrorKind::UnaryOperatorSucceededByParentheses)
        );
        assert_eq!(kind("A not B"), Some(ErrorKind::UnaryOperatorAfterFeature));
    }

    #[test]
    fn test_first_violation_wins() {
        // unbalanced and adjacent binary operators: the parenthesis rule runs first
        assert_eq!(kind("(A or or B"), Some(ErrorKind::UnbalancedParentheses));
        // boundary rule runs before the adjacency rules
        assert_eq!(kind("or or A"), Some(ErrorKind::BinaryOperatorAtBoundary));
    }

    #[test]
    fn test_errors_carry_tokens() {
        let err = check("A or or B").unwrap_err();
        assert_eq!(
            err,
            ParseError::AdjacentBinaryOperators(
                tokenize("A or or B").unwrap()[1].clone(),
                tokenize("A or or B").unwrap()[2].clone()
            )
        );
    }

    #[test]
    fn test_custom_registry() {
        let registry = OperatorRegistry::new(["!"], ["&", "|"]);
        let tokens = tokenize("A & | B").unwrap();
        assert_eq!(
            check_adjacent_binary_operators(&tokens, &registry)
                .unwrap_err()
                .kind(),
            ErrorKind::AdjacentBinaryOperators
        );
        // "or" is a plain feature under this registry
        let tokens = tokenize("A or B").unwrap();
        assert_eq!(
            validate(&tokens, &registry).unwrap_err().kind(),
            ErrorKind::AdjacentFeatures
        );
    }
}
