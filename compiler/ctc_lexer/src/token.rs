use std::fmt;

/// Byte range of a token in the raw input.
///
/// The range covers the token's characters only; whitespace the normalizer
/// removed from between a parenthesis and its operand falls inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The 0-based byte offset of the first character
    pub start: usize,
    /// The 0-based byte offset one past the last character
    pub end: usize,
}

impl Span {
    /// Creates a new span from byte offsets
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A whitespace-delimited token of the normalized expression.
///
/// Runs of `(` stay glued to the front of the token and runs of `)` to its
/// back, so a token such as `((A` or `B)` carries nesting information along
/// with its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Position in the token sequence
    pub index: usize,
    /// Normalized token text, parentheses included
    pub text: String,
    /// Where the token came from in the raw input
    pub span: Span,
}

impl Token {
    /// Creates a token at `index` in the sequence
    pub fn new<S: Into<String>>(index: usize, text: S, span: Span) -> Self {
        Self {
            index,
            text: text.into(),
            span,
        }
    }

    /// The token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token text with every parenthesis removed: a feature name or an
    /// operator keyword.
    pub fn symbol(&self) -> String {
        strip_parentheses(&self.text)
    }

    /// Whether the token carries a `(`
    pub fn has_open_paren(&self) -> bool {
        self.text.contains('(')
    }

    /// Whether the token carries a `)`
    pub fn has_close_paren(&self) -> bool {
        self.text.contains(')')
    }

    /// Whether the token carries any parenthesis
    pub fn has_parentheses(&self) -> bool {
        self.has_open_paren() || self.has_close_paren()
    }

    /// Number of `(` glued to the front of the token.
    pub fn leading_opens(&self) -> usize {
        self.text.chars().take_while(|&c| c == '(').count()
    }

    /// Number of `)` glued to the back of the token.
    pub fn trailing_closes(&self) -> usize {
        self.text.chars().rev().take_while(|&c| c == ')').count()
    }

    /// `true` for a symbol wrapped in its own balanced parentheses, e.g.
    /// `(A)` or `((A))`. A token such as `((A)` still opens a group and is
    /// not self-enclosed.
    pub fn is_self_enclosed(&self) -> bool {
        let opens = self.leading_opens();
        opens > 0 && opens == self.trailing_closes() && !self.symbol().is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Removes every `(` and `)` from `text`.
pub fn strip_parentheses(text: &str) -> String {
    text.chars().filter(|&c| c != '(' && c != ')').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(text: &str) -> Token {
        Token::new(0, text, Span::new(0, text.len()))
    }

    #[test]
    fn test_symbol_strips_parentheses() {
        assert_eq!(token("((A").symbol(), "A");
        assert_eq!(token("B))").symbol(), "B");
        assert_eq!(token("(C)").symbol(), "C");
        assert_eq!(token("or").symbol(), "or");
        assert_eq!(token("()").symbol(), "");
    }

    #[test]
    fn test_paren_counts() {
        let t = token("((A");
        assert_eq!(t.leading_opens(), 2);
        assert_eq!(t.trailing_closes(), 0);
        assert!(t.has_open_paren());
        assert!(!t.has_close_paren());

        let t = token("B)))");
        assert_eq!(t.leading_opens(), 0);
        assert_eq!(t.trailing_closes(), 3);
    }

    #[test]
    fn test_self_enclosed() {
        assert!(token("(A)").is_self_enclosed());
        assert!(token("((A))").is_self_enclosed());
        assert!(!token("(A").is_self_enclosed());
        assert!(!token("A").is_self_enclosed());
        assert!(!token("(").is_self_enclosed());
        // a group that is still open after the first feature
        assert!(!token("((A)").is_self_enclosed());
        assert!(!token("(A))").is_self_enclosed());
        assert!(!token("()").is_self_enclosed());
    }
}
