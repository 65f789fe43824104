//! Split-point selection for the divide-and-conquer builder.
//!
//! Within a token range the split point is the operator that binds loosest
//! at the outermost nesting level of the range: binary operators beat unary
//! ones, a lower registry index beats a higher one, and the leftmost
//! candidate wins a tie. Unary operators are prefix operators, so when only
//! unary candidates remain the leftmost one heads the range whatever its
//! rank.
//!
//! Nesting is measured from the glued parentheses. The depth of position `e`
//! relative to a range starting at `i` is the number of `(` on tokens
//! `i..=e` minus the number of `)` on tokens `i..e`. Operators deeper than
//! the shallowest operator of the range sit inside an inner parenthesis pair
//! and are not candidates.

use std::ops::Range;

use ctc_lexer::{OperatorRegistry, Token};

/// Symbol classification of one token, with its precedence rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Feature,
    Unary(usize),
    Binary(usize),
}

impl Class {
    pub fn of(symbol: &str, registry: &OperatorRegistry) -> Self {
        if let Some(rank) = registry.binary_rank(symbol) {
            Class::Binary(rank)
        } else if let Some(rank) = registry.unary_rank(symbol) {
            Class::Unary(rank)
        } else {
            Class::Feature
        }
    }

    pub fn is_operator(self) -> bool {
        !matches!(self, Class::Feature)
    }
}

/// Precomputed classification and parenthesis counts for a token sequence.
#[derive(Debug, Clone)]
pub struct SplitIndex {
    classes: Vec<Class>,
    // opens[k] = number of '(' on tokens 0..k
    opens: Vec<usize>,
    // closes[k] = number of ')' on tokens 0..k
    closes: Vec<usize>,
}

impl SplitIndex {
    pub fn new(tokens: &[Token], registry: &OperatorRegistry) -> Self {
        let mut opens = Vec::with_capacity(tokens.len() + 1);
        let mut closes = Vec::with_capacity(tokens.len() + 1);
        opens.push(0);
        closes.push(0);
        for token in tokens {
            let last_open = opens[opens.len() - 1];
            let last_close = closes[closes.len() - 1];
            opens.push(last_open + token.leading_opens());
            closes.push(last_close + token.trailing_closes());
        }
        Self {
            classes: tokens
                .iter()
                .map(|t| Class::of(&t.symbol(), registry))
                .collect(),
            opens,
            closes,
        }
    }

    pub fn class(&self, index: usize) -> Class {
        self.classes[index]
    }

    /// Nesting depth of position `e` relative to the start of `range`.
    pub fn depth(&self, range: &Range<usize>, e: usize) -> isize {
        let opened = self.opens[e + 1] - self.opens[range.start];
        let closed = self.closes[e] - self.closes[range.start];
        opened as isize - closed as isize
    }

    /// Operator positions of `range` that are not enclosed by an inner
    /// parenthesis pair.
    pub fn outermost_operators(&self, range: Range<usize>) -> Vec<usize> {
        let operators: Vec<(usize, isize)> = range
            .clone()
            .filter(|&e| self.classes[e].is_operator())
            .map(|e| (e, self.depth(&range, e)))
            .collect();
        let Some(base) = operators.iter().map(|&(_, depth)| depth).min() else {
            return Vec::new();
        };
        operators
            .into_iter()
            .filter(|&(_, depth)| depth == base)
            .map(|(e, _)| e)
            .collect()
    }

    /// The split point of `range`, or `None` if it holds no operator.
    pub fn find_split(&self, range: Range<usize>) -> Option<usize> {
        let candidates = self.outermost_operators(range);

        candidates
            .iter()
            .filter_map(|&e| match self.classes[e] {
                Class::Binary(rank) => Some((rank, e)),
                _ => None,
            })
            .min()
            .map(|(_, e)| e)
            .or_else(|| {
                candidates
                    .into_iter()
                    .find(|&e| matches!(self.classes[e], Class::Unary(_)))
            })
    }
}
