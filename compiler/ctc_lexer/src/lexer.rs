//! Tokenizer/normalizer for constraint expressions using the 'logos' crate.
//!
//! The raw input is scanned into parentheses and words with whitespace
//! skipped, then the pieces are regrouped into tokens: a token is a run of
//! `(`, an optional word, and a run of `)`. This is the same token sequence
//! obtained by removing whitespace right of `(` and left of `)`, inserting a
//! boundary before every `(` not preceded by `(` and after every `)` not
//! followed by `)`, collapsing the remaining whitespace and splitting on it.

use std::ops::Deref;

use logos::Logos;

use crate::token::{Span, Token};

/// Raw pieces recognised by the logos scanner.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum Piece {
    /// `(`
    #[token("(")]
    Open,
    /// `)`
    #[token(")")]
    Close,
    /// Anything else up to whitespace or a parenthesis
    #[regex(r"[^\s()]+")]
    Word,
}

/// Errors raised while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// The input is empty or contains only whitespace
    #[error("Empty expression")]
    EmptyExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Opens,
    Word,
    Closes,
}

#[derive(Debug)]
struct Pending {
    text: String,
    span: Span,
    phase: Phase,
}

/// Iterator over the normalized tokens of an expression.
pub struct Lexer<'a> {
    inner: logos::SpannedIter<'a, Piece>,
    source: &'a str,
    pending: Option<Pending>,
    next_index: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: Piece::lexer(source).spanned(),
            source,
            pending: None,
            next_index: 0,
            done: false,
        }
    }

    fn finish(&mut self, pending: Pending) -> Token {
        let token = Token::new(self.next_index, pending.text, pending.span);
        self.next_index += 1;
        token
    }

    /// Appends a piece to the pending token, or starts a new one and returns
    /// the finished token when the piece cannot be glued on.
    fn push(&mut self, piece: Piece, range: std::ops::Range<usize>) -> Option<Token> {
        let slice = &self.source[range.clone()];
        let phase = match piece {
            Piece::Open => Phase::Opens,
            Piece::Word => Phase::Word,
            Piece::Close => Phase::Closes,
        };

        let glues = match (&self.pending, piece) {
            (None, _) => false,
            (Some(_), Piece::Close) => true,
            (Some(p), Piece::Open | Piece::Word) => p.phase == Phase::Opens,
        };

        if glues {
            if let Some(p) = self.pending.as_mut() {
                p.text.push_str(slice);
                p.span.end = range.end;
                p.phase = phase;
            }
            return None;
        }

        let finished = self.pending.take().map(|p| self.finish(p));
        self.pending = Some(Pending {
            text: slice.to_string(),
            span: Span::new(range.start, range.end),
            phase,
        });
        finished
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.inner.next() {
                Some((piece, range)) => {
                    // every non-whitespace character is a paren or part of a word
                    let piece = piece.unwrap_or(Piece::Word);
                    if let Some(token) = self.push(piece, range) {
                        return Some(token);
                    }
                }
                None => {
                    self.done = true;
                    if let Some(p) = self.pending.take() {
                        return Some(self.finish(p));
                    }
                }
            }
        }
        None
    }
}

/// The token sequence of one expression together with its normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    normalized: String,
}

impl TokenStream {
    /// Wraps a token sequence and computes its normalized text
    pub fn new(tokens: Vec<Token>) -> Self {
        let normalized = tokens
            .iter()
            .map(Token::text)
            .collect::<Vec<_>>()
            .join(" ");
        Self { tokens, normalized }
    }

    /// The normalized expression: tokens joined by single spaces.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The tokens in order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl Deref for TokenStream {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

/// Tokenizes and normalizes a raw expression.
///
/// Fails with [`LexError::EmptyExpression`] when the input is empty or
/// whitespace only.
pub fn tokenize(input: &str) -> Result<TokenStream, LexError> {
    if input.trim().is_empty() {
        return Err(LexError::EmptyExpression);
    }
    let stream = TokenStream::new(Lexer::new(input).collect());

    #[cfg(feature = "logging")]
    log::debug!(
        "normalized {:?} into {} tokens: {:?}",
        input,
        stream.len(),
        stream.normalized()
    );

    Ok(stream)
}

/// The normalized form of a raw expression, or an empty string for blank
/// input.
pub fn normalize(input: &str) -> String {
    TokenStream::new(Lexer::new(input).collect()).normalized
}
