//! Divide-and-conquer tree construction.
//!
//! [`AstBuilder`] walks a validated token sequence top-down. Each call takes a
//! half-open token range, emits the node that heads it and recurses into the
//! sub-ranges left and right of that node. Small ranges are handled directly:
//!
//! - 0 tokens: nothing (the empty left side of a prefix operator)
//! - 1 token: a feature leaf
//! - 2 tokens: a unary operator and its feature
//! - 3 tokens with a binary operator in the middle: the operator and two
//!   feature leaves
//!
//! Anything else is split at the operator chosen by [`SplitIndex::find_split`].

use std::ops::Range;

use ctc_ast::{Ast, Node, NodeId};
use ctc_lexer::{OperatorRegistry, Token, TokenStream};

use super::error::{ParseError, ParseResult};
use super::split::{Class, SplitIndex};

pub struct AstBuilder<'a> {
    tokens: &'a [Token],
    index: SplitIndex,
    nodes: Vec<Node>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(tokens: &'a [Token], registry: &OperatorRegistry) -> Self {
        Self {
            tokens,
            index: SplitIndex::new(tokens, registry),
            nodes: Vec::with_capacity(tokens.len()),
        }
    }

    /// Builds the tree of a validated token stream.
    pub fn build(stream: &TokenStream, registry: &OperatorRegistry) -> ParseResult<Ast> {
        let mut builder = AstBuilder::new(stream.tokens(), registry);
        builder.explore(0..stream.len(), None, 1)?;
        let nodes = builder.nodes;
        if nodes.len() != stream.len() {
            return Err(ParseError::internal(
                0,
                stream.len(),
                format!("{} tokens produced {} nodes", stream.len(), nodes.len()),
            ));
        }
        Ok(Ast::from_nodes(stream.normalized(), nodes)?)
    }

    /// Emits the subtree for `range`, hanging it below `parent`. `depth` is
    /// the depth of the node heading the range.
    fn explore(&mut self, range: Range<usize>, parent: Option<NodeId>, depth: usize) -> ParseResult<()> {
        log::trace!("explore {:?} parent={:?} depth={}", range, parent, depth);
        let Range { start: i, end: j } = range;

        match j - i {
            0 => Ok(()),
            1 => self.leaf(i, parent, depth),
            2 => {
                let operator = self.unary(i, parent, depth, &range)?;
                self.leaf(i + 1, Some(operator), depth + 1)
            }
            3 if matches!(self.index.class(i + 1), Class::Binary(_)) => {
                let operator = self.push_binary(i + 1, parent, depth);
                self.leaf(i, Some(operator), depth + 1)?;
                self.leaf(i + 2, Some(operator), depth + 1)
            }
            _ => {
                let Some(split) = self.index.find_split(range.clone()) else {
                    log::error!("no split operator in tokens {}..{}", i, j);
                    return Err(ParseError::internal(i, j, "no operator to split on"));
                };
                log::debug!(
                    "split {}..{} at {} ({})",
                    i,
                    j,
                    split,
                    self.tokens[split].text
                );

                let operator = match self.index.class(split) {
                    Class::Binary(_) => self.push_binary(split, parent, depth),
                    Class::Unary(_) if split == i => self.unary(split, parent, depth, &range)?,
                    _ => {
                        log::error!("unary split {} is not at the start of {}..{}", split, i, j);
                        return Err(ParseError::internal(
                            i,
                            j,
                            format!("unary operator at {split} has an operand on its left"),
                        ));
                    }
                };
                self.explore(i..split, Some(operator), depth + 1)?;
                self.explore(split + 1..j, Some(operator), depth + 1)
            }
        }
    }

    fn leaf(&mut self, at: usize, parent: Option<NodeId>, depth: usize) -> ParseResult<()> {
        if self.index.class(at) != Class::Feature {
            return Err(ParseError::internal(
                at,
                at + 1,
                format!("operator {} where a feature was expected", self.tokens[at].text),
            ));
        }
        self.nodes
            .push(Node::feature(NodeId(at), self.tokens[at].symbol(), parent, depth));
        Ok(())
    }

    fn unary(
        &mut self,
        at: usize,
        parent: Option<NodeId>,
        depth: usize,
        range: &Range<usize>,
    ) -> ParseResult<NodeId> {
        if !matches!(self.index.class(at), Class::Unary(_)) {
            return Err(ParseError::internal(
                range.start,
                range.end,
                format!("expected a unary operator, found {}", self.tokens[at].text),
            ));
        }
        self.nodes
            .push(Node::unary(NodeId(at), self.tokens[at].symbol(), parent, depth));
        Ok(NodeId(at))
    }

    fn push_binary(&mut self, at: usize, parent: Option<NodeId>, depth: usize) -> NodeId {
        self.nodes
            .push(Node::binary(NodeId(at), self.tokens[at].symbol(), parent, depth));
        NodeId(at)
    }
}
