//! Parameter patterns of function expressions.

use kestrel_mem::Symbol;

use crate::context::AstContext;
use crate::span::{SourceLoc, SourceRange, Spanned};

#[derive(Debug, Clone, Copy)]
pub enum Pattern<'a> {
    /// A binding: `x`
    Named { name: Symbol, loc: SourceLoc },
    /// The wildcard `_`
    Any { loc: SourceLoc },
    /// A parenthesized list: `(x, _, (y, z))`
    Tuple {
        lparen: SourceLoc,
        elements: &'a [&'a Pattern<'a>],
        rparen: SourceLoc,
    },
}

impl<'a> Pattern<'a> {
    pub fn tuple(
        ctx: &'a AstContext,
        lparen: SourceLoc,
        elements: &[&'a Pattern<'a>],
        rparen: SourceLoc,
    ) -> &'a Pattern<'a> {
        let elements = ctx.allocate_copy(elements);
        ctx.alloc(Pattern::Tuple {
            lparen,
            elements,
            rparen,
        })
    }

    /// Number of names bound by the pattern, counting nested tuples.
    pub fn binding_count(&self) -> usize {
        match self {
            Pattern::Named { .. } => 1,
            Pattern::Any { .. } => 0,
            Pattern::Tuple { elements, .. } => elements.iter().map(|p| p.binding_count()).sum(),
        }
    }
}

impl Spanned for Pattern<'_> {
    fn source_range(&self) -> SourceRange {
        match *self {
            Pattern::Named { loc, .. } | Pattern::Any { loc } => SourceRange::point(loc),
            Pattern::Tuple { lparen, rparen, .. } => SourceRange::new(lparen, rparen),
        }
    }
}
