//! Grouping, tuples, subscripts and other aggregate nodes.

use kestrel_log::trace;

use super::{Expr, ExprNode, caret_at_start, shared_record};
use crate::ast::decl::ValueDecl;
use crate::context::AstContext;
use crate::span::{SourceLoc, SourceRange, Spanned};
use crate::types::Type;

/// `(sub)` with exactly one element and no label.
#[derive(Debug, Clone, Copy)]
pub struct ParenExpr<'a> {
    pub lparen: SourceLoc,
    pub sub: &'a Expr<'a>,
    pub rparen: SourceLoc,
}

impl Spanned for ParenExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.lparen, self.rparen)
    }
}

/// A tuple literal. `None` slots take the element's default value.
///
/// Binary operators build a tuple of their two operands without
/// parentheses; such a tuple spans from the first operand to the second.
#[derive(Debug, Clone, Copy)]
pub struct TupleExpr<'a> {
    pub lparen: SourceLoc,
    pub elements: &'a [Option<&'a Expr<'a>>],
    pub rparen: SourceLoc,
}

impl<'a> TupleExpr<'a> {
    pub fn create(
        ctx: &'a AstContext,
        lparen: SourceLoc,
        elements: &[Option<&'a Expr<'a>>],
        rparen: SourceLoc,
    ) -> &'a Expr<'a> {
        let elements = ctx.allocate_copy(elements);
        Expr::new(
            ctx,
            TupleExpr {
                lparen,
                elements,
                rparen,
            },
        )
    }

    /// Returns `true` if the tuple was written with parentheses.
    pub fn has_parens(&self) -> bool {
        self.lparen.is_valid()
    }
}

impl Spanned for TupleExpr<'_> {
    /// # Panics
    ///
    /// Panics if only one parenthesis is valid, or if an unparenthesized
    /// tuple does not hold exactly two present operands.
    fn source_range(&self) -> SourceRange {
        if self.has_parens() {
            assert!(self.rparen.is_valid(), "tuple has mismatched parentheses");
            return SourceRange::new(self.lparen, self.rparen);
        }

        match self.elements {
            [Some(lhs), Some(rhs)] => SourceRange::new(lhs.start_loc(), rhs.end_loc()),
            _ => panic!("a tuple without parentheses must hold exactly two operands"),
        }
    }
}

/// `base[index]` resolved to one subscript declaration.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptExpr<'a> {
    pub decl: Option<&'a ValueDecl<'a>>,
    pub base: &'a Expr<'a>,
    pub brackets: SourceRange,
    pub index: &'a Expr<'a>,
}

impl Spanned for SubscriptExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.base.start_loc(), self.brackets.end)
    }
}

impl ExprNode for SubscriptExpr<'_> {
    fn loc(&self) -> SourceLoc {
        self.brackets.start
    }
}

/// `base[index]` where several subscripts are candidates.
#[derive(Debug, Clone, Copy)]
pub struct OverloadedSubscriptExpr<'a> {
    pub base: &'a Expr<'a>,
    /// Candidates in lookup order.
    pub decls: &'a [&'a ValueDecl<'a>],
    pub brackets: SourceRange,
    pub index: &'a Expr<'a>,
}

impl<'a> OverloadedSubscriptExpr<'a> {
    /// Builds a [`SubscriptExpr`] naming the single candidate, typed with
    /// its element type, or an overloaded subscript owning an arena copy of
    /// `decls`.
    ///
    /// # Panics
    ///
    /// Panics if `decls` is empty.
    pub fn create_with_copy(
        ctx: &'a AstContext,
        base: &'a Expr<'a>,
        decls: &[&'a ValueDecl<'a>],
        lbracket: SourceLoc,
        index: &'a Expr<'a>,
        rbracket: SourceLoc,
    ) -> &'a Expr<'a> {
        assert!(!decls.is_empty(), "cannot create an overloaded subscript with no decls");
        let brackets = SourceRange::new(lbracket, rbracket);

        if let &[decl] = decls {
            trace!("subscript at {} collapses to its single candidate", lbracket);
            let node = SubscriptExpr {
                decl: Some(decl),
                base,
                brackets,
                index,
            };
            return Expr::with_optional_type(ctx, node, decl.element_type());
        }

        trace!("subscript at {} stays overloaded over {} candidates", lbracket, decls.len());
        let decls = ctx.allocate_copy(decls);
        let node = OverloadedSubscriptExpr {
            base,
            decls,
            brackets,
            index,
        };
        Expr::with_type(ctx, node, ctx.dependent_type())
    }
}

impl Spanned for OverloadedSubscriptExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.base.start_loc(), self.brackets.end)
    }
}

impl ExprNode for OverloadedSubscriptExpr<'_> {
    fn loc(&self) -> SourceLoc {
        self.brackets.start
    }
}

/// Field access into a tuple by position: `base.0` or `base.name`.
#[derive(Debug, Clone, Copy)]
pub struct TupleElement<'a> {
    pub base: &'a Expr<'a>,
    pub dot_loc: SourceLoc,
    pub field_number: u32,
    pub name_loc: SourceLoc,
}

impl Spanned for TupleElement<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.base.start_loc(), self.name_loc)
    }
}

shared_record!(
    /// A tuple element access written in the source.
    SyntacticTupleElementExpr(TupleElement)
);

shared_record!(
    /// A tuple element access on the implicit `this`.
    ImplicitThisTupleElementExpr(TupleElement)
);

impl Spanned for SyntacticTupleElementExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.0.source_range()
    }
}

impl Spanned for ImplicitThisTupleElementExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.0.source_range()
    }
}

/// Reorders the elements of `sub` into a tuple of the destination type.
///
/// Slot `i` of the result takes element `mapping[i]` of the source, or its
/// default value when the entry is negative.
#[derive(Debug, Clone, Copy)]
pub struct TupleShuffleExpr<'a> {
    pub sub: &'a Expr<'a>,
    pub mapping: &'a [i32],
}

impl<'a> TupleShuffleExpr<'a> {
    pub fn create(ctx: &'a AstContext, sub: &'a Expr<'a>, mapping: &[i32], ty: Type<'a>) -> &'a Expr<'a> {
        let mapping = ctx.allocate_copy(mapping);
        Expr::with_type(ctx, TupleShuffleExpr { sub, mapping }, ty)
    }
}

impl Spanned for TupleShuffleExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.sub.source_range()
    }
}

/// An operator sequence awaiting precedence folding.
#[derive(Debug, Clone, Copy)]
pub struct SequenceExpr<'a> {
    pub elements: &'a [&'a Expr<'a>],
}

impl<'a> SequenceExpr<'a> {
    /// # Panics
    ///
    /// Panics if `elements` is empty.
    pub fn create(ctx: &'a AstContext, elements: &[&'a Expr<'a>]) -> &'a Expr<'a> {
        assert!(!elements.is_empty(), "sequence must have at least one element");
        let elements = ctx.allocate_copy(elements);
        Expr::new(ctx, SequenceExpr { elements })
    }
}

impl Spanned for SequenceExpr<'_> {
    fn source_range(&self) -> SourceRange {
        match (self.elements.first(), self.elements.last()) {
            (Some(first), Some(last)) => SourceRange::new(first.start_loc(), last.end_loc()),
            _ => SourceRange::INVALID,
        }
    }
}

/// One `[n]` dimension of a `new` array expression.
#[derive(Debug, Clone, Copy)]
pub struct Bound<'a> {
    /// The size, absent for `[]`.
    pub value: Option<&'a Expr<'a>>,
    pub brackets: SourceRange,
}

/// `new T[n][m]...`
#[derive(Debug, Clone, Copy)]
pub struct NewArrayExpr<'a> {
    pub new_loc: SourceLoc,
    pub element_ty: Type<'a>,
    pub bounds: &'a [Bound<'a>],
}

impl<'a> NewArrayExpr<'a> {
    /// # Panics
    ///
    /// Panics if `bounds` is empty.
    pub fn create(
        ctx: &'a AstContext,
        new_loc: SourceLoc,
        element_ty: Type<'a>,
        bounds: &[Bound<'a>],
    ) -> &'a Expr<'a> {
        assert!(!bounds.is_empty(), "new array needs at least one bound");
        let bounds = ctx.allocate_copy(bounds);
        Expr::new(
            ctx,
            NewArrayExpr {
                new_loc,
                element_ty,
                bounds,
            },
        )
    }
}

impl Spanned for NewArrayExpr<'_> {
    fn source_range(&self) -> SourceRange {
        let end = self.bounds.last().map_or(self.new_loc, |bound| bound.brackets.end);
        SourceRange::new(self.new_loc, end)
    }
}

caret_at_start!(
    ParenExpr<'_>,
    TupleExpr<'_>,
    SyntacticTupleElementExpr<'_>,
    ImplicitThisTupleElementExpr<'_>,
    TupleShuffleExpr<'_>,
    SequenceExpr<'_>,
    NewArrayExpr<'_>,
);
