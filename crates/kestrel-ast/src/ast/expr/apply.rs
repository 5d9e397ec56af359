//! Function application.

use super::{Expr, ExprKind, ExprNode, caret_at_start, shared_record};
use crate::ast::decl::ValueDecl;
use crate::context::AstContext;
use crate::span::{SourceLoc, SourceRange, Spanned};

/// The record shared by call-like kinds: a callee applied to an argument.
#[derive(Debug, Clone, Copy)]
pub struct ApplyExpr<'a> {
    pub func: &'a Expr<'a>,
    pub arg: &'a Expr<'a>,
}

impl<'a> ApplyExpr<'a> {
    /// The declaration the callee names directly, if any.
    ///
    /// Parentheses and implicit conversions around the callee are skipped.
    pub fn called_value(&self) -> Option<&'a ValueDecl<'a>> {
        let mut callee = self.func.value_providing_expr();
        loop {
            if let ExprKind::DeclRef(decl_ref) = callee.kind() {
                return Some(decl_ref.decl);
            }
            callee = callee.as_implicit_conversion()?.sub.value_providing_expr();
        }
    }
}

impl Spanned for ApplyExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.func.start_loc(), self.arg.end_loc())
    }
}

shared_record!(
    /// `f(x)`
    CallExpr(ApplyExpr)
);

shared_record!(
    /// A prefix or postfix operator applied to its operand.
    UnaryExpr(ApplyExpr)
);

shared_record!(
    /// An infix operator. The argument is the unparenthesized tuple of both
    /// operands.
    BinaryExpr(ApplyExpr)
);

shared_record!(
    /// A call of a type, constructing a value of it.
    ConstructorCallExpr(ApplyExpr)
);

impl Spanned for CallExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.0.source_range()
    }
}

impl Spanned for UnaryExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.0.source_range()
    }
}

impl Spanned for ConstructorCallExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.0.source_range()
    }
}

impl Spanned for BinaryExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.arg.source_range()
    }
}

impl ExprNode for BinaryExpr<'_> {
    /// The operator.
    fn loc(&self) -> SourceLoc {
        self.func.loc()
    }
}

/// `base.method` resolved to an instance method: the method applied to its
/// base.
#[derive(Debug, Clone, Copy)]
pub struct DotSyntaxCallExpr<'a> {
    pub apply: ApplyExpr<'a>,
    pub dot_loc: SourceLoc,
}

impl<'a> DotSyntaxCallExpr<'a> {
    /// Allocates an unresolved application of `func` to `base`.
    pub fn create(
        ctx: &'a AstContext,
        func: &'a Expr<'a>,
        dot_loc: SourceLoc,
        base: &'a Expr<'a>,
    ) -> &'a Expr<'a> {
        let apply = ApplyExpr { func, arg: base };
        Expr::new(ctx, DotSyntaxCallExpr { apply, dot_loc })
    }

    pub fn base(&self) -> &'a Expr<'a> {
        self.apply.arg
    }
}

impl Spanned for DotSyntaxCallExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.apply.arg.start_loc(), self.apply.func.end_loc())
    }
}

impl ExprNode for DotSyntaxCallExpr<'_> {
    fn loc(&self) -> SourceLoc {
        self.dot_loc
    }
}

/// `base.member` where the base only selected the member and is not
/// passed to it, as for static members or access through a metatype.
#[derive(Debug, Clone, Copy)]
pub struct DotSyntaxBaseIgnoredExpr<'a> {
    pub lhs: &'a Expr<'a>,
    pub dot_loc: SourceLoc,
    pub rhs: &'a Expr<'a>,
}

impl<'a> DotSyntaxBaseIgnoredExpr<'a> {
    /// Allocates the node with the type of `rhs`.
    pub fn create(
        ctx: &'a AstContext,
        lhs: &'a Expr<'a>,
        dot_loc: SourceLoc,
        rhs: &'a Expr<'a>,
    ) -> &'a Expr<'a> {
        Expr::with_optional_type(ctx, DotSyntaxBaseIgnoredExpr { lhs, dot_loc, rhs }, rhs.ty())
    }
}

impl Spanned for DotSyntaxBaseIgnoredExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.lhs.start_loc(), self.rhs.end_loc())
    }
}

/// `T(x)` written as an explicit coercion of `rhs` to the type named by
/// `lhs`.
#[derive(Debug, Clone, Copy)]
pub struct CoerceExpr<'a> {
    pub lhs: &'a Expr<'a>,
    pub rhs: &'a Expr<'a>,
}

impl Spanned for CoerceExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.lhs.start_loc(), self.rhs.end_loc())
    }
}

caret_at_start!(
    CallExpr<'_>,
    UnaryExpr<'_>,
    ConstructorCallExpr<'_>,
    DotSyntaxBaseIgnoredExpr<'_>,
    CoerceExpr<'_>,
);
