//! Literal nodes and the error placeholder.

use kestrel_log::trace;

use super::{Expr, Node, caret_at_start};
use crate::context::AstContext;
use crate::error::{LiteralError, LiteralResult};
use crate::span::{SourceLoc, SourceRange, Spanned};
use crate::types::Type;
use crate::value::{FloatValue, IntegerValue};

/// Stands in for a subtree that failed to resolve.
///
/// Later passes skip error nodes instead of aborting the whole tree.
#[derive(Debug, Clone, Copy)]
pub struct ErrorExpr {
    pub range: SourceRange,
}

impl Spanned for ErrorExpr {
    fn source_range(&self) -> SourceRange {
        self.range
    }
}

/// An integer literal. The value is derived from `text` once the type is
/// known.
#[derive(Debug, Clone, Copy)]
pub struct IntegerLiteralExpr<'a> {
    pub text: &'a str,
    pub loc: SourceLoc,
}

impl<'a> IntegerLiteralExpr<'a> {
    /// Allocates an unresolved literal, copying `text` into the arena.
    pub fn create(ctx: &'a AstContext, text: &str, loc: SourceLoc) -> &'a Expr<'a> {
        Expr::new(ctx, IntegerLiteralExpr { text: ctx.alloc_str(text), loc })
    }

    /// The value this literal has at type `ty`.
    ///
    /// ```
    /// use kestrel_ast::ast::expr::IntegerLiteralExpr;
    /// use kestrel_ast::{AstContext, SourceLoc};
    ///
    /// let ctx = AstContext::new();
    /// let literal = IntegerLiteralExpr { text: "0xFF", loc: SourceLoc::new(0) };
    ///
    /// assert_eq!(literal.value_for(ctx.builtin_integer_type(8)).unwrap().to_string(), "-1");
    /// assert_eq!(literal.value_for(ctx.builtin_integer_type(16)).unwrap().to_string(), "255");
    /// ```
    pub fn value_for(&self, ty: Type<'_>) -> LiteralResult<IntegerValue> {
        let bit_width = ty.as_builtin_integer().ok_or(LiteralError::NotBuiltinInteger {
            found: ty.describe(),
        })?;
        IntegerValue::parse(self.text, bit_width)
    }
}

impl Node<'_, IntegerLiteralExpr<'_>> {
    /// The value at the node's resolved type.
    pub fn try_value(&self) -> LiteralResult<IntegerValue> {
        let ty = self.ty().ok_or(LiteralError::Unresolved)?;
        self.value_for(ty)
    }

    /// The value at the node's resolved type.
    ///
    /// # Panics
    ///
    /// Panics if the type is unresolved or not a builtin integer, or if the
    /// text is not a valid integer.
    pub fn value(&self) -> IntegerValue {
        self.try_value().unwrap_or_else(|err| panic!("{err}"))
    }
}

impl Spanned for IntegerLiteralExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FloatLiteralExpr<'a> {
    pub text: &'a str,
    pub loc: SourceLoc,
}

impl<'a> FloatLiteralExpr<'a> {
    pub fn create(ctx: &'a AstContext, text: &str, loc: SourceLoc) -> &'a Expr<'a> {
        Expr::new(ctx, FloatLiteralExpr { text: ctx.alloc_str(text), loc })
    }

    pub fn value_for(&self, ty: Type<'_>) -> LiteralResult<FloatValue> {
        let kind = ty.as_builtin_float().ok_or(LiteralError::NotBuiltinFloat {
            found: ty.describe(),
        })?;
        FloatValue::parse(self.text, kind)
    }
}

impl Node<'_, FloatLiteralExpr<'_>> {
    pub fn try_value(&self) -> LiteralResult<FloatValue> {
        let ty = self.ty().ok_or(LiteralError::Unresolved)?;
        self.value_for(ty)
    }

    /// # Panics
    ///
    /// Panics if the type is unresolved or not a builtin float, or if the
    /// text is not a valid decimal float.
    pub fn value(&self) -> FloatValue {
        self.try_value().unwrap_or_else(|err| panic!("{err}"))
    }
}

impl Spanned for FloatLiteralExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

/// A character literal; `value` is the Unicode scalar.
#[derive(Debug, Clone, Copy)]
pub struct CharacterLiteralExpr {
    pub value: u32,
    pub loc: SourceLoc,
}

impl Spanned for CharacterLiteralExpr {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteralExpr<'a> {
    pub value: &'a str,
    pub loc: SourceLoc,
}

impl<'a> StringLiteralExpr<'a> {
    pub fn create(ctx: &'a AstContext, value: &str, loc: SourceLoc) -> &'a Expr<'a> {
        Expr::new(ctx, StringLiteralExpr { value: ctx.alloc_str(value), loc })
    }
}

impl Spanned for StringLiteralExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

/// A string literal with `\(...)` segments; each segment is an expression.
#[derive(Debug, Clone, Copy)]
pub struct InterpolatedStringLiteralExpr<'a> {
    pub loc: SourceLoc,
    pub segments: &'a [&'a Expr<'a>],
}

impl<'a> InterpolatedStringLiteralExpr<'a> {
    pub fn create(ctx: &'a AstContext, loc: SourceLoc, segments: &[&'a Expr<'a>]) -> &'a Expr<'a> {
        trace!("interpolated string literal with {} segments", segments.len());
        let segments = ctx.allocate_copy(segments);
        Expr::new(ctx, InterpolatedStringLiteralExpr { loc, segments })
    }
}

impl Spanned for InterpolatedStringLiteralExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

caret_at_start!(
    ErrorExpr,
    IntegerLiteralExpr<'_>,
    FloatLiteralExpr<'_>,
    CharacterLiteralExpr,
    StringLiteralExpr<'_>,
    InterpolatedStringLiteralExpr<'_>,
);
