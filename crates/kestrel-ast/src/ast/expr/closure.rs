//! Function and closure expressions.

use kestrel_log::trace;

use super::{Expr, Node, caret_at_start};
use crate::ast::decl::{ValueDecl, ValueDeclKind};
use crate::ast::pat::Pattern;
use crate::ast::stmt::BraceStmt;
use crate::context::AstContext;
use crate::span::{SourceLoc, SourceRange, Spanned};
use crate::types::Type;

/// `func (params) { body }`
#[derive(Debug, Clone, Copy)]
pub struct FuncExpr<'a> {
    pub func_loc: SourceLoc,
    /// One pattern per curried parameter clause.
    pub params: &'a [&'a Pattern<'a>],
    pub body: &'a BraceStmt<'a>,
}

impl<'a> FuncExpr<'a> {
    pub fn create(
        ctx: &'a AstContext,
        func_loc: SourceLoc,
        params: &[&'a Pattern<'a>],
        fn_type: Option<Type<'a>>,
        body: &'a BraceStmt<'a>,
    ) -> &'a Expr<'a> {
        let params = ctx.allocate_copy(params);
        Expr::with_optional_type(
            ctx,
            FuncExpr {
                func_loc,
                params,
                body,
            },
            fn_type,
        )
    }
}

impl<'a> Node<'a, FuncExpr<'a>> {
    /// The type the body produces: the function type with one result
    /// stripped per parameter clause.
    ///
    /// Returns `None` while the function is unresolved or if its type has
    /// fewer function levels than it has clauses.
    pub fn body_result_type(&self) -> Option<Type<'a>> {
        let mut ty = self.ty()?;
        for _ in 0..self.params.len().max(1) {
            let (_, result) = ty.as_function()?;
            ty = result;
        }
        Some(ty)
    }
}

impl Spanned for FuncExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.func_loc, self.body.end_loc())
    }
}

/// `{ body }` with anonymous `$0`, `$1`, ... parameters.
#[derive(Debug, Clone, Copy)]
pub struct ExplicitClosureExpr<'a> {
    pub lbrace: SourceLoc,
    pub body: &'a Expr<'a>,
    pub rbrace: SourceLoc,
}

impl<'a> ExplicitClosureExpr<'a> {
    /// Extends `decls` with anonymous parameters until `$count` exists.
    ///
    /// Existing entries are kept, so repeated calls with growing counts
    /// reuse the declarations already made.
    pub fn generate_var_decls(ctx: &'a AstContext, count: usize, decls: &mut Vec<&'a ValueDecl<'a>>) {
        while count >= decls.len() {
            let name = ctx.intern(&format!("${}", decls.len()));
            trace!("generated closure parameter {}", name);
            decls.push(ValueDecl::new(ValueDeclKind::Var, name, SourceLoc::INVALID).alloc(ctx));
        }
    }
}

impl Spanned for ExplicitClosureExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.lbrace, self.rbrace)
    }
}

/// An expression wrapped into a closure by the type checker, as for
/// autoclosure arguments.
#[derive(Debug, Clone, Copy)]
pub struct ImplicitClosureExpr<'a> {
    pub body: &'a Expr<'a>,
}

impl Spanned for ImplicitClosureExpr<'_> {
    fn source_range(&self) -> SourceRange {
        self.body.source_range()
    }
}

caret_at_start!(FuncExpr<'_>, ExplicitClosureExpr<'_>, ImplicitClosureExpr<'_>);
