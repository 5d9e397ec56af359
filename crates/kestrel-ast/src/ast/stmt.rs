//! Brace statements, the bodies of function expressions.

use std::fmt;

use crate::ast::decl::ValueDecl;
use crate::ast::expr::Expr;
use crate::context::AstContext;
use crate::span::{SourceLoc, SourceRange, Spanned};

#[derive(Debug, Clone, Copy)]
pub enum BraceElement<'a> {
    Expr(&'a Expr<'a>),
    Decl(&'a ValueDecl<'a>),
}

/// `{ ... }`
#[derive(Debug)]
pub struct BraceStmt<'a> {
    pub lbrace: SourceLoc,
    pub elements: &'a [BraceElement<'a>],
    pub rbrace: SourceLoc,
}

impl<'a> BraceStmt<'a> {
    pub fn create(
        ctx: &'a AstContext,
        lbrace: SourceLoc,
        elements: &[BraceElement<'a>],
        rbrace: SourceLoc,
    ) -> &'a BraceStmt<'a> {
        let elements = ctx.allocate_copy(elements);
        ctx.alloc(BraceStmt {
            lbrace,
            elements,
            rbrace,
        })
    }

    pub fn print(&self, ctx: &AstContext, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        let step = ctx.config().dump_indent;
        write!(out, "{:indent$}(brace_stmt", "")?;
        for element in self.elements {
            out.write_char('\n')?;
            match element {
                BraceElement::Expr(expr) => expr.print(ctx, out, indent + step)?,
                BraceElement::Decl(decl) => decl.print(ctx, out, indent + step)?,
            }
        }
        out.write_char(')')
    }
}

impl Spanned for BraceStmt<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.lbrace, self.rbrace)
    }
}
