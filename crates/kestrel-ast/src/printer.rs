//! S-expression dumps of expression trees.
//!
//! Each node prints as `(<kind-name> type='<type>' <attributes>`, followed by
//! its children one per line, indented one step deeper, and a closing `)`.
//! An unresolved type prints as `<null>`.
//!
//! ```
//! use kestrel_ast::ast::expr::{Expr, IntegerLiteralExpr, ParenExpr};
//! use kestrel_ast::{AstContext, SourceLoc};
//!
//! let ctx = AstContext::new();
//! let one = IntegerLiteralExpr::create(&ctx, "1", SourceLoc::new(1));
//! let paren = Expr::new(&ctx, ParenExpr { lparen: SourceLoc::new(0), sub: one, rparen: SourceLoc::new(2) });
//!
//! assert_eq!(
//!     paren.display(&ctx).to_string(),
//!     "(paren_expr type='<null>'\n  (integer_literal_expr type='<null>' value=1))"
//! );
//! ```

use std::fmt;

use kestrel_mem::Symbol;

use crate::ast::decl::ValueDecl;
use crate::ast::expr::*;
use crate::context::AstContext;

/// Prints one node and, recursively, its children.
///
/// Implements [`ExprVisitor`], so a new node kind cannot be added without a
/// printing rule for it.
pub struct ExprPrinter<'c, 'w> {
    ctx: &'c AstContext,
    out: &'w mut dyn fmt::Write,
    indent: usize,
    step: usize,
}

impl<'c, 'w> ExprPrinter<'c, 'w> {
    /// Creates a printer starting at column `indent`. Children are indented
    /// by the context's configured dump step.
    pub fn new(ctx: &'c AstContext, out: &'w mut dyn fmt::Write, indent: usize) -> Self {
        ExprPrinter {
            ctx,
            out,
            indent,
            step: ctx.config().dump_indent,
        }
    }

    fn header(&mut self, expr: &Expr<'_>, tag: ExprTag) -> fmt::Result {
        write!(self.out, "{:indent$}({} type='", "", tag.name(), indent = self.indent)?;
        match expr.ty() {
            Some(ty) => write!(self.out, "{}", ty.display(self.ctx))?,
            None => self.out.write_str("<null>")?,
        }
        self.out.write_char('\'')
    }

    fn name(&mut self, sym: Symbol) -> fmt::Result {
        match self.ctx.resolve(sym) {
            Some(text) => self.out.write_str(&text),
            None => write!(self.out, "{sym}"),
        }
    }

    /// Starts a new line and prints `child` one step deeper.
    fn child<'a>(&mut self, child: Option<&'a Expr<'a>>) -> fmt::Result {
        self.out.write_char('\n')?;
        self.indent += self.step;
        let result = match child {
            Some(expr) => expr.accept(self),
            None => write!(self.out, "{:indent$}(**NULL EXPRESSION**)", "", indent = self.indent),
        };
        self.indent -= self.step;
        result
    }

    fn decl(&mut self, decl: &ValueDecl<'_>) -> fmt::Result {
        self.out.write_char('\n')?;
        decl.print(self.ctx, self.out, self.indent + self.step)
    }

    fn close(&mut self) -> fmt::Result {
        self.out.write_char(')')
    }

    /// A node with only a child list.
    fn branch<'a>(&mut self, expr: &Expr<'a>, children: &[&'a Expr<'a>]) -> fmt::Result {
        self.header(expr, expr.tag())?;
        for &child in children {
            self.child(Some(child))?;
        }
        self.close()
    }
}

impl<'a> ExprVisitor<'a> for ExprPrinter<'_, '_> {
    type Output = fmt::Result;

    fn visit_error(&mut self, expr: Node<'a, ErrorExpr>) -> fmt::Result {
        self.branch(expr.expr(), &[])
    }

    fn visit_integer_literal(&mut self, expr: Node<'a, IntegerLiteralExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::IntegerLiteral)?;
        match expr.try_value() {
            Ok(value) => write!(self.out, " value={value}")?,
            Err(_) => write!(self.out, " value={}", expr.text)?,
        }
        self.close()
    }

    fn visit_float_literal(&mut self, expr: Node<'a, FloatLiteralExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::FloatLiteral)?;
        write!(self.out, " value={}", expr.text)?;
        self.close()
    }

    fn visit_character_literal(&mut self, expr: Node<'a, CharacterLiteralExpr>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::CharacterLiteral)?;
        write!(self.out, " value={}", expr.value)?;
        self.close()
    }

    fn visit_string_literal(&mut self, expr: Node<'a, StringLiteralExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::StringLiteral)?;
        write!(self.out, " value={}", expr.value)?;
        self.close()
    }

    fn visit_interpolated_string_literal(
        &mut self,
        expr: Node<'a, InterpolatedStringLiteralExpr<'a>>,
    ) -> fmt::Result {
        self.branch(expr.expr(), expr.segments)
    }

    fn visit_decl_ref(&mut self, expr: Node<'a, DeclRefExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::DeclRef)?;
        self.out.write_str(" decl=")?;
        self.name(expr.decl.name())?;
        self.close()
    }

    fn visit_overloaded_decl_ref(&mut self, expr: Node<'a, OverloadedDeclRefExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::OverloadedDeclRef)?;
        write!(self.out, " #decls={}", expr.decls.len())?;
        for decl in expr.decls {
            self.decl(decl)?;
        }
        self.close()
    }

    fn visit_overloaded_member_ref(&mut self, expr: Node<'a, OverloadedMemberRefExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::OverloadedMemberRef)?;
        write!(self.out, " #decls={}", expr.decls.len())?;
        self.child(Some(expr.base))?;
        for decl in expr.decls {
            self.decl(decl)?;
        }
        self.close()
    }

    fn visit_unresolved_decl_ref(&mut self, expr: Node<'a, UnresolvedDeclRefExpr>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::UnresolvedDeclRef)?;
        self.out.write_str(" name=")?;
        self.name(expr.name)?;
        self.close()
    }

    fn visit_member_ref(&mut self, expr: Node<'a, MemberRefExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::MemberRef)?;
        self.out.write_str(" decl=")?;
        self.name(expr.decl.name())?;
        self.child(Some(expr.base))?;
        self.close()
    }

    fn visit_unresolved_member(&mut self, expr: Node<'a, UnresolvedMemberExpr>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::UnresolvedMember)?;
        self.out.write_str(" name='")?;
        self.name(expr.name)?;
        self.out.write_char('\'')?;
        self.close()
    }

    fn visit_paren(&mut self, expr: Node<'a, ParenExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_tuple(&mut self, expr: Node<'a, TupleExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::Tuple)?;
        for element in expr.elements {
            match element {
                Some(_) => self.child(*element)?,
                None => write!(
                    self.out,
                    "\n{:indent$}<<tuple element default value>>",
                    "",
                    indent = self.indent + self.step
                )?,
            }
        }
        self.close()
    }

    fn visit_subscript(&mut self, expr: Node<'a, SubscriptExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.base, expr.index])
    }

    fn visit_overloaded_subscript(&mut self, expr: Node<'a, OverloadedSubscriptExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.base, expr.index])
    }

    fn visit_unresolved_dot(&mut self, expr: Node<'a, UnresolvedDotExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::UnresolvedDot)?;
        self.out.write_str(" field '")?;
        self.name(expr.name)?;
        self.out.write_char('\'')?;
        if let Some(base) = expr.base {
            self.child(Some(base))?;
        }
        self.close()
    }

    fn visit_module(&mut self, expr: Node<'a, ModuleExpr>) -> fmt::Result {
        self.branch(expr.expr(), &[])
    }

    fn visit_syntactic_tuple_element(&mut self, expr: Node<'a, SyntacticTupleElementExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::SyntacticTupleElement)?;
        write!(self.out, " field #{}", expr.field_number)?;
        self.child(Some(expr.base))?;
        self.close()
    }

    fn visit_implicit_this_tuple_element(
        &mut self,
        expr: Node<'a, ImplicitThisTupleElementExpr<'a>>,
    ) -> fmt::Result {
        self.header(expr.expr(), ExprTag::ImplicitThisTupleElement)?;
        write!(self.out, " field #{}", expr.field_number)?;
        self.child(Some(expr.base))?;
        self.close()
    }

    fn visit_tuple_shuffle(&mut self, expr: Node<'a, TupleShuffleExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::TupleShuffle)?;
        self.out.write_str(" elements=[")?;
        for (i, source) in expr.mapping.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            write!(self.out, "{source}")?;
        }
        self.out.write_char(']')?;
        self.child(Some(expr.sub))?;
        self.close()
    }

    fn visit_look_through_oneof(&mut self, expr: Node<'a, LookThroughOneofExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_parameter_rename(&mut self, expr: Node<'a, ParameterRenameExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_scalar_to_tuple(&mut self, expr: Node<'a, ScalarToTupleExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_load(&mut self, expr: Node<'a, LoadExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_materialize(&mut self, expr: Node<'a, MaterializeExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_requalify(&mut self, expr: Node<'a, RequalifyExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_address_of(&mut self, expr: Node<'a, AddressOfExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.sub])
    }

    fn visit_sequence(&mut self, expr: Node<'a, SequenceExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), expr.elements)
    }

    fn visit_func(&mut self, expr: Node<'a, FuncExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::Func)?;
        self.out.write_char('\n')?;
        expr.body.print(self.ctx, self.out, self.indent + self.step)?;
        self.close()
    }

    fn visit_explicit_closure(&mut self, expr: Node<'a, ExplicitClosureExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.body])
    }

    fn visit_implicit_closure(&mut self, expr: Node<'a, ImplicitClosureExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.body])
    }

    fn visit_new_array(&mut self, expr: Node<'a, NewArrayExpr<'a>>) -> fmt::Result {
        self.header(expr.expr(), ExprTag::NewArray)?;
        write!(self.out, " elementType='{}'", expr.element_ty.display(self.ctx))?;
        for bound in expr.bounds {
            self.child(bound.value)?;
        }
        self.close()
    }

    fn visit_call(&mut self, expr: Node<'a, CallExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.func, expr.arg])
    }

    fn visit_unary(&mut self, expr: Node<'a, UnaryExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.func, expr.arg])
    }

    fn visit_binary(&mut self, expr: Node<'a, BinaryExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.func, expr.arg])
    }

    fn visit_constructor_call(&mut self, expr: Node<'a, ConstructorCallExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.func, expr.arg])
    }

    fn visit_dot_syntax_call(&mut self, expr: Node<'a, DotSyntaxCallExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.apply.func, expr.apply.arg])
    }

    fn visit_dot_syntax_base_ignored(&mut self, expr: Node<'a, DotSyntaxBaseIgnoredExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.lhs, expr.rhs])
    }

    fn visit_coerce(&mut self, expr: Node<'a, CoerceExpr<'a>>) -> fmt::Result {
        self.branch(expr.expr(), &[expr.lhs, expr.rhs])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AstConfig;
    use crate::span::SourceLoc;

    fn loc(offset: u32) -> SourceLoc {
        SourceLoc::new(offset)
    }

    #[test]
    fn test_null_child_and_default_slot() {
        let ctx = AstContext::new();
        let array = NewArrayExpr::create(
            &ctx,
            loc(0),
            ctx.builtin_integer_type(8),
            &[Bound {
                value: None,
                brackets: crate::span::SourceRange::new(loc(5), loc(6)),
            }],
        );
        assert_eq!(
            array.display(&ctx).to_string(),
            "(new_array_expr type='<null>' elementType='Builtin.Int8'\n  (**NULL EXPRESSION**))"
        );

        let tuple = TupleExpr::create(&ctx, loc(0), &[None], loc(1));
        assert_eq!(
            tuple.display(&ctx).to_string(),
            "(tuple_expr type='<null>'\n  <<tuple element default value>>)"
        );
    }

    #[test]
    fn test_configured_step() {
        let ctx = AstContext::with_config(AstConfig::default().with_dump_indent(4));
        let inner = Expr::new(&ctx, ModuleExpr { loc: loc(1) });
        let paren = Expr::new(&ctx, ParenExpr { lparen: loc(0), sub: inner, rparen: loc(2) });

        let mut out = String::new();
        paren.print(&ctx, &mut out, 1).unwrap();
        assert_eq!(out, " (paren_expr type='<null>'\n     (module_expr type='<null>'))");
    }

    #[test]
    fn test_integer_literal_falls_back_to_text() {
        let ctx = AstContext::new();
        let literal = IntegerLiteralExpr::create(&ctx, "0x10", loc(0));
        assert_eq!(
            literal.display(&ctx).to_string(),
            "(integer_literal_expr type='<null>' value=0x10)"
        );

        let dependent = Expr::with_type(&ctx, IntegerLiteralExpr { text: "0x10", loc: loc(0) }, ctx.dependent_type());
        assert_eq!(
            dependent.display(&ctx).to_string(),
            "(integer_literal_expr type='<<dependent type>>' value=0x10)"
        );
    }
}
