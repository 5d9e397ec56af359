//! Value declarations referenced by expressions.
//!
//! Expressions only need a declaration's name, kind, location, the type a
//! reference to it has, and whether it is an instance member.

use std::cell::Cell;
use std::fmt;

use kestrel_mem::Symbol;

use crate::context::AstContext;
use crate::span::SourceLoc;
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDeclKind<'a> {
    Var,
    Func,
    OneOfElement,
    Subscript { element_type: Type<'a> },
}

impl ValueDeclKind<'_> {
    pub const fn name(&self) -> &'static str {
        match self {
            ValueDeclKind::Var => "var",
            ValueDeclKind::Func => "func",
            ValueDeclKind::OneOfElement => "oneof_element",
            ValueDeclKind::Subscript { .. } => "subscript",
        }
    }
}

/// A named value: variable, function, oneof element or subscript.
///
/// ```
/// use kestrel_ast::{AstContext, SourceLoc, ValueDecl, ValueDeclKind};
///
/// let ctx = AstContext::new();
/// let int = ctx.builtin_integer_type(64);
/// let count = ValueDecl::new(ValueDeclKind::Var, ctx.intern("count"), SourceLoc::new(4))
///     .with_type(int)
///     .instance_member()
///     .alloc(&ctx);
///
/// assert!(count.is_instance_member());
/// assert_eq!(count.type_of_reference(), Some(int));
/// ```
#[derive(Debug)]
pub struct ValueDecl<'a> {
    kind: ValueDeclKind<'a>,
    name: Symbol,
    loc: SourceLoc,
    ty: Cell<Option<Type<'a>>>,
    instance_member: bool,
}

impl<'a> ValueDecl<'a> {
    pub fn new(kind: ValueDeclKind<'a>, name: Symbol, loc: SourceLoc) -> Self {
        ValueDecl {
            kind,
            name,
            loc,
            ty: Cell::new(None),
            instance_member: false,
        }
    }

    #[must_use]
    pub fn with_type(self, ty: Type<'a>) -> Self {
        self.ty.set(Some(ty));
        self
    }

    /// Marks the declaration as a member of each instance of its type.
    #[must_use]
    pub fn instance_member(mut self) -> Self {
        self.instance_member = true;
        self
    }

    pub fn alloc(self, ctx: &'a AstContext) -> &'a ValueDecl<'a> {
        ctx.alloc(self)
    }

    pub fn kind(&self) -> ValueDeclKind<'a> {
        self.kind
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn loc(&self) -> SourceLoc {
        self.loc
    }

    pub fn is_instance_member(&self) -> bool {
        self.instance_member
    }

    /// The type an expression referring to this declaration has.
    pub fn type_of_reference(&self) -> Option<Type<'a>> {
        self.ty.get()
    }

    /// Records the declaration's type once it has been inferred.
    ///
    /// # Panics
    ///
    /// Panics if the type was already set.
    pub fn set_type(&self, ty: Type<'a>) {
        assert!(self.ty.get().is_none(), "declaration type written twice");
        self.ty.set(Some(ty));
    }

    /// The element type for subscript declarations.
    pub fn element_type(&self) -> Option<Type<'a>> {
        match self.kind {
            ValueDeclKind::Subscript { element_type } => Some(element_type),
            _ => None,
        }
    }

    pub fn print(&self, ctx: &AstContext, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        write!(out, "{:indent$}({}_decl \"", "", self.kind.name())?;
        match ctx.resolve(self.name) {
            Some(name) => out.write_str(&name)?,
            None => write!(out, "{}", self.name)?,
        }
        out.write_str("\" type='")?;
        match self.type_of_reference() {
            Some(ty) => write!(out, "{}", ty.display(ctx))?,
            None => out.write_str("<null>")?,
        }
        out.write_str("')")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decl_builder() {
        let ctx = AstContext::new();
        let decl = ValueDecl::new(ValueDeclKind::Func, ctx.intern("run"), SourceLoc::new(0)).alloc(&ctx);

        assert_eq!(decl.kind(), ValueDeclKind::Func);
        assert!(!decl.is_instance_member());
        assert_eq!(decl.type_of_reference(), None);
        assert_eq!(decl.element_type(), None);

        let ty = ctx.function_type(ctx.tuple_type(&[]), ctx.tuple_type(&[]));
        decl.set_type(ty);
        assert_eq!(decl.type_of_reference(), Some(ty));
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn test_decl_type_single_write() {
        let ctx = AstContext::new();
        let int = ctx.builtin_integer_type(32);
        let decl = ValueDecl::new(ValueDeclKind::Var, ctx.intern("x"), SourceLoc::INVALID)
            .with_type(int)
            .alloc(&ctx);
        decl.set_type(int);
    }

    #[test]
    fn test_decl_print() {
        let ctx = AstContext::new();
        let int = ctx.builtin_integer_type(32);
        let element = ValueDecl::new(
            ValueDeclKind::Subscript { element_type: int },
            ctx.intern("subscript"),
            SourceLoc::new(10),
        )
        .alloc(&ctx);
        let var = ValueDecl::new(ValueDeclKind::Var, ctx.intern("x"), SourceLoc::new(3))
            .with_type(int)
            .alloc(&ctx);

        let mut out = String::new();
        element.print(&ctx, &mut out, 2).unwrap();
        assert_eq!(out, "  (subscript_decl \"subscript\" type='<null>')");
        assert_eq!(element.element_type(), Some(int));

        out.clear();
        var.print(&ctx, &mut out, 0).unwrap();
        assert_eq!(out, "(var_decl \"x\" type='Builtin.Int32')");
    }
}
