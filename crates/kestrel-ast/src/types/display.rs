use std::fmt;

use kestrel_mem::Symbol;

use super::{FloatKind, Type, TypeBase};
use crate::context::AstContext;

/// Renders a type with its names resolved through the context's interner.
pub struct DisplayType<'t, 'a> {
    ty: &'t TypeBase<'a>,
    ctx: &'t AstContext,
}

impl<'a> TypeBase<'a> {
    /// ```
    /// use kestrel_ast::AstContext;
    ///
    /// let ctx = AstContext::new();
    /// let int = ctx.builtin_integer_type(64);
    /// let meta = ctx.metatype(ctx.nominal_type("Point"));
    ///
    /// assert_eq!(ctx.function_type(int, meta).display(&ctx).to_string(), "Builtin.Int64 -> metatype<Point>");
    /// ```
    pub fn display<'t>(&'t self, ctx: &'t AstContext) -> DisplayType<'t, 'a> {
        DisplayType { ty: self, ctx }
    }
}

impl<'t, 'a> DisplayType<'t, 'a> {
    fn name(&self, f: &mut fmt::Formatter<'_>, sym: Symbol) -> fmt::Result {
        match self.ctx.resolve(sym) {
            Some(text) => f.write_str(&text),
            None => write!(f, "{sym}"),
        }
    }

    fn nested(&self, ty: Type<'a>) -> DisplayType<'t, 'a> {
        DisplayType { ty, ctx: self.ctx }
    }
}

impl fmt::Display for DisplayType<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.ty {
            TypeBase::BuiltinInteger { bit_width } => write!(f, "Builtin.Int{bit_width}"),
            TypeBase::BuiltinFloat(FloatKind::IEEE32) => f.write_str("Builtin.FPIEEE32"),
            TypeBase::BuiltinFloat(FloatKind::IEEE64) => f.write_str("Builtin.FPIEEE64"),
            TypeBase::Tuple(elements) => {
                f.write_str("(")?;
                for (i, elt) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if let Some(name) = elt.name {
                        self.name(f, name)?;
                        f.write_str(" : ")?;
                    }
                    write!(f, "{}", self.nested(elt.ty))?;
                }
                f.write_str(")")
            }
            TypeBase::Function { input, result } => {
                if input.as_function().is_some() {
                    write!(f, "({}) -> {}", self.nested(input), self.nested(result))
                } else {
                    write!(f, "{} -> {}", self.nested(input), self.nested(result))
                }
            }
            TypeBase::MetaType { instance } => write!(f, "metatype<{}>", self.nested(instance)),
            TypeBase::Nominal { name } => self.name(f, name),
            TypeBase::LValue { object } => write!(f, "[byref] {}", self.nested(object)),
            TypeBase::Module { name } => {
                f.write_str("module<")?;
                self.name(f, name)?;
                f.write_str(">")
            }
            TypeBase::UnstructuredDependent => f.write_str("<<dependent type>>"),
            TypeBase::Error => f.write_str("<<error type>>"),
        }
    }
}
