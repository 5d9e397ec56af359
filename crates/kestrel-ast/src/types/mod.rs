//! Semantic types attached to resolved expressions.
//!
//! Types are arena-allocated and referenced as [`Type<'a>`]. This module
//! holds only what the expression layer queries: capability checks such as
//! "is this a builtin integer, and how wide" and "is this a metatype". Type
//! inference lives elsewhere.

mod display;

pub use display::DisplayType;

use kestrel_mem::Symbol;

/// A reference to an arena-allocated type.
pub type Type<'a> = &'a TypeBase<'a>;

/// IEEE binary floating-point formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    IEEE32,
    IEEE64,
}

impl FloatKind {
    pub const fn bit_width(self) -> u32 {
        match self {
            FloatKind::IEEE32 => 32,
            FloatKind::IEEE64 => 64,
        }
    }
}

/// One element of a tuple type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TupleTypeElt<'a> {
    pub name: Option<Symbol>,
    pub ty: Type<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeBase<'a> {
    /// `Builtin.Int<N>`
    BuiltinInteger { bit_width: u32 },
    /// `Builtin.FPIEEE32` / `Builtin.FPIEEE64`
    BuiltinFloat(FloatKind),
    Tuple(&'a [TupleTypeElt<'a>]),
    Function { input: Type<'a>, result: Type<'a> },
    /// The type of a type name used as a value.
    MetaType { instance: Type<'a> },
    /// A named oneof, struct or protocol.
    Nominal { name: Symbol },
    /// An addressable location holding `object`.
    LValue { object: Type<'a> },
    Module { name: Symbol },
    /// Placeholder for expressions whose type depends on unfinished overload
    /// resolution.
    UnstructuredDependent,
    Error,
}

impl<'a> TypeBase<'a> {
    /// Returns the bit width if this is a builtin integer type.
    pub fn as_builtin_integer(&self) -> Option<u32> {
        match *self {
            TypeBase::BuiltinInteger { bit_width } => Some(bit_width),
            _ => None,
        }
    }

    pub fn as_builtin_float(&self) -> Option<FloatKind> {
        match *self {
            TypeBase::BuiltinFloat(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_metatype(&self) -> bool {
        matches!(self, TypeBase::MetaType { .. })
    }

    pub fn is_dependent(&self) -> bool {
        matches!(self, TypeBase::UnstructuredDependent)
    }

    /// Returns `(input, result)` if this is a function type.
    pub fn as_function(&self) -> Option<(Type<'a>, Type<'a>)> {
        match *self {
            TypeBase::Function { input, result } => Some((input, result)),
            _ => None,
        }
    }

    /// Short description of the type's shape, used in error messages.
    pub const fn describe(&self) -> &'static str {
        match self {
            TypeBase::BuiltinInteger { .. } => "builtin integer type",
            TypeBase::BuiltinFloat(_) => "builtin float type",
            TypeBase::Tuple(_) => "tuple type",
            TypeBase::Function { .. } => "function type",
            TypeBase::MetaType { .. } => "metatype",
            TypeBase::Nominal { .. } => "nominal type",
            TypeBase::LValue { .. } => "lvalue type",
            TypeBase::Module { .. } => "module type",
            TypeBase::UnstructuredDependent => "dependent type",
            TypeBase::Error => "error type",
        }
    }
}
