//! Expression nodes.
//!
//! An [`Expr`] is a fixed header (the kind payload plus a resolution slot)
//! allocated in the [`AstContext`] arena and referenced as `&'a Expr<'a>`.
//! The payload is an [`ExprKind`], a closed sum type with one variant per
//! node kind; each variant wraps a plain node record such as [`ParenExpr`]
//! or [`TupleExpr`]. Children are arena references, and variable-length
//! children are arena-copied slices whose length is fixed at construction.
//!
//! # Narrowing
//!
//! [`Expr::cast`] narrows a node to a specific record and returns a
//! [`Node`], which pairs the record with its header so the resolved type
//! stays reachable:
//!
//! ```
//! use kestrel_ast::ast::expr::{Expr, IntegerLiteralExpr, ParenExpr};
//! use kestrel_ast::{AstContext, SourceLoc};
//!
//! let ctx = AstContext::new();
//! let one = IntegerLiteralExpr::create(&ctx, "1", SourceLoc::new(1));
//! let paren = Expr::new(&ctx, ParenExpr {
//!     lparen: SourceLoc::new(0),
//!     sub: one,
//!     rparen: SourceLoc::new(2),
//! });
//!
//! assert!(paren.cast::<IntegerLiteralExpr>().is_none());
//! let literal = paren.semantics_providing_expr().cast::<IntegerLiteralExpr>().unwrap();
//! assert_eq!(literal.text, "1");
//! ```
//!
//! # Resolution
//!
//! Nodes start [`Resolution::Unresolved`] unless built with a type. The type
//! checker fills the slot once with [`Expr::set_type`]; a second write is a
//! defect and panics.

mod aggregate;
mod apply;
mod closure;
mod conversion;
mod kind;
mod literal;
mod reference;

pub use aggregate::{
    Bound, ImplicitThisTupleElementExpr, NewArrayExpr, OverloadedSubscriptExpr, ParenExpr,
    SequenceExpr, SubscriptExpr, SyntacticTupleElementExpr, TupleElement, TupleExpr,
    TupleShuffleExpr,
};
pub use apply::{
    ApplyExpr, BinaryExpr, CallExpr, CoerceExpr, ConstructorCallExpr, DotSyntaxBaseIgnoredExpr,
    DotSyntaxCallExpr, UnaryExpr,
};
pub use closure::{ExplicitClosureExpr, FuncExpr, ImplicitClosureExpr};
pub use conversion::{
    AddressOfExpr, ImplicitConversion, LoadExpr, LookThroughOneofExpr, MaterializeExpr,
    ParameterRenameExpr, RequalifyExpr, ScalarToTupleExpr,
};
pub use kind::{ExprKind, ExprTag, ExprVariant, ExprVisitor};
pub use literal::{
    CharacterLiteralExpr, ErrorExpr, FloatLiteralExpr, IntegerLiteralExpr,
    InterpolatedStringLiteralExpr, StringLiteralExpr,
};
pub use reference::{
    DeclRefExpr, MemberRefExpr, ModuleExpr, OverloadSet, OverloadedDeclRefExpr,
    OverloadedMemberRefExpr, UnresolvedDeclRefExpr, UnresolvedDotExpr, UnresolvedMemberExpr,
};

use std::cell::Cell;
use std::fmt;
use std::ops::Deref;

use crate::context::AstContext;
use crate::printer::ExprPrinter;
use crate::span::{SourceLoc, SourceRange, Spanned};
use crate::types::Type;

/// Per-node operations every kind must supply.
///
/// `loc` is the caret location used to point at the node in diagnostics.
/// There is no default: kinds whose caret is the start of their range say
/// so explicitly.
pub trait ExprNode: Spanned {
    fn loc(&self) -> SourceLoc;
}

/// Implements [`ExprNode`] with the caret at the start of the range.
macro_rules! caret_at_start {
    ($($node:ty),* $(,)?) => {
        $(
            impl $crate::ast::expr::ExprNode for $node {
                fn loc(&self) -> $crate::span::SourceLoc {
                    $crate::span::Spanned::start_loc(self)
                }
            }
        )*
    };
}

/// Declares a kind that shares its record with sibling kinds.
macro_rules! shared_record {
    ($(#[$meta:meta])* $name:ident($record:ident)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a>(pub $record<'a>);

        impl<'a> ::std::ops::Deref for $name<'a> {
            type Target = $record<'a>;

            fn deref(&self) -> &$record<'a> {
                &self.0
            }
        }
    };
}

pub(crate) use {caret_at_start, shared_record};

/// Type-checking state of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Unresolved,
    Resolved(Type<'a>),
}

impl<'a> Resolution<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        match self {
            Resolution::Unresolved => None,
            Resolution::Resolved(ty) => Some(ty),
        }
    }
}

/// An expression node.
#[derive(Debug)]
pub struct Expr<'a> {
    kind: ExprKind<'a>,
    resolution: Cell<Resolution<'a>>,
}

impl<'a> Expr<'a> {
    /// Allocates an unresolved node.
    pub fn new<N: ExprVariant<'a>>(ctx: &'a AstContext, node: N) -> &'a Expr<'a> {
        Self::alloc(ctx, node.into_kind(), Resolution::Unresolved)
    }

    /// Allocates a node whose type is already known.
    pub fn with_type<N: ExprVariant<'a>>(ctx: &'a AstContext, node: N, ty: Type<'a>) -> &'a Expr<'a> {
        Self::alloc(ctx, node.into_kind(), Resolution::Resolved(ty))
    }

    pub(crate) fn with_optional_type<N: ExprVariant<'a>>(
        ctx: &'a AstContext,
        node: N,
        ty: Option<Type<'a>>,
    ) -> &'a Expr<'a> {
        let resolution = ty.map_or(Resolution::Unresolved, Resolution::Resolved);
        Self::alloc(ctx, node.into_kind(), resolution)
    }

    fn alloc(ctx: &'a AstContext, kind: ExprKind<'a>, resolution: Resolution<'a>) -> &'a Expr<'a> {
        ctx.alloc(Expr {
            kind,
            resolution: Cell::new(resolution),
        })
    }

    pub fn kind(&self) -> &ExprKind<'a> {
        &self.kind
    }

    pub fn tag(&self) -> ExprTag {
        self.kind.tag()
    }

    pub fn resolution(&self) -> Resolution<'a> {
        self.resolution.get()
    }

    /// The resolved type, if type checking has reached this node.
    pub fn ty(&self) -> Option<Type<'a>> {
        self.resolution.get().ty()
    }

    /// Records the node's resolved type.
    ///
    /// # Panics
    ///
    /// Panics if the node already has a type.
    pub fn set_type(&self, ty: Type<'a>) {
        if let Resolution::Resolved(_) = self.resolution.get() {
            panic!("resolved type written twice on a {}", self.tag().name());
        }
        self.resolution.set(Resolution::Resolved(ty));
    }

    /// Narrows to the record of kind `N`.
    pub fn cast<N: ExprVariant<'a>>(&'a self) -> Option<Node<'a, N>> {
        N::narrow(&self.kind).map(|node| Node::new(self, node))
    }

    pub fn is<N: ExprVariant<'a>>(&self) -> bool {
        self.tag() == N::TAG
    }

    /// Looks through parentheses to the node that carries the meaning.
    pub fn semantics_providing_expr(&'a self) -> &'a Expr<'a> {
        let mut expr = self;
        while let ExprKind::Paren(paren) = &expr.kind {
            expr = paren.sub;
        }
        expr
    }

    /// Looks through wrappers to the node that produces the value.
    pub fn value_providing_expr(&'a self) -> &'a Expr<'a> {
        self.semantics_providing_expr()
    }

    /// Returns `true` for nodes the compiler synthesized: references with no
    /// location, and implicit conversions wrapped around such nodes.
    pub fn is_implicit(&self) -> bool {
        if let ExprKind::DeclRef(decl_ref) = &self.kind {
            return !decl_ref.loc.is_valid();
        }
        self.as_implicit_conversion().is_some_and(|conversion| conversion.sub.is_implicit())
    }

    /// The function/argument pair of call-like kinds.
    pub fn as_apply(&self) -> Option<&ApplyExpr<'a>> {
        match &self.kind {
            ExprKind::Call(e) => Some(&e.0),
            ExprKind::Unary(e) => Some(&e.0),
            ExprKind::Binary(e) => Some(&e.0),
            ExprKind::ConstructorCall(e) => Some(&e.0),
            ExprKind::DotSyntaxCall(e) => Some(&e.apply),
            _ => None,
        }
    }

    pub fn as_implicit_conversion(&self) -> Option<&ImplicitConversion<'a>> {
        match &self.kind {
            ExprKind::LookThroughOneof(e) => Some(&e.0),
            ExprKind::ParameterRename(e) => Some(&e.0),
            ExprKind::ScalarToTuple(e) => Some(&e.0),
            ExprKind::Load(e) => Some(&e.0),
            ExprKind::Materialize(e) => Some(&e.0),
            ExprKind::Requalify(e) => Some(&e.0),
            _ => None,
        }
    }

    /// Views still-overloaded references as one candidate set.
    pub fn as_overload_set(&'a self) -> Option<OverloadSet<'a>> {
        if let Some(node) = self.cast::<OverloadedDeclRefExpr>() {
            return Some(OverloadSet::Decl(node));
        }
        self.cast::<OverloadedMemberRefExpr>().map(OverloadSet::Member)
    }

    /// Writes the tree rooted here, starting at column `indent`.
    pub fn print(&'a self, ctx: &AstContext, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        self.accept(&mut ExprPrinter::new(ctx, out, indent))
    }

    /// Returns a [`fmt::Display`] adapter for the tree rooted here.
    pub fn display<'c>(&'a self, ctx: &'c AstContext) -> DisplayExpr<'c, 'a> {
        DisplayExpr { expr: self, ctx }
    }

    /// Prints the tree to stderr.
    pub fn dump(&'a self, ctx: &AstContext) {
        eprintln!("{}", self.display(ctx));
    }
}

impl Spanned for Expr<'_> {
    fn source_range(&self) -> SourceRange {
        self.kind.node_range()
    }
}

impl ExprNode for Expr<'_> {
    fn loc(&self) -> SourceLoc {
        self.kind.node_loc()
    }
}

pub struct DisplayExpr<'c, 'a> {
    expr: &'a Expr<'a>,
    ctx: &'c AstContext,
}

impl fmt::Display for DisplayExpr<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.print(self.ctx, f, 0)
    }
}

/// A node narrowed to its kind's record.
///
/// Dereferences to the record; [`Node::expr`] recovers the header.
pub struct Node<'a, N> {
    expr: &'a Expr<'a>,
    node: &'a N,
}

impl<'a, N> Node<'a, N> {
    pub(crate) fn new(expr: &'a Expr<'a>, node: &'a N) -> Self {
        Node { expr, node }
    }

    pub fn expr(&self) -> &'a Expr<'a> {
        self.expr
    }

    pub fn node(&self) -> &'a N {
        self.node
    }

    pub fn ty(&self) -> Option<Type<'a>> {
        self.expr.ty()
    }
}

impl<N> Clone for Node<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Node<'_, N> {}

impl<N> Deref for Node<'_, N> {
    type Target = N;

    fn deref(&self) -> &N {
        self.node
    }
}

impl<N: fmt::Debug> fmt::Debug for Node<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::decl::{ValueDecl, ValueDeclKind};

    fn loc(offset: u32) -> SourceLoc {
        SourceLoc::new(offset)
    }

    #[test]
    fn test_cast_and_is() {
        let ctx = AstContext::new();
        let module = Expr::new(&ctx, ModuleExpr { loc: loc(0) });

        assert!(module.is::<ModuleExpr>());
        assert!(!module.is::<ErrorExpr>());
        assert_eq!(module.cast::<ModuleExpr>().unwrap().loc, loc(0));
        assert!(module.cast::<ParenExpr>().is_none());
        assert_eq!(module.tag(), ExprTag::Module);
    }

    #[test]
    fn test_single_write_resolution() {
        let ctx = AstContext::new();
        let literal = IntegerLiteralExpr::create(&ctx, "7", loc(0));
        assert_eq!(literal.resolution(), Resolution::Unresolved);

        let int = ctx.builtin_integer_type(32);
        literal.set_type(int);
        assert_eq!(literal.ty(), Some(int));
    }

    #[test]
    #[should_panic(expected = "resolved type written twice on a integer_literal_expr")]
    fn test_second_resolution_panics() {
        let ctx = AstContext::new();
        let literal = IntegerLiteralExpr::create(&ctx, "7", loc(0));
        literal.set_type(ctx.builtin_integer_type(32));
        literal.set_type(ctx.builtin_integer_type(64));
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn test_typed_construction_counts_as_write() {
        let ctx = AstContext::new();
        let module = Expr::with_type(&ctx, ModuleExpr { loc: loc(0) }, ctx.module_type("m"));
        module.set_type(ctx.error_type());
    }

    #[test]
    fn test_semantics_providing_expr_unwraps_nested_parens() {
        let ctx = AstContext::new();
        let inner = IntegerLiteralExpr::create(&ctx, "5", loc(2));
        let once = Expr::new(&ctx, ParenExpr { lparen: loc(1), sub: inner, rparen: loc(3) });
        let twice = Expr::new(&ctx, ParenExpr { lparen: loc(0), sub: once, rparen: loc(4) });

        assert!(std::ptr::eq(twice.semantics_providing_expr(), inner));
        assert!(std::ptr::eq(twice.value_providing_expr(), inner));
        assert!(std::ptr::eq(inner.semantics_providing_expr(), inner));
    }

    #[test]
    fn test_is_implicit() {
        let ctx = AstContext::new();
        let decl = ValueDecl::new(ValueDeclKind::Var, ctx.intern("x"), loc(0)).alloc(&ctx);
        let written = DeclRefExpr::create(&ctx, decl, loc(5));
        let synthesized = DeclRefExpr::create(&ctx, decl, SourceLoc::INVALID);

        assert!(!written.is_implicit());
        assert!(synthesized.is_implicit());

        let load = Expr::new(&ctx, LoadExpr(ImplicitConversion { sub: synthesized }));
        let nested = Expr::new(&ctx, MaterializeExpr(ImplicitConversion { sub: load }));
        assert!(load.is_implicit());
        assert!(nested.is_implicit());

        let visible_load = Expr::new(&ctx, LoadExpr(ImplicitConversion { sub: written }));
        assert!(!visible_load.is_implicit());

        let paren = Expr::new(&ctx, ParenExpr { lparen: loc(0), sub: synthesized, rparen: loc(1) });
        assert!(!paren.is_implicit());
    }

    #[test]
    fn test_family_views() {
        let ctx = AstContext::new();
        let func = UnresolvedDeclRefExpr::create(&ctx, "f", loc(0));
        let arg = IntegerLiteralExpr::create(&ctx, "1", loc(2));
        let call = Expr::new(&ctx, CallExpr(ApplyExpr { func, arg }));

        let apply = call.as_apply().unwrap();
        assert!(std::ptr::eq(apply.func, func));
        assert!(std::ptr::eq(apply.arg, arg));
        assert!(call.as_implicit_conversion().is_none());
        assert!(call.as_overload_set().is_none());

        let load = Expr::new(&ctx, LoadExpr(ImplicitConversion { sub: arg }));
        assert!(std::ptr::eq(load.as_implicit_conversion().unwrap().sub, arg));
        assert!(load.as_apply().is_none());
    }

    #[test]
    fn test_node_exposes_header() {
        let ctx = AstContext::new();
        let int = ctx.builtin_integer_type(8);
        let literal = Expr::with_type(&ctx, IntegerLiteralExpr { text: "3", loc: loc(0) }, int);
        let node = literal.cast::<IntegerLiteralExpr>().unwrap();

        assert!(std::ptr::eq(node.expr(), literal));
        assert_eq!(node.ty(), Some(int));
        assert_eq!(node.text, "3");
    }
}
