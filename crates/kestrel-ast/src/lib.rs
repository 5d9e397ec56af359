//! Kestrel AST: the expression tree of the Kestrel compiler frontend.
//!
//! Every node, type and declaration of a compilation unit lives in the arena
//! owned by an [`AstContext`]. Nodes refer to each other through plain
//! references that borrow the context, so the whole tree is freed at once when
//! the context is dropped.
//!
//! # Modules
//!
//! - [`ast`] - Expression nodes and the declarations, statements and patterns they reference
//! - [`types`] - Arena-allocated semantic types
//! - [`span`] - Source locations and ranges
//! - [`value`] - Literal values derived from source text
//! - [`printer`] - The S-expression tree dumper
//! - [`config`] - Context configuration and its environment overrides
//! - [`error`] - Literal evaluation errors
//!
//! # Example
//!
//! ```
//! use kestrel_ast::ast::expr::{IntegerLiteralExpr, OverloadedDeclRefExpr};
//! use kestrel_ast::{AstContext, SourceLoc, Spanned, ValueDecl, ValueDeclKind};
//!
//! let ctx = AstContext::new();
//! let int = ctx.builtin_integer_type(32);
//! let x = ValueDecl::new(ValueDeclKind::Var, ctx.intern("x"), SourceLoc::new(0))
//!     .with_type(int)
//!     .alloc(&ctx);
//!
//! // A single lookup candidate collapses to a plain reference.
//! let reference = OverloadedDeclRefExpr::create_with_copy(&ctx, &[x], SourceLoc::new(10));
//! assert_eq!(reference.ty(), Some(int));
//! assert_eq!(reference.start_loc(), SourceLoc::new(10));
//!
//! let literal = IntegerLiteralExpr::create(&ctx, "0b101", SourceLoc::new(14));
//! literal.set_type(int);
//! assert_eq!(literal.display(&ctx).to_string(), "(integer_literal_expr type='Builtin.Int32' value=5)");
//! ```

pub mod ast;
pub mod config;
pub mod context;
pub mod error;
pub mod printer;
pub mod span;
pub mod types;
pub mod value;

pub use ast::{Expr, ExprKind, ExprNode, ExprTag, ValueDecl, ValueDeclKind};
pub use config::AstConfig;
pub use context::AstContext;
pub use error::{LiteralError, LiteralResult};
pub use span::{SourceLoc, SourceRange, Spanned};
pub use types::{Type, TypeBase};
