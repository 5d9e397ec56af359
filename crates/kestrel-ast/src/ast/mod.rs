//! AST nodes for the Kestrel frontend.
//!
//! # Modules
//!
//! - [`expr`] - Expression nodes, narrowing, visitation and resolution collapse
//! - [`decl`] - Value declarations referenced by expressions
//! - [`stmt`] - Brace statements
//! - [`pat`] - Parameter patterns

pub mod decl;
pub mod expr;
pub mod pat;
pub mod stmt;

// Re-exports for convenience
pub use decl::{ValueDecl, ValueDeclKind};
pub use expr::{Expr, ExprKind, ExprNode, ExprTag, ExprVisitor, Node, Resolution};
pub use pat::Pattern;
pub use stmt::{BraceElement, BraceStmt};
