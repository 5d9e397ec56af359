//! Recoverable errors raised while deriving literal values.
//!
//! Malformed source is never reported through these; it is represented by
//! [`ErrorExpr`](crate::ast::expr::ErrorExpr) nodes in the tree. A
//! `LiteralError` means a collaborator queried a literal too early or with a
//! type the literal cannot take.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The literal's type has not been resolved yet.
    #[error("literal has no resolved type; semantic analysis has not completed")]
    Unresolved,

    #[error("integer literal resolved to a {found}, not a builtin integer type")]
    NotBuiltinInteger {
        /// Description of the type it resolved to
        found: &'static str,
    },

    #[error("float literal resolved to a {found}, not a builtin float type")]
    NotBuiltinFloat {
        /// Description of the type it resolved to
        found: &'static str,
    },

    /// The stored text does not parse as a literal of the expected kind.
    #[error("invalid {kind} literal `{text}`")]
    InvalidText { kind: &'static str, text: String },
}

pub type LiteralResult<T> = Result<T, LiteralError>;
