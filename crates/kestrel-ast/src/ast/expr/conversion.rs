//! Conversions inserted by the type checker.

use super::{Expr, caret_at_start, shared_record};
use crate::span::{SourceLoc, SourceRange, Spanned};

/// The record shared by every implicit conversion: the converted child.
///
/// The conversion's destination type is the node's resolved type.
#[derive(Debug, Clone, Copy)]
pub struct ImplicitConversion<'a> {
    pub sub: &'a Expr<'a>,
}

impl Spanned for ImplicitConversion<'_> {
    fn source_range(&self) -> SourceRange {
        self.sub.source_range()
    }
}

shared_record!(
    /// Views a oneof value with a single element as that element.
    LookThroughOneofExpr(ImplicitConversion)
);

shared_record!(
    /// Converts between tuple types that differ only in element labels.
    ParameterRenameExpr(ImplicitConversion)
);

shared_record!(
    /// Wraps a scalar into a one-element tuple.
    ScalarToTupleExpr(ImplicitConversion)
);

shared_record!(
    /// Reads the value out of an lvalue.
    LoadExpr(ImplicitConversion)
);

shared_record!(
    /// Spills an rvalue into a temporary so it can be used as an lvalue.
    MaterializeExpr(ImplicitConversion)
);

shared_record!(
    /// Changes the qualification of an lvalue.
    RequalifyExpr(ImplicitConversion)
);

macro_rules! conversion_spans {
    ($($node:ident),*) => {
        $(
            impl Spanned for $node<'_> {
                fn source_range(&self) -> SourceRange {
                    self.0.source_range()
                }
            }
        )*
    };
}

conversion_spans!(
    LookThroughOneofExpr,
    ParameterRenameExpr,
    ScalarToTupleExpr,
    LoadExpr,
    MaterializeExpr,
    RequalifyExpr
);

/// `&sub`, passing an lvalue by reference.
#[derive(Debug, Clone, Copy)]
pub struct AddressOfExpr<'a> {
    pub amp_loc: SourceLoc,
    pub sub: &'a Expr<'a>,
}

impl Spanned for AddressOfExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.amp_loc, self.sub.end_loc())
    }
}

caret_at_start!(
    LookThroughOneofExpr<'_>,
    ParameterRenameExpr<'_>,
    ScalarToTupleExpr<'_>,
    LoadExpr<'_>,
    MaterializeExpr<'_>,
    RequalifyExpr<'_>,
    AddressOfExpr<'_>,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::IntegerLiteralExpr;
    use crate::ast::expr::ExprNode;
    use crate::context::AstContext;

    #[test]
    fn test_conversion_spans_its_child() {
        let ctx = AstContext::new();
        let literal = IntegerLiteralExpr::create(&ctx, "1", SourceLoc::new(12));
        let tuple = Expr::new(&ctx, ScalarToTupleExpr(ImplicitConversion { sub: literal }));

        assert_eq!(tuple.source_range(), literal.source_range());
        assert_eq!(tuple.loc(), SourceLoc::new(12));
        assert!(std::ptr::eq(tuple.cast::<ScalarToTupleExpr>().unwrap().sub, literal));
    }

    #[test]
    fn test_address_of_range() {
        let ctx = AstContext::new();
        let literal = IntegerLiteralExpr::create(&ctx, "1", SourceLoc::new(5));
        let address = Expr::new(
            &ctx,
            AddressOfExpr {
                amp_loc: SourceLoc::new(4),
                sub: literal,
            },
        );

        assert_eq!(address.source_range(), SourceRange::new(SourceLoc::new(4), SourceLoc::new(5)));
    }
}
