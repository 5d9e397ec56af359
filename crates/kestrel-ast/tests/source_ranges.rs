//! Range and caret checks across every expression kind.

mod common;

use common::{loc, sample, SINGLE_TOKEN};
use kestrel_ast::ast::expr::*;
use kestrel_ast::{AstContext, ExprNode, SourceRange, Spanned, ValueDecl, ValueDeclKind};

/// Kinds whose caret is not the start of their range, with the caret offset.
const CARETS: &[(ExprTag, u32)] = &[
    (ExprTag::MemberRef, 20),
    (ExprTag::UnresolvedDot, 12),
    (ExprTag::Binary, 15),
    (ExprTag::DotSyntaxCall, 12),
    (ExprTag::Subscript, 12),
    (ExprTag::OverloadedSubscript, 12),
];

#[test]
fn test_every_kind_has_a_valid_range() {
    let ctx = AstContext::new();

    for &tag in ExprTag::ALL.iter().filter(|tag| !SINGLE_TOKEN.contains(tag)) {
        let expr = sample(&ctx, tag);
        assert_eq!(expr.tag(), tag);

        let range = expr.source_range();
        assert!(range.is_valid(), "{} has an invalid range", tag.name());
        assert_eq!(range, SourceRange::new(loc(10), loc(20)), "range of {}", tag.name());
        assert!(expr.start_loc() <= expr.end_loc());
    }
}

#[test]
fn test_caret_is_start_unless_overridden() {
    let ctx = AstContext::new();

    for &tag in ExprTag::ALL.iter().filter(|tag| !SINGLE_TOKEN.contains(tag)) {
        let expr = sample(&ctx, tag);
        let expected = CARETS
            .iter()
            .find(|(overridden, _)| *overridden == tag)
            .map_or(expr.start_loc(), |&(_, offset)| loc(offset));
        assert_eq!(expr.loc(), expected, "caret of {}", tag.name());
    }
}

#[test]
fn test_single_token_kinds() {
    let ctx = AstContext::new();
    let decl = ValueDecl::new(ValueDeclKind::Func, ctx.intern("f"), loc(0)).alloc(&ctx);
    let at = loc(42);

    let exprs = [
        IntegerLiteralExpr::create(&ctx, "7", at),
        FloatLiteralExpr::create(&ctx, "2.5", at),
        Expr::new(&ctx, CharacterLiteralExpr { value: 'x' as u32, loc: at }),
        StringLiteralExpr::create(&ctx, "s", at),
        InterpolatedStringLiteralExpr::create(&ctx, at, &[StringLiteralExpr::create(&ctx, "a", loc(43))]),
        DeclRefExpr::create(&ctx, decl, at),
        OverloadedDeclRefExpr::create_with_copy(&ctx, &[decl, decl], at),
        UnresolvedDeclRefExpr::create(&ctx, "y", at),
        Expr::new(&ctx, ModuleExpr { loc: at }),
    ];

    let tags: Vec<ExprTag> = exprs.iter().map(|e| e.tag()).collect();
    assert_eq!(tags, SINGLE_TOKEN);
    for expr in exprs {
        assert_eq!(expr.source_range(), SourceRange::point(at), "range of {}", expr.tag().name());
        assert_eq!(expr.loc(), at);
    }

    for &tag in SINGLE_TOKEN {
        assert_eq!(sample(&ctx, tag).source_range(), SourceRange::point(loc(10)), "range of {}", tag.name());
    }
}

#[test]
fn test_unresolved_dot_without_base_starts_at_dot() {
    let ctx = AstContext::new();
    let dot = Expr::new(
        &ctx,
        UnresolvedDotExpr {
            base: None,
            dot_loc: loc(3),
            name: ctx.intern("x"),
            name_loc: loc(4),
        },
    );

    assert_eq!(dot.source_range(), SourceRange::new(loc(3), loc(4)));
}
