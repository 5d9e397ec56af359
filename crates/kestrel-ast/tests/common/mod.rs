// Shared fixtures for the integration tests.
//
// `sample` builds one node of every kind. Multi-token kinds span `[10, 20]`;
// single-token kinds sit at offset 10.

#![allow(dead_code)]

use kestrel_ast::ast::expr::*;
use kestrel_ast::ast::{BraceStmt, Pattern};
use kestrel_ast::{AstContext, SourceLoc, SourceRange, ValueDecl, ValueDeclKind};

pub fn loc(offset: u32) -> SourceLoc {
    SourceLoc::new(offset)
}

pub fn int<'a>(ctx: &'a AstContext, offset: u32) -> &'a Expr<'a> {
    IntegerLiteralExpr::create(ctx, "1", loc(offset))
}

/// Kinds that cover exactly one token.
pub const SINGLE_TOKEN: &[ExprTag] = &[
    ExprTag::IntegerLiteral,
    ExprTag::FloatLiteral,
    ExprTag::CharacterLiteral,
    ExprTag::StringLiteral,
    ExprTag::InterpolatedStringLiteral,
    ExprTag::DeclRef,
    ExprTag::OverloadedDeclRef,
    ExprTag::UnresolvedDeclRef,
    ExprTag::Module,
];

/// Builds a node of kind `tag`.
pub fn sample<'a>(ctx: &'a AstContext, tag: ExprTag) -> &'a Expr<'a> {
    let var = ValueDecl::new(ValueDeclKind::Var, ctx.intern("v"), loc(0)).alloc(ctx);
    let name = ctx.intern("m");
    let at = |offset: u32| int(ctx, offset);
    let ic = |sub: &'a Expr<'a>| ImplicitConversion { sub };
    let apply = ApplyExpr { func: at(10), arg: at(20) };
    let element = TupleElement {
        base: at(10),
        dot_loc: loc(12),
        field_number: 0,
        name_loc: loc(20),
    };

    match tag {
        ExprTag::Error => Expr::new(ctx, ErrorExpr { range: SourceRange::new(loc(10), loc(20)) }),
        ExprTag::IntegerLiteral => at(10),
        ExprTag::FloatLiteral => FloatLiteralExpr::create(ctx, "2.5", loc(10)),
        ExprTag::CharacterLiteral => Expr::new(ctx, CharacterLiteralExpr { value: 'x' as u32, loc: loc(10) }),
        ExprTag::StringLiteral => StringLiteralExpr::create(ctx, "s", loc(10)),
        ExprTag::InterpolatedStringLiteral => {
            InterpolatedStringLiteralExpr::create(ctx, loc(10), &[StringLiteralExpr::create(ctx, "a", loc(11))])
        }
        ExprTag::DeclRef => DeclRefExpr::create(ctx, var, loc(10)),
        ExprTag::OverloadedDeclRef => OverloadedDeclRefExpr::create_with_copy(ctx, &[var, var], loc(10)),
        ExprTag::UnresolvedDeclRef => UnresolvedDeclRefExpr::create(ctx, "y", loc(10)),
        ExprTag::Module => Expr::new(ctx, ModuleExpr { loc: loc(10) }),
        ExprTag::OverloadedMemberRef => Expr::new(
            ctx,
            OverloadedMemberRefExpr {
                base: at(10),
                dot_loc: loc(12),
                decls: ctx.allocate_copy(&[var, var]),
                member_loc: loc(20),
            },
        ),
        ExprTag::MemberRef => MemberRefExpr::create(ctx, at(10), loc(12), var, loc(20)),
        ExprTag::UnresolvedMember => Expr::new(
            ctx,
            UnresolvedMemberExpr {
                dot_loc: loc(10),
                name,
                name_loc: loc(20),
            },
        ),
        ExprTag::Paren => Expr::new(ctx, ParenExpr { lparen: loc(10), sub: at(15), rparen: loc(20) }),
        ExprTag::Tuple => TupleExpr::create(ctx, loc(10), &[Some(at(15)), None], loc(20)),
        ExprTag::Subscript => Expr::new(
            ctx,
            SubscriptExpr {
                decl: None,
                base: at(10),
                brackets: SourceRange::new(loc(12), loc(20)),
                index: at(14),
            },
        ),
        ExprTag::OverloadedSubscript => Expr::new(
            ctx,
            OverloadedSubscriptExpr {
                base: at(10),
                decls: ctx.allocate_copy(&[var, var]),
                brackets: SourceRange::new(loc(12), loc(20)),
                index: at(14),
            },
        ),
        ExprTag::UnresolvedDot => Expr::new(
            ctx,
            UnresolvedDotExpr {
                base: Some(at(10)),
                dot_loc: loc(12),
                name,
                name_loc: loc(20),
            },
        ),
        ExprTag::SyntacticTupleElement => Expr::new(ctx, SyntacticTupleElementExpr(element)),
        ExprTag::ImplicitThisTupleElement => Expr::new(ctx, ImplicitThisTupleElementExpr(element)),
        ExprTag::TupleShuffle => {
            let sub = TupleExpr::create(ctx, loc(10), &[Some(at(12)), Some(at(15))], loc(20));
            TupleShuffleExpr::create(ctx, sub, &[1, 0], ctx.tuple_type(&[]))
        }
        ExprTag::LookThroughOneof => Expr::new(ctx, LookThroughOneofExpr(ic(sample(ctx, ExprTag::Paren)))),
        ExprTag::ParameterRename => Expr::new(ctx, ParameterRenameExpr(ic(sample(ctx, ExprTag::Paren)))),
        ExprTag::ScalarToTuple => Expr::new(ctx, ScalarToTupleExpr(ic(sample(ctx, ExprTag::Paren)))),
        ExprTag::Load => Expr::new(ctx, LoadExpr(ic(sample(ctx, ExprTag::Paren)))),
        ExprTag::Materialize => Expr::new(ctx, MaterializeExpr(ic(sample(ctx, ExprTag::Paren)))),
        ExprTag::Requalify => Expr::new(ctx, RequalifyExpr(ic(sample(ctx, ExprTag::Paren)))),
        ExprTag::AddressOf => Expr::new(ctx, AddressOfExpr { amp_loc: loc(10), sub: at(20) }),
        ExprTag::Sequence => SequenceExpr::create(ctx, &[at(10), at(15), at(20)]),
        ExprTag::Func => {
            let param: &Pattern = ctx.alloc(Pattern::Any { loc: loc(14) });
            let body = BraceStmt::create(ctx, loc(16), &[], loc(20));
            FuncExpr::create(ctx, loc(10), &[param], None, body)
        }
        ExprTag::ExplicitClosure => Expr::new(
            ctx,
            ExplicitClosureExpr {
                lbrace: loc(10),
                body: at(15),
                rbrace: loc(20),
            },
        ),
        ExprTag::ImplicitClosure => Expr::new(ctx, ImplicitClosureExpr { body: sample(ctx, ExprTag::Paren) }),
        ExprTag::NewArray => NewArrayExpr::create(
            ctx,
            loc(10),
            ctx.builtin_integer_type(8),
            &[Bound {
                value: Some(at(17)),
                brackets: SourceRange::new(loc(16), loc(20)),
            }],
        ),
        ExprTag::Call => Expr::new(ctx, CallExpr(apply)),
        ExprTag::Unary => Expr::new(ctx, UnaryExpr(apply)),
        ExprTag::Binary => {
            let operands = TupleExpr::create(ctx, SourceLoc::INVALID, &[Some(at(10)), Some(at(20))], SourceLoc::INVALID);
            let op = UnresolvedDeclRefExpr::create(ctx, "+", loc(15));
            Expr::new(ctx, BinaryExpr(ApplyExpr { func: op, arg: operands }))
        }
        ExprTag::ConstructorCall => Expr::new(ctx, ConstructorCallExpr(apply)),
        ExprTag::DotSyntaxCall => DotSyntaxCallExpr::create(ctx, at(20), loc(12), at(10)),
        ExprTag::DotSyntaxBaseIgnored => DotSyntaxBaseIgnoredExpr::create(ctx, at(10), loc(12), at(20)),
        ExprTag::Coerce => Expr::new(ctx, CoerceExpr { lhs: at(10), rhs: at(20) }),
    }
}
