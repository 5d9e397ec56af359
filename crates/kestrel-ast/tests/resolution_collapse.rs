//! Collapse of lookup candidate lists into the simplest node.

use kestrel_ast::ast::expr::*;
use kestrel_ast::types::Type;
use kestrel_ast::{AstContext, SourceLoc, ValueDecl, ValueDeclKind};

fn loc(offset: u32) -> SourceLoc {
    SourceLoc::new(offset)
}

fn decl<'a>(ctx: &'a AstContext, kind: ValueDeclKind<'a>, name: &str, ty: Type<'a>) -> &'a ValueDecl<'a> {
    ValueDecl::new(kind, ctx.intern(name), loc(0)).with_type(ty).alloc(ctx)
}

fn instance<'a>(ctx: &'a AstContext, kind: ValueDeclKind<'a>, name: &str, ty: Type<'a>) -> &'a ValueDecl<'a> {
    ValueDecl::new(kind, ctx.intern(name), loc(0)).with_type(ty).instance_member().alloc(ctx)
}

fn base_of<'a>(ctx: &'a AstContext, ty: Type<'a>) -> &'a Expr<'a> {
    Expr::with_type(ctx, ModuleExpr { loc: loc(0) }, ty)
}

#[test]
fn test_instance_var_keeps_base_identity() {
    let ctx = AstContext::new();
    let point = ctx.nominal_type("Point");
    let int = ctx.builtin_integer_type(64);
    let x = instance(&ctx, ValueDeclKind::Var, "x", int);
    let base = base_of(&ctx, point);

    let expr = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &[x], loc(2));
    let member = expr.cast::<MemberRefExpr>().expect("collapses to a member ref");

    assert!(std::ptr::eq(member.base, base));
    assert!(std::ptr::eq(member.decl, x));
    assert_eq!(member.dot_loc, loc(1));
    assert_eq!(expr.ty(), Some(int));
}

#[test]
fn test_instance_func_becomes_dot_syntax_call() {
    let ctx = AstContext::new();
    let point = ctx.nominal_type("Point");
    let unit = ctx.tuple_type(&[]);
    let method_ty = ctx.function_type(point, ctx.function_type(unit, unit));
    let norm = instance(&ctx, ValueDeclKind::Func, "norm", method_ty);
    let base = base_of(&ctx, point);

    let expr = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &[norm], loc(2));
    let call = expr.cast::<DotSyntaxCallExpr>().expect("collapses to a dot-syntax call");

    assert!(std::ptr::eq(call.base(), base));
    assert_eq!(call.dot_loc, loc(1));
    assert_eq!(expr.ty(), None);

    let callee = call.apply.func.cast::<DeclRefExpr>().unwrap();
    assert!(std::ptr::eq(callee.decl, norm));
    assert_eq!(callee.loc, loc(2));
    assert!(std::ptr::eq(call.apply.called_value().unwrap(), norm));
}

#[test]
fn test_metatype_base_is_ignored() {
    let ctx = AstContext::new();
    let point = ctx.nominal_type("Point");
    let ctor_ty = ctx.function_type(ctx.tuple_type(&[]), point);
    let make = instance(&ctx, ValueDeclKind::Func, "make", ctor_ty);
    let base = base_of(&ctx, ctx.metatype(point));

    let expr = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &[make], loc(2));
    let ignored = expr.cast::<DotSyntaxBaseIgnoredExpr>().expect("base is only a qualifier");

    assert!(std::ptr::eq(ignored.lhs, base));
    assert_eq!(expr.ty(), Some(ctor_ty));
    assert!(ignored.rhs.is::<DeclRefExpr>());
}

#[test]
fn test_static_member_ignores_value_base() {
    let ctx = AstContext::new();
    let int = ctx.builtin_integer_type(32);
    let element = decl(&ctx, ValueDeclKind::OneOfElement, "red", int);
    let base = base_of(&ctx, ctx.nominal_type("Color"));

    let expr = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &[element], loc(2));
    assert_eq!(expr.tag(), ExprTag::DotSyntaxBaseIgnored);
}

#[test]
fn test_unresolved_base_counts_as_value() {
    let ctx = AstContext::new();
    let int = ctx.builtin_integer_type(32);
    let field = instance(&ctx, ValueDeclKind::Var, "f", int);
    let base = UnresolvedDeclRefExpr::create(&ctx, "p", loc(0));

    let expr = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &[field], loc(2));
    assert_eq!(expr.tag(), ExprTag::MemberRef);
}

#[test]
fn test_candidates_are_copied_in_order() {
    let ctx = AstContext::new();
    let int = ctx.builtin_integer_type(32);
    let mut candidates = vec![
        decl(&ctx, ValueDeclKind::Func, "f", int),
        decl(&ctx, ValueDeclKind::Func, "f", int),
        decl(&ctx, ValueDeclKind::Func, "f", int),
    ];
    let snapshot = candidates.clone();

    let expr = OverloadedDeclRefExpr::create_with_copy(&ctx, &candidates, loc(5));
    let overloaded = expr.cast::<OverloadedDeclRefExpr>().unwrap();

    assert_eq!(overloaded.decls.len(), 3);
    assert_ne!(overloaded.decls.as_ptr(), candidates.as_ptr());
    assert!(expr.ty().unwrap().is_dependent());

    let other = decl(&ctx, ValueDeclKind::Var, "g", int);
    candidates[0] = other;
    candidates.swap(1, 2);
    candidates.push(other);

    assert_eq!(overloaded.decls.len(), 3);
    for (copied, original) in overloaded.decls.iter().zip(&snapshot) {
        assert!(std::ptr::eq(*copied, *original));
    }
    assert!(!overloaded.decls.iter().any(|d| std::ptr::eq(*d, other)));
}

#[test]
fn test_overloaded_members_stay_overloaded() {
    let ctx = AstContext::new();
    let int = ctx.builtin_integer_type(32);
    let point = ctx.nominal_type("Point");
    let decls = [
        instance(&ctx, ValueDeclKind::Func, "m", int),
        instance(&ctx, ValueDeclKind::Func, "m", int),
    ];
    let base = base_of(&ctx, point);

    let expr = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &decls, loc(2));
    let set = expr.as_overload_set().expect("still overloaded");

    assert!(std::ptr::eq(set.expr(), expr));
    assert_eq!(set.decls().len(), 2);
    assert_eq!(set.base_type(), Some(point));
}

#[test]
fn test_filtered_overload_set() {
    let ctx = AstContext::new();
    let int = ctx.builtin_integer_type(32);
    let point = ctx.nominal_type("Point");
    let decls = [
        instance(&ctx, ValueDeclKind::Var, "m", int),
        instance(&ctx, ValueDeclKind::Func, "m", int),
        instance(&ctx, ValueDeclKind::Func, "m", int),
    ];
    let base = base_of(&ctx, point);
    let set = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &decls, loc(2))
        .as_overload_set()
        .unwrap();

    let narrowed = set.create_filtered_with_copy(&ctx, &decls[1..]);
    assert_eq!(narrowed.as_overload_set().unwrap().decls().len(), 2);

    let single = set.create_filtered_with_copy(&ctx, &decls[..1]);
    let member = single.cast::<MemberRefExpr>().unwrap();
    assert!(std::ptr::eq(member.base, base));
    assert_eq!(member.name_loc, loc(2));

    let bare = OverloadedDeclRefExpr::create_with_copy(&ctx, &decls, loc(9)).as_overload_set().unwrap();
    assert_eq!(bare.base_type(), None);
    let reference = bare.create_filtered_with_copy(&ctx, &decls[2..]);
    assert_eq!(reference.cast::<DeclRefExpr>().unwrap().loc, loc(9));
}

#[test]
fn test_metatype_base_has_no_base_type() {
    let ctx = AstContext::new();
    let int = ctx.builtin_integer_type(32);
    let decls = [decl(&ctx, ValueDeclKind::Func, "m", int), decl(&ctx, ValueDeclKind::Func, "m", int)];
    let base = base_of(&ctx, ctx.metatype(ctx.nominal_type("Point")));

    let expr = OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &decls, loc(2));
    assert_eq!(expr.as_overload_set().unwrap().base_type(), None);
}

#[test]
fn test_subscript_collapse() {
    let ctx = AstContext::new();
    let int = ctx.builtin_integer_type(32);
    let kind = ValueDeclKind::Subscript { element_type: int };
    let base = base_of(&ctx, ctx.nominal_type("Array"));
    let index = IntegerLiteralExpr::create(&ctx, "0", loc(2));

    let one = decl(&ctx, kind, "subscript", int);
    let single = OverloadedSubscriptExpr::create_with_copy(&ctx, base, &[one], loc(1), index, loc(3));
    assert!(std::ptr::eq(single.cast::<SubscriptExpr>().unwrap().decl.unwrap(), one));
    assert_eq!(single.ty(), Some(int));

    let two = [one, decl(&ctx, kind, "subscript", int)];
    let overloaded = OverloadedSubscriptExpr::create_with_copy(&ctx, base, &two, loc(1), index, loc(3));
    let node = overloaded.cast::<OverloadedSubscriptExpr>().unwrap();
    assert_eq!(node.decls.len(), 2);
    assert!(overloaded.ty().unwrap().is_dependent());
}

#[test]
#[should_panic(expected = "empty list of decls")]
fn test_empty_decl_list_panics() {
    let ctx = AstContext::new();
    OverloadedDeclRefExpr::create_with_copy(&ctx, &[], loc(0));
}

#[test]
#[should_panic(expected = "no decls")]
fn test_empty_member_list_panics() {
    let ctx = AstContext::new();
    let base = base_of(&ctx, ctx.nominal_type("Point"));
    OverloadedMemberRefExpr::create_with_copy(&ctx, base, loc(1), &[], loc(2));
}

#[test]
#[should_panic(expected = "no decls")]
fn test_empty_subscript_list_panics() {
    let ctx = AstContext::new();
    let base = base_of(&ctx, ctx.nominal_type("Array"));
    let index = IntegerLiteralExpr::create(&ctx, "0", loc(2));
    OverloadedSubscriptExpr::create_with_copy(&ctx, base, &[], loc(1), index, loc(3));
}
