//! Name references, resolved and overloaded.
//!
//! The overloaded kinds are the input of resolution collapse: each
//! `create_with_copy` constructor takes the ordered candidate list produced
//! by name lookup and builds the simplest node that represents it.

use kestrel_log::trace;
use kestrel_mem::Symbol;

use super::{DotSyntaxBaseIgnoredExpr, DotSyntaxCallExpr, Expr, ExprNode, Node, caret_at_start};
use crate::ast::decl::{ValueDecl, ValueDeclKind};
use crate::context::AstContext;
use crate::span::{SourceLoc, SourceRange, Spanned};
use crate::types::Type;

/// A reference to a single resolved declaration.
#[derive(Debug, Clone, Copy)]
pub struct DeclRefExpr<'a> {
    pub decl: &'a ValueDecl<'a>,
    pub loc: SourceLoc,
}

impl<'a> DeclRefExpr<'a> {
    /// Allocates a reference typed with the declaration's reference type,
    /// if it has one yet.
    pub fn create(ctx: &'a AstContext, decl: &'a ValueDecl<'a>, loc: SourceLoc) -> &'a Expr<'a> {
        Expr::with_optional_type(ctx, DeclRefExpr { decl, loc }, decl.type_of_reference())
    }
}

impl Spanned for DeclRefExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

/// A bare name that lookup found several declarations for.
#[derive(Debug, Clone, Copy)]
pub struct OverloadedDeclRefExpr<'a> {
    /// Candidates in lookup order.
    pub decls: &'a [&'a ValueDecl<'a>],
    pub loc: SourceLoc,
}

impl<'a> OverloadedDeclRefExpr<'a> {
    /// Builds a [`DeclRefExpr`] for a single candidate, or an overloaded
    /// reference owning an arena copy of `decls`.
    ///
    /// # Panics
    ///
    /// Panics if `decls` is empty.
    pub fn create_with_copy(
        ctx: &'a AstContext,
        decls: &[&'a ValueDecl<'a>],
        loc: SourceLoc,
    ) -> &'a Expr<'a> {
        assert!(!decls.is_empty(), "cannot create a decl ref with an empty list of decls");

        if let &[decl] = decls {
            trace!("decl ref at {} collapses to its single candidate", loc);
            return DeclRefExpr::create(ctx, decl, loc);
        }

        trace!("decl ref at {} stays overloaded over {} candidates", loc, decls.len());
        let decls = ctx.allocate_copy(decls);
        Expr::with_type(ctx, OverloadedDeclRefExpr { decls, loc }, ctx.dependent_type())
    }
}

impl Spanned for OverloadedDeclRefExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

/// `base.name` where lookup found several members.
#[derive(Debug, Clone, Copy)]
pub struct OverloadedMemberRefExpr<'a> {
    pub base: &'a Expr<'a>,
    pub dot_loc: SourceLoc,
    /// Candidates in lookup order.
    pub decls: &'a [&'a ValueDecl<'a>],
    pub member_loc: SourceLoc,
}

impl<'a> OverloadedMemberRefExpr<'a> {
    /// Builds the node for `base.member` given the member candidates.
    ///
    /// With one candidate the access is desugared:
    ///
    /// - an instance method on a value base becomes a [`DotSyntaxCallExpr`]
    ///   applying the method reference to `base`;
    /// - an instance variable on a value base becomes a [`MemberRefExpr`]
    ///   holding `base` itself;
    /// - anything reached through a metatype base, or any non-instance
    ///   member, becomes a [`DotSyntaxBaseIgnoredExpr`].
    ///
    /// With several candidates the list is copied into the arena and the
    /// overloaded node is returned, typed as dependent.
    ///
    /// # Panics
    ///
    /// Panics if `decls` is empty, or if the single candidate is an instance
    /// member that is neither a function nor a variable.
    pub fn create_with_copy(
        ctx: &'a AstContext,
        base: &'a Expr<'a>,
        dot_loc: SourceLoc,
        decls: &[&'a ValueDecl<'a>],
        member_loc: SourceLoc,
    ) -> &'a Expr<'a> {
        assert!(!decls.is_empty(), "cannot create an overloaded member ref with no decls");

        if let &[decl] = decls {
            let base_is_metatype = base.ty().is_some_and(|ty| ty.is_metatype());

            if decl.is_instance_member() && !base_is_metatype {
                return match decl.kind() {
                    ValueDeclKind::Func => {
                        trace!("member ref at {} collapses to a dot-syntax call", member_loc);
                        let func = DeclRefExpr::create(ctx, decl, member_loc);
                        DotSyntaxCallExpr::create(ctx, func, dot_loc, base)
                    }
                    ValueDeclKind::Var => {
                        trace!("member ref at {} collapses to a member ref", member_loc);
                        MemberRefExpr::create(ctx, base, dot_loc, decl, member_loc)
                    }
                    other => panic!("instance member of kind `{}` cannot be referenced", other.name()),
                };
            }

            trace!("member ref at {} ignores its base", member_loc);
            let func = DeclRefExpr::create(ctx, decl, member_loc);
            return DotSyntaxBaseIgnoredExpr::create(ctx, base, dot_loc, func);
        }

        trace!("member ref at {} stays overloaded over {} candidates", member_loc, decls.len());
        let decls = ctx.allocate_copy(decls);
        Expr::with_type(
            ctx,
            OverloadedMemberRefExpr {
                base,
                dot_loc,
                decls,
                member_loc,
            },
            ctx.dependent_type(),
        )
    }
}

impl Spanned for OverloadedMemberRefExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.base.start_loc(), self.member_loc)
    }
}

/// A name lookup has not run on yet.
#[derive(Debug, Clone, Copy)]
pub struct UnresolvedDeclRefExpr {
    pub name: Symbol,
    pub loc: SourceLoc,
}

impl UnresolvedDeclRefExpr {
    pub fn create<'a>(ctx: &'a AstContext, name: &str, loc: SourceLoc) -> &'a Expr<'a> {
        Expr::new(ctx, UnresolvedDeclRefExpr { name: ctx.intern(name), loc })
    }
}

impl Spanned for UnresolvedDeclRefExpr {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

/// `base.field` resolved to a stored variable.
#[derive(Debug, Clone, Copy)]
pub struct MemberRefExpr<'a> {
    pub base: &'a Expr<'a>,
    pub dot_loc: SourceLoc,
    pub decl: &'a ValueDecl<'a>,
    pub name_loc: SourceLoc,
}

impl<'a> MemberRefExpr<'a> {
    /// Allocates the reference, typed with the variable's reference type.
    pub fn create(
        ctx: &'a AstContext,
        base: &'a Expr<'a>,
        dot_loc: SourceLoc,
        decl: &'a ValueDecl<'a>,
        name_loc: SourceLoc,
    ) -> &'a Expr<'a> {
        let node = MemberRefExpr {
            base,
            dot_loc,
            decl,
            name_loc,
        };
        Expr::with_optional_type(ctx, node, decl.type_of_reference())
    }
}

impl Spanned for MemberRefExpr<'_> {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.base.start_loc(), self.name_loc)
    }
}

impl ExprNode for MemberRefExpr<'_> {
    fn loc(&self) -> SourceLoc {
        self.name_loc
    }
}

/// `.name` with an implied base, such as a oneof element.
#[derive(Debug, Clone, Copy)]
pub struct UnresolvedMemberExpr {
    pub dot_loc: SourceLoc,
    pub name: Symbol,
    pub name_loc: SourceLoc,
}

impl Spanned for UnresolvedMemberExpr {
    fn source_range(&self) -> SourceRange {
        SourceRange::new(self.dot_loc, self.name_loc)
    }
}

/// `base.name` before member lookup. The base is absent for a leading dot.
#[derive(Debug, Clone, Copy)]
pub struct UnresolvedDotExpr<'a> {
    pub base: Option<&'a Expr<'a>>,
    pub dot_loc: SourceLoc,
    pub name: Symbol,
    pub name_loc: SourceLoc,
}

impl Spanned for UnresolvedDotExpr<'_> {
    fn source_range(&self) -> SourceRange {
        let start = self.base.map_or(self.dot_loc, |base| base.start_loc());
        SourceRange::new(start, self.name_loc)
    }
}

impl ExprNode for UnresolvedDotExpr<'_> {
    fn loc(&self) -> SourceLoc {
        self.dot_loc
    }
}

/// A reference to an imported module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleExpr {
    pub loc: SourceLoc,
}

impl Spanned for ModuleExpr {
    fn source_range(&self) -> SourceRange {
        SourceRange::point(self.loc)
    }
}

caret_at_start!(
    DeclRefExpr<'_>,
    OverloadedDeclRefExpr<'_>,
    OverloadedMemberRefExpr<'_>,
    UnresolvedDeclRefExpr,
    UnresolvedMemberExpr,
    ModuleExpr,
);

/// A still-overloaded reference, bare or member.
#[derive(Debug, Clone, Copy)]
pub enum OverloadSet<'a> {
    Decl(Node<'a, OverloadedDeclRefExpr<'a>>),
    Member(Node<'a, OverloadedMemberRefExpr<'a>>),
}

impl<'a> OverloadSet<'a> {
    pub fn expr(&self) -> &'a Expr<'a> {
        match self {
            OverloadSet::Decl(node) => node.expr(),
            OverloadSet::Member(node) => node.expr(),
        }
    }

    pub fn decls(&self) -> &'a [&'a ValueDecl<'a>] {
        match self {
            OverloadSet::Decl(node) => node.node().decls,
            OverloadSet::Member(node) => node.node().decls,
        }
    }

    /// The type of the value the members are looked up on.
    ///
    /// Bare references have no base. A metatype base does not count either,
    /// since the member is then effectively static.
    pub fn base_type(&self) -> Option<Type<'a>> {
        match self {
            OverloadSet::Decl(_) => None,
            OverloadSet::Member(node) => node.base.ty().filter(|ty| !ty.is_metatype()),
        }
    }

    /// Rebuilds the reference over a narrowed candidate list, keeping its
    /// base and locations.
    ///
    /// # Panics
    ///
    /// Panics if `decls` is empty.
    pub fn create_filtered_with_copy(&self, ctx: &'a AstContext, decls: &[&'a ValueDecl<'a>]) -> &'a Expr<'a> {
        match self {
            OverloadSet::Decl(node) => OverloadedDeclRefExpr::create_with_copy(ctx, decls, node.loc),
            OverloadSet::Member(node) => {
                OverloadedMemberRefExpr::create_with_copy(ctx, node.base, node.dot_loc, decls, node.member_loc)
            }
        }
    }
}
