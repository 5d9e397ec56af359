//! The closed table of expression kinds.
//!
//! Every kind is listed exactly once in the `expr_nodes!` invocation below.
//! From that one list the macro generates the [`ExprKind`] payload enum, the
//! [`ExprTag`] discriminant, range and caret dispatch, the [`ExprVariant`]
//! narrowing impls, and the [`ExprVisitor`] trait. Dispatch is a single
//! `match`; a kind whose node type lacks [`Spanned`] or [`ExprNode`] does not
//! compile, and neither does a visitor that misses a kind.

use super::*;
use crate::span::{SourceLoc, SourceRange, Spanned};

/// A node type that is the payload of exactly one [`ExprKind`] variant.
pub trait ExprVariant<'a>: ExprNode + Sized + 'a {
    const TAG: ExprTag;

    /// Returns the payload if `kind` is this variant.
    fn narrow<'e>(kind: &'e ExprKind<'a>) -> Option<&'e Self>;

    fn into_kind(self) -> ExprKind<'a>;
}

macro_rules! expr_nodes {
    ($lt:lifetime; $( $variant:ident($node:ty) => $name:literal, $visit:ident; )*) => {
        /// The payload of an expression: one variant per kind.
        #[derive(Debug, Clone, Copy)]
        pub enum ExprKind<$lt> {
            $( $variant($node), )*
        }

        /// Field-less discriminant of [`ExprKind`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ExprTag {
            $( $variant, )*
        }

        impl ExprTag {
            /// Every kind, in table order.
            pub const ALL: &'static [ExprTag] = &[ $( ExprTag::$variant, )* ];

            /// The name used in tree dumps.
            pub const fn name(self) -> &'static str {
                match self {
                    $( ExprTag::$variant => $name, )*
                }
            }
        }

        impl<$lt> ExprKind<$lt> {
            pub const fn tag(&self) -> ExprTag {
                match self {
                    $( ExprKind::$variant(_) => ExprTag::$variant, )*
                }
            }

            pub(crate) fn node_range(&self) -> SourceRange {
                match self {
                    $( ExprKind::$variant(node) => Spanned::source_range(node), )*
                }
            }

            pub(crate) fn node_loc(&self) -> SourceLoc {
                match self {
                    $( ExprKind::$variant(node) => ExprNode::loc(node), )*
                }
            }
        }

        $(
            impl<$lt> ExprVariant<$lt> for $node {
                const TAG: ExprTag = ExprTag::$variant;

                fn narrow<'e>(kind: &'e ExprKind<$lt>) -> Option<&'e Self> {
                    match kind {
                        ExprKind::$variant(node) => Some(node),
                        _ => None,
                    }
                }

                fn into_kind(self) -> ExprKind<$lt> {
                    ExprKind::$variant(self)
                }
            }
        )*

        /// A total traversal over the kind set: one method per kind.
        pub trait ExprVisitor<$lt> {
            type Output;

            $( fn $visit(&mut self, expr: Node<$lt, $node>) -> Self::Output; )*
        }

        impl<$lt> Expr<$lt> {
            /// Dispatches to the visitor method for this node's kind.
            pub fn accept<V: ExprVisitor<$lt>>(&$lt self, visitor: &mut V) -> V::Output {
                match &self.kind {
                    $( ExprKind::$variant(node) => visitor.$visit(Node::new(self, node)), )*
                }
            }
        }
    };
}

expr_nodes! {
    'a;
    Error(ErrorExpr) => "error_expr", visit_error;
    IntegerLiteral(IntegerLiteralExpr<'a>) => "integer_literal_expr", visit_integer_literal;
    FloatLiteral(FloatLiteralExpr<'a>) => "float_literal_expr", visit_float_literal;
    CharacterLiteral(CharacterLiteralExpr) => "character_literal_expr", visit_character_literal;
    StringLiteral(StringLiteralExpr<'a>) => "string_literal_expr", visit_string_literal;
    InterpolatedStringLiteral(InterpolatedStringLiteralExpr<'a>) => "interpolated_string_literal_expr", visit_interpolated_string_literal;
    DeclRef(DeclRefExpr<'a>) => "declref_expr", visit_decl_ref;
    OverloadedDeclRef(OverloadedDeclRefExpr<'a>) => "overloadeddeclref_expr", visit_overloaded_decl_ref;
    OverloadedMemberRef(OverloadedMemberRefExpr<'a>) => "overloadedmemberref_expr", visit_overloaded_member_ref;
    UnresolvedDeclRef(UnresolvedDeclRefExpr) => "unresolved_decl_ref_expr", visit_unresolved_decl_ref;
    MemberRef(MemberRefExpr<'a>) => "member_ref_expr", visit_member_ref;
    UnresolvedMember(UnresolvedMemberExpr) => "unresolved_member_expr", visit_unresolved_member;
    Paren(ParenExpr<'a>) => "paren_expr", visit_paren;
    Tuple(TupleExpr<'a>) => "tuple_expr", visit_tuple;
    Subscript(SubscriptExpr<'a>) => "subscript_expr", visit_subscript;
    OverloadedSubscript(OverloadedSubscriptExpr<'a>) => "overloaded_subscript_expr", visit_overloaded_subscript;
    UnresolvedDot(UnresolvedDotExpr<'a>) => "unresolved_dot_expr", visit_unresolved_dot;
    Module(ModuleExpr) => "module_expr", visit_module;
    SyntacticTupleElement(SyntacticTupleElementExpr<'a>) => "syntactic_tuple_element_expr", visit_syntactic_tuple_element;
    ImplicitThisTupleElement(ImplicitThisTupleElementExpr<'a>) => "implicit_this_tuple_element_expr", visit_implicit_this_tuple_element;
    TupleShuffle(TupleShuffleExpr<'a>) => "tuple_shuffle_expr", visit_tuple_shuffle;
    LookThroughOneof(LookThroughOneofExpr<'a>) => "look_through_oneof_expr", visit_look_through_oneof;
    ParameterRename(ParameterRenameExpr<'a>) => "parameter_rename_expr", visit_parameter_rename;
    ScalarToTuple(ScalarToTupleExpr<'a>) => "scalar_to_tuple_expr", visit_scalar_to_tuple;
    Load(LoadExpr<'a>) => "load_expr", visit_load;
    Materialize(MaterializeExpr<'a>) => "materialize_expr", visit_materialize;
    Requalify(RequalifyExpr<'a>) => "requalify_expr", visit_requalify;
    AddressOf(AddressOfExpr<'a>) => "address_of_expr", visit_address_of;
    Sequence(SequenceExpr<'a>) => "sequence_expr", visit_sequence;
    Func(FuncExpr<'a>) => "func_expr", visit_func;
    ExplicitClosure(ExplicitClosureExpr<'a>) => "explicit_closure_expr", visit_explicit_closure;
    ImplicitClosure(ImplicitClosureExpr<'a>) => "implicit_closure_expr", visit_implicit_closure;
    NewArray(NewArrayExpr<'a>) => "new_array_expr", visit_new_array;
    Call(CallExpr<'a>) => "call_expr", visit_call;
    Unary(UnaryExpr<'a>) => "unary_expr", visit_unary;
    Binary(BinaryExpr<'a>) => "binary_expr", visit_binary;
    ConstructorCall(ConstructorCallExpr<'a>) => "constructor_call_expr", visit_constructor_call;
    DotSyntaxCall(DotSyntaxCallExpr<'a>) => "dot_syntax_call_expr", visit_dot_syntax_call;
    DotSyntaxBaseIgnored(DotSyntaxBaseIgnoredExpr<'a>) => "dot_syntax_base_ignored", visit_dot_syntax_base_ignored;
    Coerce(CoerceExpr<'a>) => "coerce_expr", visit_coerce;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table_is_complete() {
        assert_eq!(ExprTag::ALL.len(), 40);

        let mut names: Vec<&str> = ExprTag::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 40, "dump names must be unique");
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(ExprTag::DeclRef.name(), "declref_expr");
        assert_eq!(ExprTag::DotSyntaxBaseIgnored.name(), "dot_syntax_base_ignored");
        assert_eq!(<ModuleExpr as ExprVariant<'_>>::TAG, ExprTag::Module);
    }
}
