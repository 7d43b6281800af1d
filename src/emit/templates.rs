//! Per-member templates, selected by (template, shape).

use super::accessors;
use super::methods;
use super::naming::MemberIdents;
use super::storage::Storage;
use crate::model::{MemberDeclaration, MemberKind};
use crate::project::{MemberProjection, ReturnProjection};
use crate::strategy::ConcurrencyShape;
use proc_macro2::{Ident, TokenStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Template {
    UnitMethod,
    ReturningMethod,
    GetOnlyProperty,
    GetSetProperty,
    OptionalProperty,
    Subscript,
}

impl Template {
    pub fn of(member: &MemberDeclaration, projection: &MemberProjection) -> Self {
        match (&member.kind, projection) {
            (MemberKind::Property(property), _) if property.optional => Self::OptionalProperty,
            (MemberKind::Property(property), _) if property.setter.is_some() => {
                Self::GetSetProperty
            }
            (MemberKind::Property(_), _) => Self::GetOnlyProperty,
            (MemberKind::Subscript(_), _) => Self::Subscript,
            (MemberKind::Method(_), MemberProjection::Method(method))
                if matches!(method.returns, ReturnProjection::Unit) =>
            {
                Self::UnitMethod
            }
            (MemberKind::Method(_), _) => Self::ReturningMethod,
        }
    }
}

/// Everything one member contributes to the generated type.
#[derive(Debug, Default)]
pub(crate) struct GeneratedMemberSet {
    /// Field declarations, in the spy (`Plain`) or its state aggregate.
    pub fields: Vec<TokenStream>,
    /// Items of the trait impl.
    pub impl_items: Vec<TokenStream>,
    /// Test-facing inherent methods.
    pub accessors: Vec<TokenStream>,
    /// Statements restoring the member's initial state.
    pub reset: Vec<TokenStream>,
}

pub(crate) struct MemberContext<'a> {
    pub spy: &'a Ident,
    pub member: &'a MemberDeclaration,
    pub projection: &'a MemberProjection,
    pub idents: MemberIdents<'a>,
    pub shape: ConcurrencyShape,
}

impl MemberContext<'_> {
    pub fn storage(&self) -> Storage {
        Storage::for_shape(self.shape)
    }

    /// Spy type name as reported by runtime panics.
    pub fn owner(&self) -> String {
        self.spy.to_string()
    }
}

pub(crate) fn emit_member(ctx: &MemberContext<'_>) -> GeneratedMemberSet {
    let template = Template::of(ctx.member, ctx.projection);
    match (&ctx.member.kind, ctx.projection) {
        (MemberKind::Method(_), MemberProjection::Method(method)) => {
            methods::method(ctx, method, template)
        }
        (MemberKind::Property(property), MemberProjection::Property(projected)) => {
            accessors::property(ctx, property, projected, template)
        }
        (MemberKind::Subscript(subscript), MemberProjection::Subscript(projected)) => {
            accessors::subscript(ctx, subscript, projected)
        }
        _ => GeneratedMemberSet::default(),
    }
}
