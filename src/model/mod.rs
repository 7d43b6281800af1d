//! Structural model of a trait declaration, produced by the extractor.
//!
//! The model is created once per expansion and discarded afterwards. It
//! keeps `syn` types where the emitter needs to re-render them, and carries
//! the `#[cfg]` region tree that lets the emitter reproduce conditional
//! compilation around generated members.

mod regions;

pub use regions::{CfgPredicate, RegionNode, RegionTree};

use proc_macro2::Ident;
use quote::format_ident;
use serde::Serialize;
use syn::ext::IdentExt;
use syn::{Attribute, Path, Signature, Type, TypeParamBound, Visibility};

/// Visibility tier of the trait, mirrored by the generated spy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    Public,
    Crate,
    Restricted,
    Private,
}

impl AccessTier {
    pub fn of(visibility: &Visibility) -> Self {
        match visibility {
            Visibility::Public(_) => Self::Public,
            Visibility::Restricted(restricted) if restricted.path.is_ident("crate") => Self::Crate,
            Visibility::Restricted(_) => Self::Restricted,
            Visibility::Inherited => Self::Private,
        }
    }
}

/// Cross-cutting requirement declared as a supertrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityMarker {
    /// `Send` and/or `Sync`.
    ThreadSafeValue,
    /// A supertrait named `Isolated`.
    IsolatedUnit,
}

#[derive(Debug, Clone)]
pub struct InterfaceDeclaration {
    pub name: Ident,
    pub visibility: Visibility,
    pub access: AccessTier,
    pub is_unsafe: bool,
    pub members: Vec<MemberDeclaration>,
    pub regions: RegionTree,
    /// Markers in declaration order; the strategy selector resolves them.
    pub markers: Vec<CapabilityMarker>,
    pub isolation_marker: Option<Path>,
    pub associated_types: Vec<AssociatedTypeDeclaration>,
    /// An `#[async_trait]`-style attribute that must be replayed on the impl.
    pub async_attribute: Option<Attribute>,
    pub debug_supertrait: bool,
}

impl InterfaceDeclaration {
    pub fn spy_ident(&self) -> Ident {
        format_ident!("{}Spy", self.name.unraw())
    }

    pub fn state_ident(&self) -> Ident {
        format_ident!("{}SpyState", self.name.unraw())
    }

    pub fn associated_type(&self, name: &Ident) -> Option<&AssociatedTypeDeclaration> {
        self.associated_types.iter().find(|assoc| assoc.name == *name)
    }
}

#[derive(Debug, Clone)]
pub struct MemberDeclaration {
    pub kind: MemberKind,
    /// Enclosing `#[cfg(..)]` predicates, outermost first.
    pub cfg: Vec<CfgPredicate>,
}

#[derive(Debug, Clone)]
pub enum MemberKind {
    Method(MethodMember),
    Property(PropertyMember),
    Subscript(SubscriptMember),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKindTag {
    Method,
    Property,
    Subscript,
}

impl MemberDeclaration {
    pub fn tag(&self) -> MemberKindTag {
        match self.kind {
            MemberKind::Method(_) => MemberKindTag::Method,
            MemberKind::Property(_) => MemberKindTag::Property,
            MemberKind::Subscript(_) => MemberKindTag::Subscript,
        }
    }

    /// Name of the trait item that introduced the member.
    pub fn declared_name(&self) -> &Ident {
        match &self.kind {
            MemberKind::Method(method) => &method.name,
            MemberKind::Property(property) => &property.name,
            MemberKind::Subscript(subscript) => &subscript.getter.signature.ident,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            MemberKind::Method(method) => &method.parameters,
            MemberKind::Property(_) => &[],
            MemberKind::Subscript(subscript) => &subscript.indices,
        }
    }

    pub fn return_type(&self) -> Option<&Type> {
        match &self.kind {
            MemberKind::Method(method) => method.return_type.as_ref(),
            MemberKind::Property(property) => Some(&property.ty),
            MemberKind::Subscript(subscript) => Some(&subscript.element),
        }
    }

    pub fn effects(&self) -> Effects {
        match &self.kind {
            MemberKind::Method(method) => method.effects,
            MemberKind::Property(_) | MemberKind::Subscript(_) => Effects::default(),
        }
    }
}

/// Effect modifiers of a method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Effects {
    /// Returns `Result<_, _>`.
    pub may_throw: bool,
    /// Declared `async`.
    pub may_wait: bool,
}

#[derive(Debug, Clone)]
pub struct MethodMember {
    pub name: Ident,
    /// Signature with every parameter pattern replaced by its binding.
    pub signature: Signature,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub effects: Effects,
    /// The method's own generic type and const parameter names.
    pub generic_params: Vec<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorSet {
    GetOnly,
    GetAndSet,
}

/// A getter (and optional setter) trait item after pattern normalization.
#[derive(Debug, Clone)]
pub struct Accessor {
    pub signature: Signature,
    /// Bindings of the non-receiver parameters, in order.
    pub bindings: Vec<Ident>,
    /// `#[cfg]` predicates the item carries beyond the member's own chain.
    pub cfg: Vec<CfgPredicate>,
}

#[derive(Debug, Clone)]
pub struct PropertyMember {
    pub name: Ident,
    pub ty: Type,
    pub accessors: AccessorSet,
    /// The declared type is `Option<_>`; the property itself is the stored state.
    pub optional: bool,
    pub getter: Accessor,
    pub setter: Option<Accessor>,
}

#[derive(Debug, Clone)]
pub struct SubscriptMember {
    pub indices: Vec<Parameter>,
    pub element: Type,
    pub accessors: AccessorSet,
    pub optional: bool,
    pub getter: Accessor,
    pub setter: Option<Accessor>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    /// `None` when the declaration suppressed the name (`_` or a destructuring pattern).
    pub label: Option<Ident>,
    /// Identifier used for the argument inside generated bodies.
    pub binding: Ident,
    pub ty: Type,
    /// The type mentions one of the method's own generic parameters.
    pub generic_reference: bool,
}

#[derive(Debug, Clone)]
pub struct AssociatedTypeDeclaration {
    pub name: Ident,
    pub default: Option<Type>,
    pub bounds: Vec<TypeParamBound>,
}
