//! Type projector.
//!
//! Computes, per member, the types the generated spy stores: argument log
//! element types, handler argument and output types, and the public
//! signatures of the trait impl. Three rules apply to every slot:
//!
//! - a type mentioning one of the method's own generic parameters is
//!   erased in log and handler positions (`LocalErased` on plain spies,
//!   `Erased` on locked ones, `ErasedReturn` for returns), while the public
//!   signature keeps the generic type;
//! - a type naming an associated type is substituted with its alias (the
//!   declared default, or `Erased` without one) everywhere;
//! - anything else is used verbatim, except that logs own their values
//!   (`&str` is logged as `String`, `Option<&T>` as `Option<T::Owned>`),
//!   `Self` in storage means the spy type,
//!   and stored lifetimes are `'static`.

use crate::extract::{mentions_generic, optional_reference};
use crate::model::{
    AssociatedTypeDeclaration, InterfaceDeclaration, MemberKind, MethodMember, Parameter,
    PropertyMember, SubscriptMember,
};
use crate::strategy::{select_shape, ConcurrencyShape};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::visit_mut::{self, VisitMut};
use syn::{parse_quote, GenericArgument, Lifetime, Signature, Type, TypeReference};

/// Path of the universal dynamic type, as spliced into generated code.
pub fn erased_type() -> Type {
    parse_quote!(::spygen::runtime::Erased)
}

/// The shared wrapper erased arguments are logged and passed as.
pub fn erased_argument_type(shape: ConcurrencyShape) -> Type {
    if shape.is_locked() {
        erased_type()
    } else {
        parse_quote!(::spygen::runtime::LocalErased)
    }
}

/// The owned wrapper handlers of generic returns produce.
pub fn erased_return_type() -> Type {
    parse_quote!(::spygen::runtime::ErasedReturn)
}

#[derive(Debug, Clone)]
pub struct AssociatedBinding {
    pub name: Ident,
    pub alias: Type,
    /// No default was declared, so the alias is `Erased`.
    pub erased: bool,
}

impl AssociatedBinding {
    fn of(declaration: &AssociatedTypeDeclaration) -> Self {
        match &declaration.default {
            Some(default) => Self {
                name: declaration.name.clone(),
                alias: default.clone(),
                erased: false,
            },
            None => Self {
                name: declaration.name.clone(),
                alias: erased_type(),
                erased: true,
            },
        }
    }
}

/// How an argument becomes an owned log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Cloned.
    Owned,
    /// `&T`, logged as `T::Owned`.
    Borrowed,
    /// `Option<&T>`, logged as `Option<T::Owned>`.
    OptionalBorrow,
}

impl Ownership {
    fn of(ty: &Type) -> Self {
        match ty {
            Type::Reference(_) => Self::Borrowed,
            _ if optional_reference(ty).is_some() => Self::OptionalBorrow,
            _ => Self::Owned,
        }
    }

    fn owned(self, binding: &Ident) -> TokenStream {
        match self {
            Self::Owned => quote!(::std::clone::Clone::clone(&#binding)),
            Self::Borrowed => quote!(::std::borrow::ToOwned::to_owned(&*#binding)),
            Self::OptionalBorrow => quote!(#binding.map(::std::borrow::ToOwned::to_owned)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArgumentProjection {
    pub binding: Ident,
    /// Declared type after associated-type substitution.
    pub declared: Type,
    pub log_type: Type,
    pub handler_type: Type,
    /// The erased wrapper the argument is converted into, if any.
    pub erased: Option<Type>,
    pub ownership: Ownership,
}

impl ArgumentProjection {
    /// Rebinds an erased argument as its wrapper, before any bookkeeping.
    pub fn erase_stmt(&self) -> Option<TokenStream> {
        let wrapper = self.erased.as_ref()?;
        let binding = &self.binding;
        let value = match self.ownership {
            Ownership::Owned => quote!(#binding),
            ownership => ownership.owned(binding),
        };
        Some(quote!(let #binding = #wrapper::new(#value);))
    }

    /// Expression producing the owned log value without consuming `binding`.
    ///
    /// Erased arguments are already rebound by [`Self::erase_stmt`]; their
    /// log entry shares the wrapper passed to the handler.
    pub fn log_expr(&self, binding: &Ident) -> TokenStream {
        if self.erased.is_some() {
            quote!(::std::clone::Clone::clone(&#binding))
        } else {
            self.ownership.owned(binding)
        }
    }

    /// Expression passing the argument to the handler.
    pub fn handler_expr(&self, binding: &Ident) -> TokenStream {
        quote!(#binding)
    }
}

#[derive(Debug, Clone)]
pub enum ReturnProjection {
    Unit,
    Value(Type),
    /// The handler yields `ErasedReturn`; the body downcasts to `declared`.
    Erased { declared: Type },
}

impl ReturnProjection {
    pub fn handler_output(&self) -> Option<Type> {
        match self {
            Self::Unit => None,
            Self::Value(ty) => Some(ty.clone()),
            Self::Erased { .. } => Some(erased_return_type()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MethodProjection {
    pub signature: Signature,
    pub arguments: Vec<ArgumentProjection>,
    /// Element of the invocation log; `None` for parameterless methods.
    pub log_type: Option<Type>,
    pub returns: ReturnProjection,
    pub may_wait: bool,
}

#[derive(Debug, Clone)]
pub struct PropertyProjection {
    pub getter: Signature,
    pub setter: Option<Signature>,
    pub value_type: Type,
}

#[derive(Debug, Clone)]
pub struct SubscriptProjection {
    pub getter: Signature,
    pub setter: Option<Signature>,
    pub indices: Vec<ArgumentProjection>,
    /// A single index type, or the tuple of all of them.
    pub key_type: Type,
    pub element_type: Type,
}

#[derive(Debug, Clone)]
pub enum MemberProjection {
    Method(MethodProjection),
    Property(PropertyProjection),
    Subscript(SubscriptProjection),
}

#[derive(Debug, Clone)]
pub struct Projection {
    pub members: Vec<MemberProjection>,
    pub associated: Vec<AssociatedBinding>,
}

/// Projects every member of a declaration.
pub fn project(declaration: &InterfaceDeclaration) -> Projection {
    let associated: Vec<AssociatedBinding> = declaration
        .associated_types
        .iter()
        .map(AssociatedBinding::of)
        .collect();
    let projector = Projector {
        associated: &associated,
        spy: declaration.spy_ident(),
        erased: erased_argument_type(select_shape(&declaration.markers)),
    };

    let members = declaration
        .members
        .iter()
        .map(|member| match &member.kind {
            MemberKind::Method(method) => MemberProjection::Method(projector.method(method)),
            MemberKind::Property(property) => {
                MemberProjection::Property(projector.property(property))
            }
            MemberKind::Subscript(subscript) => {
                MemberProjection::Subscript(projector.subscript(subscript))
            }
        })
        .collect();

    Projection {
        members,
        associated,
    }
}

struct Projector<'a> {
    associated: &'a [AssociatedBinding],
    spy: Ident,
    erased: Type,
}

impl Projector<'_> {
    fn substitute_type(&self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        AssociatedSubstitution(self.associated).visit_type_mut(&mut ty);
        ty
    }

    fn substitute_signature(&self, signature: &Signature) -> Signature {
        let mut signature = signature.clone();
        AssociatedSubstitution(self.associated).visit_signature_mut(&mut signature);
        signature
    }

    fn storage(&self, ty: &Type, lifetimes: LifetimeMode) -> Type {
        let mut ty = ty.clone();
        SelfToSpy(&self.spy).visit_type_mut(&mut ty);
        LifetimeRewrite(lifetimes).visit_type_mut(&mut ty);
        ty
    }

    fn argument(&self, parameter: &Parameter) -> ArgumentProjection {
        let declared = self.substitute_type(&parameter.ty);
        let ownership = Ownership::of(&declared);

        let (log_type, handler_type, erased) = if parameter.generic_reference {
            (self.erased.clone(), self.erased.clone(), Some(self.erased.clone()))
        } else {
            (
                self.storage(&owned_type(&declared), LifetimeMode::Static),
                self.storage(&declared, LifetimeMode::Elide),
                None,
            )
        };

        ArgumentProjection {
            binding: parameter.binding.clone(),
            declared,
            log_type,
            handler_type,
            erased,
            ownership,
        }
    }

    fn method(&self, method: &MethodMember) -> MethodProjection {
        let arguments: Vec<ArgumentProjection> =
            method.parameters.iter().map(|p| self.argument(p)).collect();

        let returns = match &method.return_type {
            None => ReturnProjection::Unit,
            Some(ty) => {
                let declared = self.substitute_type(ty);
                if mentions_generic(&declared, &method.generic_params) {
                    ReturnProjection::Erased { declared }
                } else {
                    ReturnProjection::Value(self.storage(&declared, LifetimeMode::Static))
                }
            }
        };

        MethodProjection {
            signature: self.substitute_signature(&method.signature),
            log_type: log_element(arguments.iter().map(|argument| &argument.log_type)),
            arguments,
            returns,
            may_wait: method.effects.may_wait,
        }
    }

    fn property(&self, property: &PropertyMember) -> PropertyProjection {
        PropertyProjection {
            getter: self.substitute_signature(&property.getter.signature),
            setter: property
                .setter
                .as_ref()
                .map(|setter| self.substitute_signature(&setter.signature)),
            value_type: self.storage(&self.substitute_type(&property.ty), LifetimeMode::Static),
        }
    }

    fn subscript(&self, subscript: &SubscriptMember) -> SubscriptProjection {
        let indices: Vec<ArgumentProjection> =
            subscript.indices.iter().map(|p| self.argument(p)).collect();
        let key_type = log_element(indices.iter().map(|index| &index.log_type))
            .unwrap_or_else(|| parse_quote!(()));

        SubscriptProjection {
            getter: self.substitute_signature(&subscript.getter.signature),
            setter: subscript
                .setter
                .as_ref()
                .map(|setter| self.substitute_signature(&setter.signature)),
            indices,
            key_type,
            element_type: self.storage(
                &self.substitute_type(&subscript.element),
                LifetimeMode::Static,
            ),
        }
    }
}

/// Single type for one slot, a tuple for several, nothing for none.
fn log_element<'a>(types: impl Iterator<Item = &'a Type>) -> Option<Type> {
    let types: Vec<&Type> = types.collect();
    match types.as_slice() {
        [] => None,
        [single] => Some((*single).clone()),
        many => Some(parse_quote!((#(#many),*))),
    }
}

/// The owned counterpart of a reference type, or of an optional reference.
fn owned_type(ty: &Type) -> Type {
    if let Some(reference) = optional_reference(ty) {
        let owned = owned_type(&Type::Reference(reference.clone()));
        return parse_quote!(::std::option::Option<#owned>);
    }
    let Type::Reference(reference) = ty else {
        return ty.clone();
    };
    match &*reference.elem {
        Type::Path(path) if path.qself.is_none() && path.path.is_ident("str") => {
            parse_quote!(::std::string::String)
        }
        Type::Slice(slice) => {
            let elem = &slice.elem;
            parse_quote!(::std::vec::Vec<#elem>)
        }
        elem => parse_quote!(<#elem as ::std::borrow::ToOwned>::Owned),
    }
}

/// Replaces `Self::Name` and `<Self as Trait>::Name` with bound aliases.
struct AssociatedSubstitution<'a>(&'a [AssociatedBinding]);

impl AssociatedSubstitution<'_> {
    fn alias_for(&self, ty: &Type) -> Option<Type> {
        let Type::Path(type_path) = ty else {
            return None;
        };
        let segments = &type_path.path.segments;
        let name = match &type_path.qself {
            Some(qself) if is_bare_self(&qself.ty) && segments.len() == qself.position + 1 => {
                &segments.last()?.ident
            }
            None if segments.len() == 2 && segments[0].ident == "Self" => &segments[1].ident,
            _ => return None,
        };
        self.0
            .iter()
            .find(|binding| binding.name == *name)
            .map(|binding| binding.alias.clone())
    }
}

impl VisitMut for AssociatedSubstitution<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Some(alias) = self.alias_for(ty) {
            *ty = alias;
            return;
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

fn is_bare_self(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"))
}

/// Bare `Self` becomes the spy type in storage positions.
struct SelfToSpy<'a>(&'a Ident);

impl VisitMut for SelfToSpy<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if is_bare_self(ty) {
            let spy = self.0;
            *ty = parse_quote!(#spy);
            return;
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifetimeMode {
    /// Owned storage: every lifetime becomes `'static`.
    Static,
    /// Handler arguments: references are elided so the handler is higher-ranked.
    Elide,
}

struct LifetimeRewrite(LifetimeMode);

impl VisitMut for LifetimeRewrite {
    fn visit_type_reference_mut(&mut self, reference: &mut TypeReference) {
        let is_static = reference
            .lifetime
            .as_ref()
            .is_some_and(|lifetime| lifetime.ident == "static");
        match self.0 {
            LifetimeMode::Static => reference.lifetime = Some(static_lifetime()),
            LifetimeMode::Elide if !is_static => reference.lifetime = None,
            LifetimeMode::Elide => {}
        }
        visit_mut::visit_type_reference_mut(self, reference);
    }

    fn visit_generic_argument_mut(&mut self, argument: &mut GenericArgument) {
        if let GenericArgument::Lifetime(lifetime) = argument {
            if lifetime.ident != "static" {
                *lifetime = match self.0 {
                    LifetimeMode::Static => static_lifetime(),
                    LifetimeMode::Elide => Lifetime::new("'_", Span::call_site()),
                };
            }
            return;
        }
        visit_mut::visit_generic_argument_mut(self, argument);
    }
}

fn static_lifetime() -> Lifetime {
    Lifetime::new("'static", Span::call_site())
}
