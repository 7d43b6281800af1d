//! Member model extractor.
//!
//! Walks a trait declaration in source order and produces an
//! [`InterfaceDeclaration`]: methods, properties and subscripts with their
//! normalized signatures, associated types, capability markers and the
//! `#[cfg]` region tree. Unsupported constructs are collected as
//! diagnostics instead of producing broken output.

mod helpers;
mod signature;

pub use helpers::{is_helper_attribute, strip_helper_attributes};
pub(crate) use signature::{mentions_generic, optional_reference};

use crate::errors::{Diagnostic, Diagnostics, ErrorCode};
use crate::model::{
    Accessor, AccessorSet, AssociatedTypeDeclaration, CapabilityMarker, CfgPredicate,
    InterfaceDeclaration, MemberDeclaration, MemberKind, MethodMember, Parameter,
    PropertyMember, RegionTree, SubscriptMember,
};
use crate::strategy::select_shape;
use helpers::{cfg_chain, parse_helpers, ItemHelpers, MemberRole};
use signature::{
    borrowed_referent, borrows_non_static, contains_impl_trait, effects_of, erasure_bounds,
    generic_names, is_option, normalize_signature, return_type, same_type, unloggable_parameter,
};
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::{ItemTrait, TraitBoundModifier, TraitItem, TraitItemFn, Type, TypeParamBound};
use tracing::debug;

/// Extracts the structural model of a trait, or every problem found in it.
pub fn extract(item: &ItemTrait) -> Result<InterfaceDeclaration, Diagnostics> {
    let mut extractor = InterfaceExtractor::default();
    let declaration = extractor.extract(item);
    debug!(
        members = declaration.members.len(),
        associated_types = declaration.associated_types.len(),
        diagnostics = extractor.diagnostics.len(),
        "Extracted trait model"
    );
    extractor.diagnostics.finish(declaration)
}

#[derive(Default)]
struct InterfaceExtractor {
    diagnostics: Diagnostics,
    /// The spy will be locked, so erased arguments must cross threads.
    thread_safe: bool,
}

struct Supertraits {
    markers: Vec<CapabilityMarker>,
    isolation_marker: Option<syn::Path>,
    debug: bool,
}

/// A `fn` item together with its parsed helper keys.
struct FnCandidate<'a> {
    function: &'a TraitItemFn,
    helpers: ItemHelpers,
}

impl InterfaceExtractor {
    fn extract(&mut self, item: &ItemTrait) -> InterfaceDeclaration {
        if !item.generics.params.is_empty() {
            self.report(
                ErrorCode::UNSUPPORTED,
                &item.generics,
                "generic traits cannot be spied; declare associated types instead",
            );
        }

        let supertraits = self.classify_supertraits(item);
        self.thread_safe = select_shape(&supertraits.markers).is_locked();
        let associated_types = self.associated_types(item);
        let members = self.members(item);

        let mut regions = RegionTree::new();
        for (index, member) in members.iter().enumerate() {
            regions.insert(index, &member.cfg);
        }

        InterfaceDeclaration {
            name: item.ident.clone(),
            visibility: item.vis.clone(),
            access: crate::model::AccessTier::of(&item.vis),
            is_unsafe: item.unsafety.is_some(),
            members,
            regions,
            markers: supertraits.markers,
            isolation_marker: supertraits.isolation_marker,
            associated_types,
            async_attribute: item
                .attrs
                .iter()
                .find(|attr| {
                    attr.path()
                        .segments
                        .last()
                        .is_some_and(|segment| segment.ident == "async_trait")
                })
                .cloned(),
            debug_supertrait: supertraits.debug,
        }
    }

    fn report(&mut self, code: ErrorCode, tokens: impl quote::ToTokens, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::spanned(code, tokens, message));
    }

    fn classify_supertraits(&mut self, item: &ItemTrait) -> Supertraits {
        let mut supertraits = Supertraits {
            markers: Vec::new(),
            isolation_marker: None,
            debug: false,
        };

        for bound in &item.supertraits {
            let TypeParamBound::Trait(trait_bound) = bound else {
                continue;
            };
            if matches!(trait_bound.modifier, TraitBoundModifier::Maybe(_)) {
                continue;
            }
            let Some(last) = trait_bound.path.segments.last() else {
                continue;
            };

            match last.ident.to_string().as_str() {
                "Send" | "Sync" => {
                    if !supertraits.markers.contains(&CapabilityMarker::ThreadSafeValue) {
                        supertraits.markers.push(CapabilityMarker::ThreadSafeValue);
                    }
                }
                "Isolated" => {
                    supertraits.markers.push(CapabilityMarker::IsolatedUnit);
                    supertraits.isolation_marker = Some(trait_bound.path.clone());
                }
                "Debug" => supertraits.debug = true,
                other => self.report(
                    ErrorCode::UNSUPPORTED,
                    trait_bound,
                    format!(
                        "supertrait `{other}` cannot be implemented by a spy; supported supertraits are `Send`, `Sync`, `Debug` and `Isolated`"
                    ),
                ),
            }
        }

        supertraits
    }

    fn associated_types(&mut self, item: &ItemTrait) -> Vec<AssociatedTypeDeclaration> {
        let mut associated = Vec::new();

        for trait_item in &item.items {
            let TraitItem::Type(assoc) = trait_item else {
                continue;
            };
            if !assoc.generics.params.is_empty() {
                self.report(
                    ErrorCode::UNSUPPORTED,
                    &assoc.generics,
                    "generic associated types cannot be spied",
                );
                continue;
            }

            let helpers = parse_helpers(&assoc.attrs, &mut self.diagnostics);
            if helpers.role != MemberRole::Method {
                self.report(
                    ErrorCode::MALFORMED_ACCESSOR,
                    &assoc.ident,
                    "`property` and `subscript` apply to getter methods, not associated types",
                );
            }

            associated.push(AssociatedTypeDeclaration {
                name: assoc.ident.clone(),
                default: helpers
                    .default
                    .or_else(|| assoc.default.as_ref().map(|(_, ty)| ty.clone())),
                bounds: assoc.bounds.iter().cloned().collect(),
            });
        }

        associated
    }

    fn members(&mut self, item: &ItemTrait) -> Vec<MemberDeclaration> {
        let mut candidates = Vec::new();

        for trait_item in &item.items {
            match trait_item {
                TraitItem::Fn(function) => {
                    let helpers = parse_helpers(&function.attrs, &mut self.diagnostics);
                    if helpers.default.is_some() {
                        self.report(
                            ErrorCode::MALFORMED_ACCESSOR,
                            &function.sig.ident,
                            "`default` applies to associated types only",
                        );
                    }
                    candidates.push(FnCandidate { function, helpers });
                }
                TraitItem::Type(_) => {}
                TraitItem::Const(constant) => self.report(
                    ErrorCode::UNSUPPORTED,
                    &constant.ident,
                    "associated consts cannot be spied",
                ),
                TraitItem::Macro(mac) => self.report(
                    ErrorCode::UNSUPPORTED,
                    &mac.mac,
                    "macro invocations inside a spied trait cannot be expanded",
                ),
                other => self.report(
                    ErrorCode::UNSUPPORTED,
                    other,
                    "unsupported trait item",
                ),
            }
        }

        let setters = self.match_setters(&candidates);

        let mut members = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            if setters.values().any(|&setter| setter == index) {
                continue;
            }
            let setter = setters.get(&index).map(|&setter| candidates[setter].function);
            let cfg = cfg_chain(&candidate.function.attrs);
            let setter_cfg = match setter {
                Some(setter) => match self.setter_cfg(candidate.function, setter, &cfg) {
                    Some(extra) => extra,
                    None => continue,
                },
                None => Vec::new(),
            };

            let kind = match candidate.helpers.role {
                MemberRole::Method => self.method(candidate.function).map(MemberKind::Method),
                MemberRole::Property => self
                    .property(candidate.function, setter)
                    .map(MemberKind::Property),
                MemberRole::Subscript => self
                    .subscript(candidate.function, setter)
                    .map(MemberKind::Subscript),
            };

            if let Some(mut kind) = kind {
                if let Some(accessor) = setter_mut(&mut kind) {
                    accessor.cfg = setter_cfg;
                }
                members.push(MemberDeclaration { kind, cfg });
            }
        }

        members
    }

    /// The setter's `#[cfg]` predicates beyond the getter's chain.
    ///
    /// The setter exists in the trait only where its own chain holds, and
    /// its impl reuses the getter's storage, so its chain must include
    /// every predicate of the getter's.
    fn setter_cfg(
        &mut self,
        getter: &TraitItemFn,
        setter: &TraitItemFn,
        getter_cfg: &[CfgPredicate],
    ) -> Option<Vec<CfgPredicate>> {
        let setter_chain = cfg_chain(&setter.attrs);
        if let Some(missing) = getter_cfg
            .iter()
            .find(|predicate| !setter_chain.contains(predicate))
        {
            self.report(
                ErrorCode::MALFORMED_ACCESSOR,
                &setter.sig.ident,
                format!(
                    "setter `{}` must carry `#[cfg({missing})]` like its getter `{}`",
                    setter.sig.ident, getter.sig.ident
                ),
            );
            return None;
        }
        Some(
            setter_chain
                .into_iter()
                .filter(|predicate| !getter_cfg.contains(predicate))
                .collect(),
        )
    }

    /// Maps getter candidate index to the index of its `set_<getter>` candidate.
    fn match_setters(&mut self, candidates: &[FnCandidate<'_>]) -> HashMap<usize, usize> {
        let getters: HashMap<String, usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.helpers.role != MemberRole::Method)
            .map(|(index, candidate)| (candidate.function.sig.ident.unraw().to_string(), index))
            .collect();

        let mut setters = HashMap::new();
        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.helpers.role != MemberRole::Method {
                continue;
            }
            let name = candidate.function.sig.ident.unraw().to_string();
            let Some(getter) = name.strip_prefix("set_").and_then(|rest| getters.get(rest)) else {
                continue;
            };
            if setters.insert(*getter, index).is_some() {
                self.report(
                    ErrorCode::MALFORMED_ACCESSOR,
                    &candidate.function.sig.ident,
                    format!("`{name}` is declared more than once"),
                );
            }
        }
        setters
    }

    fn method(&mut self, function: &TraitItemFn) -> Option<MethodMember> {
        let sig = &function.sig;
        let mut supported = true;

        if sig.receiver().is_none() {
            self.report(
                ErrorCode::UNSUPPORTED,
                &sig.ident,
                format!(
                    "`{}` has no `self` receiver; associated functions cannot be spied",
                    sig.ident
                ),
            );
            supported = false;
        }

        for input in sig.inputs.iter() {
            if let syn::FnArg::Typed(pat_type) = input {
                if contains_impl_trait(&pat_type.ty) {
                    self.report(
                        ErrorCode::UNSUPPORTED,
                        &pat_type.ty,
                        "`impl Trait` parameters cannot be spied; use a named generic parameter",
                    );
                    supported = false;
                } else if let Some(reason) = unloggable_parameter(&pat_type.ty) {
                    self.report(ErrorCode::UNSUPPORTED, &pat_type.ty, reason);
                    supported = false;
                }
            }
        }

        let returned = return_type(&sig.output);
        if let Some(ty) = &returned {
            if contains_impl_trait(ty) {
                self.report(
                    ErrorCode::UNSUPPORTED,
                    ty,
                    "`impl Trait` return types cannot be spied",
                );
                supported = false;
            } else if borrows_non_static(ty) {
                self.report(
                    ErrorCode::UNSUPPORTED,
                    ty,
                    "methods returning borrowed data cannot be spied; return an owned value",
                );
                supported = false;
            }
        }

        if !supported {
            return None;
        }

        let generic_params = generic_names(&sig.generics);
        let (signature, parameters) = normalize_signature(sig, &generic_params);
        if !self.check_erasure(sig, &parameters, returned.as_ref()) {
            return None;
        }

        Some(MethodMember {
            name: sig.ident.clone(),
            effects: effects_of(sig),
            signature,
            parameters,
            return_type: returned,
            generic_params,
        })
    }

    /// Checks that every erased generic parameter can live in the spy's storage.
    fn check_erasure(
        &mut self,
        sig: &syn::Signature,
        parameters: &[Parameter],
        returned: Option<&Type>,
    ) -> bool {
        let mut valid = true;

        for param in sig.generics.type_params() {
            let name = std::slice::from_ref(&param.ident);
            let arguments: Vec<&Parameter> = parameters
                .iter()
                .filter(|parameter| mentions_generic(&parameter.ty, name))
                .collect();
            let in_return = returned.is_some_and(|ty| mentions_generic(ty, name));
            if arguments.is_empty() && !in_return {
                continue;
            }

            let bounds = erasure_bounds(&sig.generics, &param.ident);
            let ident = &param.ident;
            if !bounds.is_static {
                self.report(
                    ErrorCode::UNSUPPORTED,
                    ident,
                    format!("generic parameter `{ident}` needs a `'static` bound to be erased into the spy's storage"),
                );
                valid = false;
            }
            if self.thread_safe && !arguments.is_empty() && !(bounds.send && bounds.sync) {
                self.report(
                    ErrorCode::UNSUPPORTED,
                    ident,
                    format!("generic parameter `{ident}` needs `Send + Sync` bounds to be logged by a thread-safe spy"),
                );
                valid = false;
            }
            let borrowed = arguments
                .iter()
                .any(|parameter| borrowed_referent(&parameter.ty).is_some());
            if borrowed && !bounds.clone {
                self.report(
                    ErrorCode::UNSUPPORTED,
                    ident,
                    format!("generic parameter `{ident}` is borrowed, so it needs a `Clone` bound to be logged"),
                );
                valid = false;
            }
        }

        valid
    }

    /// Checks the shape shared by property and subscript getters.
    fn check_getter(&mut self, function: &TraitItemFn, what: &str) -> Option<Type> {
        let sig = &function.sig;
        let mut valid = true;

        if sig.receiver().is_none() {
            self.report(
                ErrorCode::MALFORMED_ACCESSOR,
                &sig.ident,
                format!("{what} getter `{}` needs a `self` receiver", sig.ident),
            );
            valid = false;
        }
        if sig.asyncness.is_some() {
            self.report(
                ErrorCode::MALFORMED_ACCESSOR,
                &sig.ident,
                format!("{what} getter `{}` cannot be `async`", sig.ident),
            );
            valid = false;
        }
        if !generic_names(&sig.generics).is_empty() {
            self.report(
                ErrorCode::UNSUPPORTED,
                &sig.generics,
                format!("generic {what} getters cannot be spied"),
            );
            valid = false;
        }

        let returned = return_type(&sig.output);
        match &returned {
            None => {
                self.report(
                    ErrorCode::MALFORMED_ACCESSOR,
                    &sig.ident,
                    format!("{what} getter `{}` must return a value", sig.ident),
                );
                valid = false;
            }
            Some(ty) if contains_impl_trait(ty) || borrows_non_static(ty) => {
                self.report(
                    ErrorCode::MALFORMED_ACCESSOR,
                    ty,
                    format!("{what} getter `{}` must return an owned value", sig.ident),
                );
                valid = false;
            }
            Some(_) => {}
        }

        if valid {
            returned
        } else {
            None
        }
    }

    /// Checks a setter against the getter's index types and value type.
    fn check_setter(&mut self, setter: &TraitItemFn, indices: &[Type], value: &Type) -> Option<Accessor> {
        let sig = &setter.sig;
        let typed: Vec<&Type> = sig
            .inputs
            .iter()
            .filter_map(|input| match input {
                syn::FnArg::Typed(pat_type) => Some(&*pat_type.ty),
                syn::FnArg::Receiver(_) => None,
            })
            .collect();

        let arity_matches = typed.len() == indices.len() + 1;
        let types_match = arity_matches
            && typed
                .iter()
                .zip(indices.iter().chain(std::iter::once(value)))
                .all(|(declared, expected)| same_type(declared, expected));

        if sig.receiver().is_none()
            || sig.asyncness.is_some()
            || !sig.generics.params.is_empty()
            || return_type(&sig.output).is_some()
            || !types_match
        {
            self.report(
                ErrorCode::MALFORMED_ACCESSOR,
                &sig.ident,
                format!(
                    "setter `{}` must take `self`, the getter's parameters and one value of the getter's return type, and return nothing",
                    sig.ident
                ),
            );
            return None;
        }

        let (signature, parameters) = normalize_signature(sig, &[]);
        Some(Accessor {
            signature,
            bindings: parameters.into_iter().map(|parameter| parameter.binding).collect(),
            cfg: Vec::new(),
        })
    }

    fn property(&mut self, function: &TraitItemFn, setter: Option<&TraitItemFn>) -> Option<PropertyMember> {
        let sig = &function.sig;
        let ty = self.check_getter(function, "property");

        let has_arguments = sig
            .inputs
            .iter()
            .any(|input| matches!(input, syn::FnArg::Typed(_)));
        if has_arguments {
            self.report(
                ErrorCode::MALFORMED_ACCESSOR,
                &sig.ident,
                format!(
                    "property getter `{}` cannot take parameters; use `#[spy(subscript)]`",
                    sig.ident
                ),
            );
            return None;
        }

        let ty = ty?;
        let setter = match setter {
            Some(setter) => Some(self.check_setter(setter, &[], &ty)?),
            None => None,
        };
        let (signature, _) = normalize_signature(sig, &[]);

        Some(PropertyMember {
            name: sig.ident.clone(),
            optional: is_option(&ty),
            accessors: accessor_set(setter.is_some()),
            ty,
            getter: Accessor {
                signature,
                bindings: Vec::new(),
                cfg: Vec::new(),
            },
            setter,
        })
    }

    fn subscript(&mut self, function: &TraitItemFn, setter: Option<&TraitItemFn>) -> Option<SubscriptMember> {
        let sig = &function.sig;
        let element = self.check_getter(function, "subscript");

        let (signature, indices) = normalize_signature(sig, &[]);
        if indices.is_empty() {
            self.report(
                ErrorCode::MALFORMED_ACCESSOR,
                &sig.ident,
                format!("subscript getter `{}` needs at least one index parameter", sig.ident),
            );
            return None;
        }
        for index in &indices {
            if contains_impl_trait(&index.ty) {
                self.report(
                    ErrorCode::UNSUPPORTED,
                    &index.ty,
                    "`impl Trait` subscript indices cannot be spied",
                );
                return None;
            }
            if let Some(reason) = unloggable_parameter(&index.ty) {
                self.report(ErrorCode::UNSUPPORTED, &index.ty, reason);
                return None;
            }
        }

        let element = element?;
        let index_types: Vec<Type> = indices.iter().map(|index| index.ty.clone()).collect();
        let setter = match setter {
            Some(setter) => Some(self.check_setter(setter, &index_types, &element)?),
            None => None,
        };

        Some(SubscriptMember {
            optional: is_option(&element),
            accessors: accessor_set(setter.is_some()),
            getter: Accessor {
                bindings: indices.iter().map(|index| index.binding.clone()).collect(),
                signature,
                cfg: Vec::new(),
            },
            indices,
            element,
            setter,
        })
    }
}

fn setter_mut(kind: &mut MemberKind) -> Option<&mut Accessor> {
    match kind {
        MemberKind::Property(property) => property.setter.as_mut(),
        MemberKind::Subscript(subscript) => subscript.setter.as_mut(),
        MemberKind::Method(_) => None,
    }
}

fn accessor_set(has_setter: bool) -> AccessorSet {
    if has_setter {
        AccessorSet::GetAndSet
    } else {
        AccessorSet::GetOnly
    }
}
