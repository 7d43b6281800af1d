//! Signature normalization and type inspections used by the extractor.

use crate::model::{Effects, Parameter};
use proc_macro2::Ident;
use quote::{format_ident, ToTokens};
use syn::visit::{self, Visit};
use syn::{
    FnArg, GenericArgument, GenericParam, Generics, Lifetime, Pat, PatIdent, PathArguments,
    ReturnType, Signature, Type, TypeImplTrait, TypeParamBound, TypePath, TypeReference,
    WherePredicate,
};

/// Names of a method's own generic type and const parameters.
pub(crate) fn generic_names(generics: &Generics) -> Vec<Ident> {
    generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(type_param.ident.clone()),
            GenericParam::Const(const_param) => Some(const_param.ident.clone()),
            GenericParam::Lifetime(_) => None,
        })
        .collect()
}

/// Whether `ty` mentions any of `names` as the head of a relative path.
pub(crate) fn mentions_generic(ty: &Type, names: &[Ident]) -> bool {
    if names.is_empty() {
        return false;
    }
    let mut visitor = GenericMentionVisitor {
        names,
        found: false,
    };
    visitor.visit_type(ty);
    visitor.found
}

struct GenericMentionVisitor<'a> {
    names: &'a [Ident],
    found: bool,
}

impl<'ast> Visit<'ast> for GenericMentionVisitor<'_> {
    fn visit_path(&mut self, path: &'ast syn::Path) {
        if path.leading_colon.is_none() {
            if let Some(first) = path.segments.first() {
                if self.names.contains(&first.ident) {
                    self.found = true;
                }
            }
        }
        visit::visit_path(self, path);
    }
}

pub(crate) fn contains_impl_trait(ty: &Type) -> bool {
    struct ImplTraitVisitor(bool);

    impl<'ast> Visit<'ast> for ImplTraitVisitor {
        fn visit_type_impl_trait(&mut self, _: &'ast TypeImplTrait) {
            self.0 = true;
        }
    }

    let mut visitor = ImplTraitVisitor(false);
    visitor.visit_type(ty);
    visitor.0
}

/// Whether a return type borrows anything other than `'static` data.
pub(crate) fn borrows_non_static(ty: &Type) -> bool {
    struct BorrowVisitor(bool);

    impl<'ast> Visit<'ast> for BorrowVisitor {
        fn visit_type_reference(&mut self, reference: &'ast TypeReference) {
            if !reference.lifetime.as_ref().is_some_and(is_static) {
                self.0 = true;
            }
            visit::visit_type_reference(self, reference);
        }

        fn visit_generic_argument(&mut self, argument: &'ast GenericArgument) {
            if let GenericArgument::Lifetime(lifetime) = argument {
                if !is_static(lifetime) {
                    self.0 = true;
                }
            }
            visit::visit_generic_argument(self, argument);
        }
    }

    let mut visitor = BorrowVisitor(false);
    visitor.visit_type(ty);
    visitor.0
}

fn is_static(lifetime: &Lifetime) -> bool {
    lifetime.ident == "static"
}

/// The shared reference inside `Option<&T>`.
pub(crate) fn optional_reference(ty: &Type) -> Option<&TypeReference> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.iter().collect::<Vec<_>>().as_slice() {
        [GenericArgument::Type(Type::Reference(reference))] if reference.mutability.is_none() => {
            Some(reference)
        }
        _ => None,
    }
}

/// The referent of `&T` or `Option<&T>`, which the invocation log owns.
pub(crate) fn borrowed_referent(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Reference(reference) => Some(&reference.elem),
        _ => optional_reference(ty).map(|reference| &*reference.elem),
    }
}

/// Whether `ty` names the implementing type itself (`Self`, not `Self::Item`).
pub(crate) fn mentions_self(ty: &Type) -> bool {
    struct SelfVisitor(bool);

    impl<'ast> Visit<'ast> for SelfVisitor {
        fn visit_type_path(&mut self, type_path: &'ast TypePath) {
            if type_path.qself.is_none() && type_path.path.is_ident("Self") {
                self.0 = true;
                return;
            }
            // `<Self as Trait>::Item` names an associated type.
            visit::visit_path(self, &type_path.path);
        }
    }

    let mut visitor = SelfVisitor(false);
    visitor.visit_type(ty);
    visitor.0
}

/// Why a parameter's value cannot be kept in an owned, `'static` invocation log.
pub(crate) fn unloggable_parameter(ty: &Type) -> Option<&'static str> {
    if mentions_self(ty) {
        return Some("parameters mentioning `Self` cannot be logged; the spy type is not `Clone`");
    }
    match borrowed_referent(ty) {
        Some(Type::TraitObject(_)) => {
            Some("borrowed trait objects cannot be logged; take an owned value")
        }
        Some(referent) if borrows_non_static(referent) => Some(
            "parameters borrowing data behind the outer reference cannot be logged; take an owned value",
        ),
        None if borrows_non_static(ty) => Some(
            "parameters carrying a non-`'static` lifetime cannot be logged; take an owned value or a plain reference",
        ),
        _ => None,
    }
}

/// The bounds of one generic type parameter that erasure depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ErasureBounds {
    pub is_static: bool,
    pub send: bool,
    pub sync: bool,
    pub clone: bool,
}

/// Bounds declared on `name`, inline or in the `where` clause.
pub(crate) fn erasure_bounds(generics: &Generics, name: &Ident) -> ErasureBounds {
    let inline = generics
        .type_params()
        .filter(|param| param.ident == *name)
        .flat_map(|param| param.bounds.iter());
    let predicates = generics
        .where_clause
        .iter()
        .flat_map(|clause| clause.predicates.iter())
        .filter_map(|predicate| match predicate {
            WherePredicate::Type(predicate) => Some(predicate),
            _ => None,
        })
        .filter(|predicate| {
            matches!(&predicate.bounded_ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident(name))
        })
        .flat_map(|predicate| predicate.bounds.iter());

    let mut bounds = ErasureBounds::default();
    for bound in inline.chain(predicates) {
        match bound {
            TypeParamBound::Lifetime(lifetime) if is_static(lifetime) => bounds.is_static = true,
            TypeParamBound::Trait(trait_bound) => {
                let Some(last) = trait_bound.path.segments.last() else {
                    continue;
                };
                match last.ident.to_string().as_str() {
                    "Any" => bounds.is_static = true,
                    "Send" => bounds.send = true,
                    "Sync" => bounds.sync = true,
                    "Clone" | "Copy" => bounds.clone = true,
                    _ => {}
                }
            }
            _ => {}
        }
    }
    bounds
}

/// The declared return type, treating `-> ()` like an absent return.
pub(crate) fn return_type(output: &ReturnType) -> Option<Type> {
    match output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) if is_unit(ty) => None,
        ReturnType::Type(_, ty) => Some((**ty).clone()),
    }
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == name),
        Type::Group(group) => last_segment_is(&group.elem, name),
        Type::Paren(paren) => last_segment_is(&paren.elem, name),
        _ => false,
    }
}

/// `Option<_>` by last path segment, with exactly one angle-bracketed argument.
pub(crate) fn is_option(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path.path.segments.last().is_some_and(|segment| {
        segment.ident == "Option"
            && matches!(&segment.arguments, PathArguments::AngleBracketed(args) if args.args.len() == 1)
    })
}

pub(crate) fn effects_of(signature: &Signature) -> Effects {
    Effects {
        may_throw: return_type(&signature.output).is_some_and(|ty| last_segment_is(&ty, "Result")),
        may_wait: signature.asyncness.is_some(),
    }
}

/// Token-level equality of two type expressions.
pub(crate) fn same_type(left: &Type, right: &Type) -> bool {
    left.to_token_stream().to_string() == right.to_token_stream().to_string()
}

/// Replaces every parameter pattern with a plain binding.
///
/// Named parameters keep their name as the binding; suppressed ones
/// (`_`, destructuring patterns) are bound as `argN` by position.
pub(crate) fn normalize_signature(
    signature: &Signature,
    generics: &[Ident],
) -> (Signature, Vec<Parameter>) {
    let mut normalized = signature.clone();
    let mut parameters = Vec::new();

    for input in normalized.inputs.iter_mut() {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };

        let label = match &*pat_type.pat {
            Pat::Ident(pat_ident) if pat_ident.subpat.is_none() && pat_ident.by_ref.is_none() => {
                Some(pat_ident.ident.clone())
            }
            _ => None,
        };
        let binding = label
            .clone()
            .unwrap_or_else(|| format_ident!("arg{}", parameters.len()));

        pat_type.attrs.clear();
        *pat_type.pat = Pat::Ident(PatIdent {
            attrs: Vec::new(),
            by_ref: None,
            mutability: None,
            ident: binding.clone(),
            subpat: None,
        });

        parameters.push(Parameter {
            label,
            binding,
            ty: (*pat_type.ty).clone(),
            generic_reference: mentions_generic(&pat_type.ty, generics),
        });
    }

    (normalized, parameters)
}
