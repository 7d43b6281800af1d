//! Type token sanitizer.
//!
//! Turns an arbitrary type expression into a short UpperCamel fragment that
//! is safe to splice into an identifier. The mapping is deliberately lossy
//! (`Option<T>` and `T` share a token); the disambiguator only needs tokens
//! to differ between members that actually collide.

use crate::model::Effects;
use syn::{GenericArgument, PathArguments, PathSegment, ReturnType, Type, TypeParamBound};

/// Sanitized token of a type expression.
pub fn sanitize_type(ty: &Type) -> String {
    let mut out = String::new();
    push_type(&mut out, ty);
    out
}

/// Sanitized token of a return type; absent returns yield `Unit`.
pub fn return_token(ty: Option<&Type>) -> String {
    match ty {
        Some(ty) => sanitize_type(ty),
        None => "Unit".to_string(),
    }
}

/// `Async` if the member may wait, followed by `Throwing` if it may throw.
pub fn effect_tokens(effects: Effects) -> String {
    let mut out = String::new();
    if effects.may_wait {
        out.push_str("Async");
    }
    if effects.may_throw {
        out.push_str("Throwing");
    }
    out
}

/// Concatenated tokens of a parameter type list.
pub fn parameter_tokens<'a>(types: impl IntoIterator<Item = &'a Type>) -> String {
    let mut out = String::new();
    for ty in types {
        push_type(&mut out, ty);
    }
    out
}

fn push_type(out: &mut String, ty: &Type) {
    match ty {
        Type::Path(type_path) => {
            if let Some(segment) = type_path.path.segments.last() {
                push_segment(out, segment);
            }
        }
        Type::Reference(reference) => push_type(out, &reference.elem),
        Type::Ptr(pointer) => push_type(out, &pointer.elem),
        Type::Slice(slice) => {
            out.push_str("Slice");
            push_type(out, &slice.elem);
        }
        Type::Array(array) => {
            out.push_str("Array");
            push_type(out, &array.elem);
        }
        Type::Tuple(tuple) if tuple.elems.is_empty() => out.push_str("Unit"),
        Type::Tuple(tuple) => tuple.elems.iter().for_each(|elem| push_type(out, elem)),
        Type::Paren(paren) => push_type(out, &paren.elem),
        Type::Group(group) => push_type(out, &group.elem),
        Type::BareFn(bare_fn) => {
            out.push_str("Fn");
            bare_fn.inputs.iter().for_each(|arg| push_type(out, &arg.ty));
            push_return(out, &bare_fn.output);
        }
        Type::TraitObject(object) => push_bounds(out, object.bounds.iter()),
        Type::ImplTrait(impl_trait) => push_bounds(out, impl_trait.bounds.iter()),
        Type::Never(_) => out.push_str("Never"),
        Type::Macro(type_macro) => {
            if let Some(segment) = type_macro.mac.path.segments.last() {
                out.push_str(&capitalize(&segment.ident.to_string()));
            }
        }
        _ => {}
    }
}

fn push_segment(out: &mut String, segment: &PathSegment) {
    let ident = segment.ident.to_string();
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => {
            let types: Vec<&Type> = args
                .args
                .iter()
                .filter_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(ty),
                    GenericArgument::AssocType(assoc) => Some(&assoc.ty),
                    _ => None,
                })
                .collect();
            if ident == "Option" && types.len() == 1 {
                push_type(out, types[0]);
                return;
            }
            out.push_str(&capitalize(&ident));
            types.into_iter().for_each(|ty| push_type(out, ty));
        }
        PathArguments::Parenthesized(args) => {
            out.push_str(&capitalize(&ident));
            args.inputs.iter().for_each(|ty| push_type(out, ty));
            push_return(out, &args.output);
        }
        PathArguments::None => out.push_str(&capitalize(&ident)),
    }
}

fn push_return(out: &mut String, output: &ReturnType) {
    if let ReturnType::Type(_, ty) = output {
        push_type(out, ty);
    }
}

fn push_bounds<'a>(out: &mut String, bounds: impl Iterator<Item = &'a TypeParamBound>) {
    for bound in bounds {
        if let TypeParamBound::Trait(trait_bound) = bound {
            if let Some(segment) = trait_bound.path.segments.last() {
                push_segment(out, segment);
            }
        }
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(fragment: &str) -> String {
    let fragment = fragment.strip_prefix("r#").unwrap_or(fragment);
    let mut chars = fragment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts an UpperCamel fragment into snake_case for field and method names.
///
/// Digits stay attached to the preceding word (`I64String` becomes
/// `i64_string`) and acronym runs split before their last capital
/// (`IOError` becomes `io_error`).
pub fn to_snake_case(fragment: &str) -> String {
    let chars: Vec<char> = fragment.chars().collect();
    let mut out = String::with_capacity(fragment.len() + 4);

    for (index, &current) in chars.iter().enumerate() {
        if current.is_uppercase() && index > 0 {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|next| next.is_lowercase());
            let boundary = previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(current.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn token(ty: Type) -> String {
        sanitize_type(&ty)
    }

    #[test]
    fn test_path_types_keep_generic_arguments() {
        assert_eq!(token(parse_quote!(i64)), "I64");
        assert_eq!(token(parse_quote!(Vec<i64>)), "VecI64");
        assert_eq!(
            token(parse_quote!(std::collections::HashMap<String, Vec<u8>>)),
            "HashMapStringVecU8"
        );
        assert_eq!(token(parse_quote!(Cow<'a, str>)), "CowStr");
    }

    #[test]
    fn test_option_strips_to_inner_type() {
        assert_eq!(token(parse_quote!(Option<String>)), "String");
        assert_eq!(token(parse_quote!(Option<Vec<u8>>)), "VecU8");
    }

    #[test]
    fn test_references_and_collections() {
        assert_eq!(token(parse_quote!(&str)), "Str");
        assert_eq!(token(parse_quote!(&'a mut [u8])), "SliceU8");
        assert_eq!(token(parse_quote!([u8; 32])), "ArrayU8");
        assert_eq!(token(parse_quote!(*const u8)), "U8");
        assert_eq!(token(parse_quote!((bool, String))), "BoolString");
        assert_eq!(token(parse_quote!(())), "Unit");
    }

    #[test]
    fn test_callable_types() {
        assert_eq!(token(parse_quote!(fn(i64) -> bool)), "FnI64Bool");
        assert_eq!(token(parse_quote!(Box<dyn Fn(i64) -> bool>)), "BoxFnI64Bool");
        assert_eq!(token(parse_quote!(&dyn Iterator<Item = u8>)), "IteratorU8");
    }

    #[test]
    fn test_self_and_qualified_paths() {
        assert_eq!(token(parse_quote!(Self)), "Self");
        assert_eq!(token(parse_quote!(Self::Item)), "Item");
        assert_eq!(token(parse_quote!(<Self as Store>::Key)), "Key");
    }

    #[test]
    fn test_return_and_effect_tokens() {
        assert_eq!(return_token(None), "Unit");
        let ty: Type = parse_quote!(Result<u8, Error>);
        assert_eq!(return_token(Some(&ty)), "ResultU8Error");
        assert_eq!(
            effect_tokens(Effects {
                may_throw: true,
                may_wait: true
            }),
            "AsyncThrowing"
        );
        assert_eq!(effect_tokens(Effects::default()), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("BoolString"), "bool_string");
        assert_eq!(to_snake_case("I64String"), "i64_string");
        assert_eq!(to_snake_case("HashMapStringI64"), "hash_map_string_i64");
        assert_eq!(to_snake_case("VecU8"), "vec_u8");
        assert_eq!(to_snake_case("IOError"), "io_error");
        assert_eq!(to_snake_case("Str"), "str");
        assert_eq!(to_snake_case("U8Slice"), "u8_slice");
    }

    #[test]
    fn test_capitalize_handles_raw_identifiers() {
        assert_eq!(capitalize("r#type"), "Type");
        assert_eq!(capitalize("bool"), "Bool");
        assert_eq!(capitalize(""), "");
    }
}
