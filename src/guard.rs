//! Rejects decorated items that are not trait declarations.

use crate::errors::{Diagnostic, ErrorCode};
use syn::{Item, ItemTrait};

pub const NOT_A_TRAIT_MESSAGE: &str = "`#[spy]` can only be applied to a trait";

/// Returns the trait unchanged, or the fixed diagnostic spanned at the item.
pub fn ensure_trait(item: &Item) -> Result<&ItemTrait, Diagnostic> {
    match item {
        Item::Trait(item_trait) => Ok(item_trait),
        other => Err(Diagnostic::spanned(
            ErrorCode::NOT_A_TRAIT,
            other,
            NOT_A_TRAIT_MESSAGE,
        )),
    }
}

/// Whether an attribute list carries the `#[spy]` marker (by last path segment).
pub fn has_spy_marker(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(is_spy_marker)
}

pub fn is_spy_marker(attr: &syn::Attribute) -> bool {
    matches!(attr.meta, syn::Meta::Path(_))
        && attr
            .path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "spy")
}

/// Attributes of any item kind, for locating decorated items in a file.
pub fn item_attributes(item: &Item) -> &[syn::Attribute] {
    match item {
        Item::Const(item) => &item.attrs,
        Item::Enum(item) => &item.attrs,
        Item::ExternCrate(item) => &item.attrs,
        Item::Fn(item) => &item.attrs,
        Item::ForeignMod(item) => &item.attrs,
        Item::Impl(item) => &item.attrs,
        Item::Macro(item) => &item.attrs,
        Item::Mod(item) => &item.attrs,
        Item::Static(item) => &item.attrs,
        Item::Struct(item) => &item.attrs,
        Item::Trait(item) => &item.attrs,
        Item::TraitAlias(item) => &item.attrs,
        Item::Type(item) => &item.attrs,
        Item::Union(item) => &item.attrs,
        Item::Use(item) => &item.attrs,
        _ => &[],
    }
}

/// Name of an item, when it has one.
pub fn item_name(item: &Item) -> Option<String> {
    let ident = match item {
        Item::Const(item) => &item.ident,
        Item::Enum(item) => &item.ident,
        Item::Fn(item) => &item.sig.ident,
        Item::Mod(item) => &item.ident,
        Item::Static(item) => &item.ident,
        Item::Struct(item) => &item.ident,
        Item::Trait(item) => &item.ident,
        Item::TraitAlias(item) => &item.ident,
        Item::Type(item) => &item.ident,
        Item::Union(item) => &item.ident,
        _ => return None,
    };
    Some(ident.to_string())
}
