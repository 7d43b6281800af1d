//! `#[spy(..)]` helper attributes and `#[cfg(..)]` chains on trait items.

use crate::errors::{Diagnostic, Diagnostics, ErrorCode};
use crate::model::CfgPredicate;
use syn::{Attribute, ItemTrait, LitStr, Meta, TraitItem, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MemberRole {
    #[default]
    Method,
    Property,
    Subscript,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ItemHelpers {
    pub role: MemberRole,
    pub default: Option<Type>,
}

/// Whether the attribute is a `#[spy(..)]` helper (as opposed to the bare marker).
pub fn is_helper_attribute(attr: &Attribute) -> bool {
    matches!(attr.meta, Meta::List(_))
        && attr
            .path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "spy")
}

/// Removes helper attributes from every trait item, so a harness can
/// re-emit the declaration unchanged otherwise.
pub fn strip_helper_attributes(item: &mut ItemTrait) {
    for trait_item in &mut item.items {
        let attrs = match trait_item {
            TraitItem::Fn(function) => &mut function.attrs,
            TraitItem::Type(assoc) => &mut assoc.attrs,
            TraitItem::Const(constant) => &mut constant.attrs,
            _ => continue,
        };
        attrs.retain(|attr| !is_helper_attribute(attr));
    }
}

/// Parses the helper keys on one trait item. Unknown keys are reported and skipped.
pub(crate) fn parse_helpers(attrs: &[Attribute], diagnostics: &mut Diagnostics) -> ItemHelpers {
    let mut helpers = ItemHelpers::default();

    for attr in attrs.iter().filter(|attr| is_helper_attribute(attr)) {
        let mut roles = Vec::new();
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("property") {
                roles.push(MemberRole::Property);
                Ok(())
            } else if meta.path.is_ident("subscript") {
                roles.push(MemberRole::Subscript);
                Ok(())
            } else if meta.path.is_ident("default") {
                let literal: LitStr = meta.value()?.parse()?;
                helpers.default = Some(literal.parse::<Type>()?);
                Ok(())
            } else {
                Err(meta.error(
                    "unknown `spy` helper key; expected `property`, `subscript` or `default = \"Type\"`",
                ))
            }
        });

        if let Err(error) = result {
            diagnostics.push(Diagnostic::new(
                ErrorCode::UNKNOWN_HELPER,
                error.span(),
                error.to_string(),
            ));
        }

        for role in roles {
            if helpers.role != MemberRole::Method && helpers.role != role {
                diagnostics.push(Diagnostic::spanned(
                    ErrorCode::MALFORMED_ACCESSOR,
                    attr,
                    "a member cannot be both a property and a subscript",
                ));
                continue;
            }
            helpers.role = role;
        }
    }

    helpers
}

/// The `#[cfg(..)]` predicates on an item, outermost first.
pub(crate) fn cfg_chain(attrs: &[Attribute]) -> Vec<CfgPredicate> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .filter_map(|attr| attr.meta.require_list().ok())
        .map(|list| CfgPredicate::new(list.tokens.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_property_role() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[spy(property)])];
        let mut diagnostics = Diagnostics::new();
        let helpers = parse_helpers(&attrs, &mut diagnostics);
        assert_eq!(helpers.role, MemberRole::Property);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parse_default_type() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[spy(default = "Vec<u8>")])];
        let mut diagnostics = Diagnostics::new();
        let helpers = parse_helpers(&attrs, &mut diagnostics);
        let expected: Type = parse_quote!(Vec<u8>);
        assert_eq!(helpers.default, Some(expected));
    }

    #[test]
    fn test_unknown_key_is_reported() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[spy(record)])];
        let mut diagnostics = Diagnostics::new();
        parse_helpers(&attrs, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.code),
            Some(ErrorCode::UNKNOWN_HELPER)
        );
    }

    #[test]
    fn test_conflicting_roles_are_reported() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[spy(property, subscript)])];
        let mut diagnostics = Diagnostics::new();
        parse_helpers(&attrs, &mut diagnostics);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.code),
            Some(ErrorCode::MALFORMED_ACCESSOR)
        );
    }

    #[test]
    fn test_cfg_chain_keeps_order() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[doc = "opens"]),
            parse_quote!(#[cfg(feature = "net")]),
            parse_quote!(#[cfg(unix)]),
        ];
        let chain = cfg_chain(&attrs);
        let rendered: Vec<&str> = chain.iter().map(CfgPredicate::as_str).collect();
        assert_eq!(rendered, vec!["feature = \"net\"", "unix"]);
    }

    #[test]
    fn test_strip_helper_attributes_keeps_cfg() {
        let mut item: ItemTrait = parse_quote! {
            trait Settings {
                #[cfg(unix)]
                #[spy(property)]
                fn name(&self) -> String;
            }
        };
        strip_helper_attributes(&mut item);
        let TraitItem::Fn(function) = &item.items[0] else {
            panic!("expected a fn item");
        };
        assert_eq!(function.attrs.len(), 1);
        assert!(function.attrs[0].path().is_ident("cfg"));
    }
}
