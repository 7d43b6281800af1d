//! Property and subscript templates.

use super::methods::call_accessors;
use super::regions::cfg_attrs;
use super::templates::{GeneratedMemberSet, MemberContext, Template};
use crate::model::{PropertyMember, SubscriptMember};
use crate::project::{ArgumentProjection, PropertyProjection, SubscriptProjection};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

pub(crate) fn property(
    ctx: &MemberContext<'_>,
    property: &PropertyMember,
    projected: &PropertyProjection,
    template: Template,
) -> GeneratedMemberSet {
    let storage = ctx.storage();
    let optional = template == Template::OptionalProperty;
    let backing = ctx.idents.backing(optional);
    let value_type = &projected.value_type;
    let stored_type = if optional {
        quote!(#value_type)
    } else {
        quote!(::std::option::Option<#value_type>)
    };
    let wrap = |value: TokenStream| {
        if optional {
            value
        } else {
            quote!(::std::option::Option::Some(#value))
        }
    };

    let mut set = GeneratedMemberSet::default();
    set.fields.push(storage.field_decl(&backing, &stored_type));

    let place = storage.borrowed(&backing);
    let read = storage.critical_expr(quote!(#place.clone()));
    let getter = &projected.getter;
    let getter_body = if optional {
        read
    } else {
        let owner = ctx.owner();
        let field = backing.to_string();
        quote! {
            match #read {
                ::std::option::Option::Some(__spy_value) => __spy_value,
                ::std::option::Option::None => ::spygen::runtime::unset_value(#owner, #field),
            }
        }
    };
    set.impl_items.push(quote! {
        #getter {
            #getter_body
        }
    });

    if let (Some(signature), Some(setter)) = (&projected.setter, &property.setter) {
        if let Some(value) = setter.bindings.last() {
            let write = storage.critical_stmts(storage.assign(&backing, wrap(quote!(#value))));
            let gate = cfg_attrs(&setter.cfg);
            set.impl_items.push(quote! {
                #gate
                #signature {
                    #write
                }
            });
        }
    }

    let stub = ctx.idents.stub();
    let write = storage.critical_stmts(storage.assign(&backing, wrap(quote!(value))));
    set.accessors.push(quote! {
        pub fn #stub(&self, value: #value_type) {
            #write
        }
    });

    set.reset
        .push(storage.assign(&backing, quote!(::std::option::Option::None)));
    set
}

/// The index value used as a key, built from the given bindings.
fn key_expr(indices: &[ArgumentProjection], bindings: &[Ident]) -> TokenStream {
    let parts: Vec<TokenStream> = indices
        .iter()
        .zip(bindings)
        .map(|(index, binding)| index.log_expr(binding))
        .collect();
    match parts.as_slice() {
        [single] => single.clone(),
        many => quote!((#(#many),*)),
    }
}

pub(crate) fn subscript(
    ctx: &MemberContext<'_>,
    subscript: &SubscriptMember,
    projected: &SubscriptProjection,
) -> GeneratedMemberSet {
    let storage = ctx.storage();
    let count = ctx.idents.call_count();
    let log = ctx.idents.received_invocations();
    let entries = ctx.idents.entries();
    let key_type = &projected.key_type;
    let element_type = &projected.element_type;

    let mut set = GeneratedMemberSet::default();
    set.fields.push(storage.counter_decl(&count));
    set.fields
        .push(storage.field_decl(&log, &quote!(::std::vec::Vec<#key_type>)));
    set.fields.push(storage.field_decl(
        &entries,
        &quote!(::std::vec::Vec<(#key_type, #element_type)>),
    ));

    let getter = &projected.getter;
    let key = key_expr(&projected.indices, &subscript.getter.bindings);
    let increment = storage.increment(&count);
    let log_place = storage.borrowed_mut(&log);
    let entries_place = storage.borrowed(&entries);
    let lookup = storage.critical_block(quote! {
        #increment
        #log_place.push(::std::clone::Clone::clone(&__spy_index));
        ::spygen::runtime::lookup(&#entries_place, &__spy_index)
    });
    let resolve = if subscript.optional {
        quote!(__spy_entry.flatten())
    } else {
        let owner = ctx.owner();
        let field = entries.to_string();
        quote! {
            match __spy_entry {
                ::std::option::Option::Some(__spy_value) => __spy_value,
                ::std::option::Option::None => ::spygen::runtime::unset_value(#owner, #field),
            }
        }
    };
    set.impl_items.push(quote! {
        #getter {
            let __spy_index = #key;
            let __spy_entry = #lookup;
            #resolve
        }
    });

    let entries_mut = storage.borrowed_mut(&entries);
    if let (Some(signature), Some(setter)) = (&projected.setter, &subscript.setter) {
        if let Some((value, index_bindings)) = setter.bindings.split_last() {
            let key = key_expr(&projected.indices, index_bindings);
            let upsert = storage.critical_stmts(quote! {
                ::spygen::runtime::upsert(&mut #entries_mut, __spy_index, #value);
            });
            let gate = cfg_attrs(&setter.cfg);
            set.impl_items.push(quote! {
                #gate
                #signature {
                    let __spy_index = #key;
                    #upsert
                }
            });
        }
    }

    let stub = ctx.idents.stub();
    let upsert = storage.critical_stmts(quote! {
        ::spygen::runtime::upsert(&mut #entries_mut, index, value);
    });
    set.accessors.extend(call_accessors(ctx, Some(key_type)));
    set.accessors.push(quote! {
        pub fn #stub(&self, index: #key_type, value: #element_type) {
            #upsert
        }
    });

    set.reset.push(storage.reset_counter(&count));
    set.reset.push(quote!(#log_place.clear();));
    set.reset.push(quote!(#entries_mut.clear();));
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disambiguate::disambiguate;
    use crate::emit::naming::MemberIdents;
    use crate::extract::extract;
    use crate::model::MemberKind;
    use crate::project::{project, MemberProjection};
    use crate::strategy::ConcurrencyShape;
    use syn::{parse_quote, ItemTrait};

    fn generate(item: ItemTrait, shape: ConcurrencyShape) -> GeneratedMemberSet {
        let declaration = extract(&item).unwrap();
        let projection = project(&declaration);
        let names = disambiguate(&declaration.members);
        let spy = declaration.spy_ident();
        let member = &declaration.members[0];
        let ctx = MemberContext {
            spy: &spy,
            member,
            projection: &projection.members[0],
            idents: MemberIdents::new(names.stem(0)),
            shape,
        };
        match (&member.kind, &projection.members[0]) {
            (MemberKind::Property(p), MemberProjection::Property(projected)) => {
                property(&ctx, p, projected, Template::of(member, &projection.members[0]))
            }
            (MemberKind::Subscript(s), MemberProjection::Subscript(projected)) => {
                subscript(&ctx, s, projected)
            }
            _ => panic!("expected a property or subscript"),
        }
    }

    #[test]
    fn test_forced_property_panics_when_unset() {
        let set = generate(
            parse_quote! {
                trait Settings {
                    #[spy(property)]
                    fn name(&self) -> String;
                    fn set_name(&mut self, value: String);
                }
            },
            ConcurrencyShape::Plain,
        );
        assert_eq!(set.impl_items.len(), 2);
        let getter = set.impl_items[0].to_string();
        assert!(getter.contains("underlying_name"));
        assert!(getter.contains("unset_value"));
    }

    #[test]
    fn test_optional_property_is_its_own_state() {
        let set = generate(
            parse_quote! {
                trait Settings {
                    #[spy(property)]
                    fn nickname(&self) -> Option<String>;
                }
            },
            ConcurrencyShape::LockedValue,
        );
        assert_eq!(set.impl_items.len(), 1);
        let getter = set.impl_items[0].to_string();
        assert!(!getter.contains("unset_value"));
        assert!(set.fields[0].to_string().starts_with("nickname"));
    }

    #[test]
    fn test_subscript_keys_entries_by_index() {
        let set = generate(
            parse_quote! {
                trait Grid {
                    #[spy(subscript)]
                    fn cell(&self, row: usize, column: usize) -> char;
                    fn set_cell(&mut self, row: usize, column: usize, value: char);
                }
            },
            ConcurrencyShape::LockedValue,
        );
        assert_eq!(set.fields.len(), 3);
        assert_eq!(set.impl_items.len(), 2);
        assert_eq!(set.reset.len(), 3);
        let setter = set.impl_items[1].to_string();
        assert!(setter.contains("upsert"));
        assert!(set.fields[2].to_string().contains("subscript_usize_usize_entries"));
    }

    #[test]
    fn test_setter_keeps_its_own_cfg() {
        let set = generate(
            parse_quote! {
                trait Settings {
                    #[spy(property)]
                    fn name(&self) -> String;
                    #[cfg(unix)]
                    fn set_name(&mut self, value: String);
                }
            },
            ConcurrencyShape::Plain,
        );
        let getter = set.impl_items[0].to_string();
        let setter = set.impl_items[1].to_string();
        assert!(!getter.contains("cfg"));
        assert!(setter.starts_with("# [cfg (unix)]"));
        assert!(set.accessors.iter().all(|accessor| !accessor.to_string().contains("cfg")));
    }
}
