//! Code emitter.
//!
//! Assembles the spy declaration from the extracted model, the generated
//! names, the projected types and the shape plan. Every item is gated on
//! `#[cfg(test)]`; member-level items additionally carry the member's
//! `#[cfg]` chain, and `reset` nests gated blocks following the region tree.

mod accessors;
mod methods;
pub(crate) mod naming;
pub mod regions;
pub mod render;
mod storage;
mod templates;

use crate::disambiguate::NameTable;
use crate::model::InterfaceDeclaration;
use crate::project::Projection;
use crate::strategy::{ConcurrencyShape, ShapePlan};
use naming::MemberIdents;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use storage::Storage;
use templates::{emit_member, GeneratedMemberSet, MemberContext};
use tracing::debug;

/// Emits the complete spy for one declaration.
pub fn emit(
    declaration: &InterfaceDeclaration,
    names: &NameTable,
    projection: &Projection,
    plan: &ShapePlan,
) -> TokenStream {
    let spy = declaration.spy_ident();
    let sets: Vec<GeneratedMemberSet> = declaration
        .members
        .iter()
        .zip(&projection.members)
        .enumerate()
        .map(|(index, (member, projected))| {
            emit_member(&MemberContext {
                spy: &spy,
                member,
                projection: projected,
                idents: MemberIdents::new(names.stem(index)),
                shape: plan.shape,
            })
        })
        .collect();

    debug!(
        spy = %spy,
        shape = ?plan.shape,
        members = sets.len(),
        "Emitting spy"
    );

    let gated = |index: usize, items: &[TokenStream]| -> Vec<TokenStream> {
        let attrs = regions::cfg_attrs(&declaration.members[index].cfg);
        items.iter().map(|item| quote!(#attrs #item)).collect()
    };

    let mut fields = Vec::new();
    let mut impl_items = Vec::new();
    let mut accessors = Vec::new();
    for (index, set) in sets.iter().enumerate() {
        fields.extend(gated(index, &set.fields));
        impl_items.extend(gated(index, &set.impl_items));
        accessors.extend(gated(index, &set.accessors));
    }
    let reset_statements: Vec<Vec<TokenStream>> =
        sets.into_iter().map(|set| set.reset).collect();
    let reset = regions::nested_statements(&declaration.regions.nodes, &reset_statements);

    let storage = Storage::for_shape(plan.shape);
    let declarations = spy_declarations(declaration, &spy, plan, &fields);
    let inherent = inherent_impl(&spy, &accessors, storage.critical_stmts(reset));
    let trait_impl = trait_impl(declaration, &spy, projection, &impl_items);
    let extras = supertrait_impls(declaration, &spy, plan.shape);

    quote! {
        #declarations
        #inherent
        #trait_impl
        #extras
    }
}

fn spy_declarations(
    declaration: &InterfaceDeclaration,
    spy: &Ident,
    plan: &ShapePlan,
    fields: &[TokenStream],
) -> TokenStream {
    let vis = &declaration.visibility;
    let doc = format!(
        " Spy implementation of [`{}`], recording calls and delegating to configurable handlers.",
        declaration.name
    );

    if plan.variants.is_empty() {
        return quote! {
            #[cfg(test)]
            #[doc = #doc]
            #[derive(Default)]
            #[allow(dead_code)]
            #vis struct #spy {
                #(#fields,)*
            }
        };
    }

    let state = declaration.state_ident();
    let isolation = (plan.shape == ConcurrencyShape::IsolatedLockedUnit)
        .then(|| quote!(isolation: ::spygen::runtime::Isolation,));
    let variants = plan.variants.iter().map(|variant| {
        let gate = variant.predicate.as_ref().map(|predicate| {
            let predicate = predicate.tokens();
            quote!(#[cfg(#predicate)])
        });
        let handle = variant.flavor.handle_type(&state);
        quote! {
            #[cfg(test)]
            #gate
            #[doc = #doc]
            #[derive(Default)]
            #[allow(dead_code)]
            #vis struct #spy {
                state: #handle,
                #isolation
            }
        }
    });

    quote! {
        #[cfg(test)]
        #[derive(Default)]
        #[allow(dead_code)]
        struct #state {
            #(#fields,)*
        }

        #(#variants)*
    }
}

fn inherent_impl(spy: &Ident, accessors: &[TokenStream], reset: TokenStream) -> TokenStream {
    quote! {
        #[cfg(test)]
        #[allow(dead_code)]
        impl #spy {
            /// Creates a spy with empty logs and no handlers or stubbed values.
            pub fn new() -> Self {
                ::std::default::Default::default()
            }

            #(#accessors)*

            /// Zeroes every counter and clears every log, handler, stubbed value and keyed store.
            pub fn reset(&self) {
                #reset
            }
        }
    }
}

fn trait_impl(
    declaration: &InterfaceDeclaration,
    spy: &Ident,
    projection: &Projection,
    items: &[TokenStream],
) -> TokenStream {
    let name = &declaration.name;
    let async_attribute = &declaration.async_attribute;
    let unsafety = declaration.is_unsafe.then(|| quote!(unsafe));
    let associated = projection.associated.iter().map(|binding| {
        let name = &binding.name;
        let alias = &binding.alias;
        quote!(type #name = #alias;)
    });

    quote! {
        #[cfg(test)]
        #async_attribute
        #unsafety impl #name for #spy {
            #(#associated)*
            #(#items)*
        }
    }
}

fn supertrait_impls(declaration: &InterfaceDeclaration, spy: &Ident, shape: ConcurrencyShape) -> TokenStream {
    let isolation = match (&declaration.isolation_marker, shape) {
        (Some(marker), ConcurrencyShape::IsolatedLockedUnit) => Some(quote! {
            #[cfg(test)]
            impl #marker for #spy {}
        }),
        _ => None,
    };

    let debug = declaration.debug_supertrait.then(|| {
        let spy_name = spy.to_string();
        quote! {
            #[cfg(test)]
            impl ::std::fmt::Debug for #spy {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.debug_struct(#spy_name).finish_non_exhaustive()
                }
            }
        }
    });

    quote! {
        #isolation
        #debug
    }
}
