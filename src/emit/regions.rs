//! Re-threads `#[cfg]` regions around generated code.

use crate::model::{CfgPredicate, RegionNode};
use proc_macro2::TokenStream;
use quote::quote;

/// Stacked `#[cfg(..)]` attributes, equivalent to nesting the regions.
pub(crate) fn cfg_attrs(chain: &[CfgPredicate]) -> TokenStream {
    let predicates = chain.iter().map(CfgPredicate::tokens);
    quote!(#(#[cfg(#predicates)])*)
}

/// Reset statements in member order, each region wrapped in a gated block.
pub(crate) fn nested_statements(nodes: &[RegionNode], statements: &[Vec<TokenStream>]) -> TokenStream {
    let rendered = nodes.iter().map(|node| match node {
        RegionNode::Member(index) => {
            let member = statements.get(*index).map(Vec::as_slice).unwrap_or_default();
            quote!(#(#member)*)
        }
        RegionNode::Region {
            predicate,
            children,
        } => {
            let predicate = predicate.tokens();
            let inner = nested_statements(children, statements);
            quote! {
                #[cfg(#predicate)]
                {
                    #inner
                }
            }
        }
    });
    quote!(#(#rendered)*)
}
