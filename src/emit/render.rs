//! Validation and pretty-printing of emitted tokens.

use proc_macro2::TokenStream;

/// Parses emitted tokens back into a file, proving they are well-formed.
pub fn validate(tokens: &TokenStream) -> syn::Result<syn::File> {
    syn::parse2(tokens.clone())
}

/// Formats a validated file.
pub fn pretty(file: &syn::File) -> String {
    prettyplease::unparse(file)
}
