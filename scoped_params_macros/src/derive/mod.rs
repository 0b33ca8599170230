//! Expansion of the `Params` derive.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;

/// Parse `input` and generate the schema implementation.
pub(crate) fn expand(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let crate_path = crate_path::resolve(parsed.crate_path.as_ref());
    Ok(generate::schema_impl(input, &parsed.params, &crate_path))
}
