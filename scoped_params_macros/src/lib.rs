//! Procedural macros for `scoped_params`.
//!
//! The [`Params`] derive turns a struct with named fields into a parameter
//! schema. Each field contributes one parameter name, taken from the field
//! identifier unless `#[param(rename = "...")]` overrides it, and fields
//! marked `#[param(skip)]` are left out. The struct also gains one
//! associated `&'static str` constant per parameter, named after the field
//! in `SCREAMING_SNAKE_CASE`, so call sites can refer to parameters without
//! repeating string literals.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `scoped_params::ParamSchema`.
///
/// Recognised attributes:
///
/// - `#[param(crate = "path")]` on the struct, when `scoped_params` is
///   reachable under another name;
/// - `#[param(rename = "name")]` on a field;
/// - `#[param(skip)]` on a field.
#[proc_macro_derive(Params, attributes(param))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
