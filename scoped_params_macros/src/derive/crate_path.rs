//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[param(crate = "...")]` attribute value into the
//! tokens used in place of `scoped_params::` in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::scoped_params` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::scoped_params }, |path| quote! { #path })
}
