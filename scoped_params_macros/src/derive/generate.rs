//! Token generation for the `Params` derive.

use heck::ToShoutySnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use super::parse::Param;

/// Name of the associated constant generated for `param`.
pub(crate) fn const_ident(param: &Param) -> syn::Ident {
    format_ident!("{}", param.field.to_string().to_shouty_snake_case())
}

/// Implement `ParamSchema` and the per-parameter name constants.
pub(crate) fn schema_impl(
    input: &DeriveInput,
    params: &[Param],
    crate_path: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let names: Vec<_> = params.iter().map(|param| param.name.as_str()).collect();
    let consts = params.iter().map(|param| {
        let const_name = const_ident(param);
        let name = &param.name;
        let doc = format!("Parameter name bound by the `{}` field.", param.field);
        quote! {
            #[doc = #doc]
            pub const #const_name: &'static str = #name;
        }
    });

    quote! {
        impl #impl_generics #crate_path::ParamSchema for #ident #ty_generics #where_clause {
            fn parameter_names() -> &'static [&'static str] {
                &[#(#names),*]
            }
        }

        impl #impl_generics #ident #ty_generics #where_clause {
            #(#consts)*
        }
    }
}
