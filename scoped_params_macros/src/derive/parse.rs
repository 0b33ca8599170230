//! Attribute parsing for the `Params` derive.

use std::collections::HashSet;

use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Lit, LitStr};

/// A parameter contributed by one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Param {
    /// Field the parameter was declared by, with any `r#` prefix removed.
    pub field: Ident,
    /// Parameter name as seen by frames and lookups.
    pub name: String,
}

/// Everything the generator needs from the derive input.
#[derive(Debug, Default)]
pub(crate) struct ParsedInput {
    pub crate_path: Option<syn::Path>,
    pub params: Vec<Param>,
}

#[derive(Debug, Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

/// Iterate all `#[param(...)]` attributes and apply a callback to each key.
fn parse_param_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("param")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<Option<syn::Path>> {
    let mut crate_path = None;
    parse_param_attrs(attrs, |meta| {
        if meta.path.is_ident("crate") {
            crate_path = Some(lit_str(meta, "crate")?.parse::<syn::Path>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported struct attribute; expected `crate`"))
        }
    })?;
    Ok(crate_path)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_param_attrs(attrs, |meta| {
        if meta.path.is_ident("rename") {
            let name = lit_str(meta, "rename")?;
            if name.value().is_empty() {
                return Err(syn::Error::new(name.span(), "rename must not be empty"));
            }
            out.rename = Some(name.value());
            Ok(())
        } else if meta.path.is_ident("skip") {
            out.skip = true;
            Ok(())
        } else {
            Err(meta.error("unsupported field attribute; expected `rename` or `skip`"))
        }
    })?;
    Ok(out)
}

/// Collect the struct-level crate path and the declared parameters.
///
/// # Errors
///
/// Fails for enums, unions and tuple structs, for unknown or malformed
/// `#[param]` keys, and when two fields map to the same parameter name.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let crate_path = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Params requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Params can only be derived for structs",
            ));
        }
    };

    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref().map(IdentExt::unraw) else {
            continue;
        };
        let name = attrs.rename.unwrap_or_else(|| ident.to_string());
        if !seen.insert(name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate parameter name `{name}`"),
            ));
        }
        params.push(Param { field: ident, name });
    }
    Ok(ParsedInput { crate_path, params })
}
