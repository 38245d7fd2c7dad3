//! Attribute and input parsing for the `Mergeable` derive.

use syn::{Attribute, Token, parenthesized};

mod input;
mod literals;

pub(crate) use input::{ParsedField, ParsedInput, ParsedVariant, Shape, parse_input};
use literals::lit_str;

/// Type-level `#[backfill(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct TypeAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[backfill(crate = "my_alias")]`, generated code
    /// references items through `my_alias::` instead of `::backfill::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[backfill(...)]` attributes.
///
/// - `skip` hides the field from zero detection, merging and traversal. The
///   field is cloned when the value is copied.
#[derive(Default, Clone, Copy)]
pub(crate) struct FieldAttrs {
    pub skip: bool,
}

/// Iterate all `#[backfill(...)]` attributes once and apply a callback.
fn parse_backfill<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("backfill")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[backfill(...)]` metadata applied to a struct or enum.
///
/// Only `crate` is recognised. Unknown keys are ignored so callers keep
/// compiling when new attributes appear.
pub(crate) fn parse_type_attrs(attrs: &[Attribute]) -> syn::Result<TypeAttrs> {
    let mut out = TypeAttrs::default();
    parse_backfill(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            return Ok(());
        }
        discard_unknown(meta)
    })?;
    Ok(out)
}

/// Parses field-level `#[backfill(...)]` attributes.
///
/// Accepts `skip` and `skip = true|false`. Unknown keys are ignored, matching
/// [`parse_type_attrs`].
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_backfill(attrs, |meta| {
        if meta.path.is_ident("skip") {
            out.skip = if meta.input.peek(Token![=]) {
                meta.value()?.parse::<syn::LitBool>()?.value
            } else {
                true
            };
            return Ok(());
        }
        discard_unknown(meta)
    })?;
    Ok(out)
}
