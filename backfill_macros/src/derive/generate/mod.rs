//! Token generation for `Mergeable` implementations.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Generics, Member, parse_quote};

use super::parse::{ParsedField, ParsedInput, Shape};

mod record;
mod variants;

/// Assembles the `impl Mergeable` block for `input`.
pub(crate) fn mergeable_impl(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let generics = with_mergeable_bounds(&input.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let body = match &input.shape {
        Shape::Struct(fields) => record::methods(fields, krate),
        Shape::Enum(variants) => variants::methods(variants, krate),
    };
    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Mergeable for #ident #ty_generics #where_clause {
            #body
        }
    }
}

/// Adds a `Mergeable` bound to every type parameter.
fn with_mergeable_bounds(generics: &Generics, krate: &TokenStream) -> Generics {
    let mut out = generics.clone();
    let params: Vec<_> = out.type_params().map(|param| param.ident.clone()).collect();
    let clause = out.make_where_clause();
    for param in params {
        clause
            .predicates
            .push(parse_quote!(#param: #krate::Mergeable));
    }
    out
}

/// Fields the engine sees, i.e. those not marked `#[backfill(skip)]`.
fn exposed(fields: &[ParsedField]) -> impl Iterator<Item = &ParsedField> {
    fields.iter().filter(|field| !field.attrs.skip)
}

/// Binding used for a field of the value being filled.
fn value_binding(member: &Member) -> syn::Ident {
    match member {
        Member::Named(ident) => format_ident!("__value_{}", ident),
        Member::Unnamed(index) => format_ident!("__value_{}", index.index),
    }
}

/// Binding used for the matching field of a default.
fn default_binding(member: &Member) -> syn::Ident {
    match member {
        Member::Named(ident) => format_ident!("__default_{}", ident),
        Member::Unnamed(index) => format_ident!("__default_{}", index.index),
    }
}

/// Parameter names for `merge_from` and `walk`, underscored when unused.
fn param_names(has_exposed: bool) -> (syn::Ident, syn::Ident, syn::Ident) {
    let prefix = if has_exposed { "" } else { "_" };
    (
        format_ident!("{prefix}defaults"),
        format_ident!("{prefix}merger"),
        format_ident!("{prefix}relink"),
    )
}
