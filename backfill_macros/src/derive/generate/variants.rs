//! Method bodies for enums.
//!
//! Enums behave as tagged unions: they are never zero, and a default only
//! merges into a value holding the same variant. Enums without any exposed
//! field carry no structure and report themselves as scalars.

use proc_macro2::TokenStream;
use quote::quote;

use super::{default_binding, exposed, param_names, value_binding};
use crate::derive::parse::ParsedVariant;

pub(super) fn methods(variants: &[ParsedVariant], krate: &TokenStream) -> TokenStream {
    let copy_arms = variants.iter().map(|variant| copy_arm(variant, krate));

    let active: Vec<_> = variants
        .iter()
        .filter(|variant| exposed(&variant.fields).next().is_some())
        .collect();
    let (defaults, merger, relink) = param_names(!active.is_empty());
    let merge_arms = active.iter().map(|variant| merge_arm(variant, krate));
    let walk_arms = active.iter().map(|variant| walk_arm(variant, &merger));
    let relink_arms = active
        .iter()
        .map(|variant| relink_arm(variant, &relink, krate));

    // Pairs of different variants always need a catch-all.
    let merge_fallback = (variants.len() > 1).then(|| quote! { _ => {} });
    let walk_fallback = (active.len() < variants.len()).then(|| quote! { _ => {} });
    let relink_fallback = walk_fallback.clone();

    let merge_body = if active.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            match (self, #defaults) {
                #( #merge_arms )*
                #merge_fallback
            }
        }
    };
    let walk_body = if active.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            match self {
                #( #walk_arms )*
                #walk_fallback
            }
        }
    };
    let relink_body = if active.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            match self {
                #( #relink_arms )*
                #relink_fallback
            }
        }
    };
    let kind = if active.is_empty() {
        quote! { #krate::NodeKind::Scalar }
    } else {
        quote! { #krate::NodeKind::Dynamic }
    };

    quote! {
        fn is_zero(&self) -> bool {
            false
        }

        fn fresh_copy(&self) -> Self {
            match self {
                #( #copy_arms )*
            }
        }

        fn kind(&self) -> #krate::NodeKind {
            #kind
        }

        fn merge_from(&mut self, #defaults: &Self) {
            #merge_body
        }

        fn walk(
            &mut self,
            #merger: &mut #krate::Merger<'_>,
        ) -> #krate::MergeResult<()> {
            #walk_body
            ::core::result::Result::Ok(())
        }

        fn relink(&mut self, #relink: &mut #krate::Relink) {
            #relink_body
        }
    }
}

fn copy_arm(variant: &ParsedVariant, krate: &TokenStream) -> TokenStream {
    let ident = &variant.ident;
    let members: Vec<_> = variant.fields.iter().map(|field| &field.member).collect();
    let bindings: Vec<_> = members.iter().map(|member| value_binding(member)).collect();
    let copies = variant.fields.iter().zip(&bindings).map(|(field, binding)| {
        if field.attrs.skip {
            quote! { ::core::clone::Clone::clone(#binding) }
        } else {
            quote! { #krate::Mergeable::fresh_copy(#binding) }
        }
    });
    quote! {
        Self::#ident { #( #members: #bindings ),* } => Self::#ident { #( #members: #copies ),* },
    }
}

fn merge_arm(variant: &ParsedVariant, krate: &TokenStream) -> TokenStream {
    let ident = &variant.ident;
    let members: Vec<_> = exposed(&variant.fields).map(|field| &field.member).collect();
    let values: Vec<_> = members.iter().map(|member| value_binding(member)).collect();
    let defaults: Vec<_> = members.iter().map(|member| default_binding(member)).collect();
    quote! {
        (
            Self::#ident { #( #members: #values, )* .. },
            Self::#ident { #( #members: #defaults, )* .. },
        ) => {
            #( #krate::merge_field(#values, #defaults); )*
        }
    }
}

fn walk_arm(variant: &ParsedVariant, merger: &syn::Ident) -> TokenStream {
    let ident = &variant.ident;
    let members: Vec<_> = exposed(&variant.fields).map(|field| &field.member).collect();
    let values: Vec<_> = members.iter().map(|member| value_binding(member)).collect();
    quote! {
        Self::#ident { #( #members: #values, )* .. } => {
            #( #merger.visit(#values)?; )*
        }
    }
}

fn relink_arm(variant: &ParsedVariant, relink: &syn::Ident, krate: &TokenStream) -> TokenStream {
    let ident = &variant.ident;
    let members: Vec<_> = exposed(&variant.fields).map(|field| &field.member).collect();
    let values: Vec<_> = members.iter().map(|member| value_binding(member)).collect();
    quote! {
        Self::#ident { #( #members: #values, )* .. } => {
            #( #krate::Mergeable::relink(#values, #relink); )*
        }
    }
}
