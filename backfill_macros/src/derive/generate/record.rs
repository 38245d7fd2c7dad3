//! Method bodies for structs.

use proc_macro2::TokenStream;
use quote::quote;

use super::{exposed, param_names};
use crate::derive::parse::ParsedField;

pub(super) fn methods(fields: &[ParsedField], krate: &TokenStream) -> TokenStream {
    let members: Vec<_> = exposed(fields).map(|field| &field.member).collect();
    let (defaults, merger, relink) = param_names(!members.is_empty());
    let copies = fields.iter().map(|field| {
        let member = &field.member;
        if field.attrs.skip {
            quote! { #member: ::core::clone::Clone::clone(&self.#member) }
        } else {
            quote! { #member: #krate::Mergeable::fresh_copy(&self.#member) }
        }
    });

    quote! {
        fn is_zero(&self) -> bool {
            true #( && #krate::Mergeable::is_zero(&self.#members) )*
        }

        fn fresh_copy(&self) -> Self {
            Self { #( #copies, )* }
        }

        fn kind(&self) -> #krate::NodeKind {
            #krate::NodeKind::Record
        }

        fn merge_from(&mut self, #defaults: &Self) {
            #( #krate::merge_field(&mut self.#members, &#defaults.#members); )*
        }

        fn walk(
            &mut self,
            #merger: &mut #krate::Merger<'_>,
        ) -> #krate::MergeResult<()> {
            #( #merger.visit(&mut self.#members)?; )*
            ::core::result::Result::Ok(())
        }

        fn relink(&mut self, #relink: &mut #krate::Relink) {
            #( #krate::Mergeable::relink(&mut self.#members, #relink); )*
        }
    }
}
