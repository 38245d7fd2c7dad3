//! Procedural macros for `backfill`.
//!
//! The [`Mergeable`](macro@Mergeable) derive teaches the merge engine how to
//! inspect and fill a struct or enum: how to tell whether it is zero, how to
//! copy it, how to absorb a default of the same type, and which fields to
//! descend into.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `backfill::Mergeable`.
///
/// Every field type must itself implement `Mergeable`, except fields marked
/// `#[backfill(skip)]`, which are ignored by the merge and cloned when the
/// value is copied.
///
/// Structs are zero when every exposed field is zero. Enums are never zero;
/// a default only merges into a value holding the same variant.
///
/// ```rust,ignore
/// use backfill::Mergeable;
///
/// #[derive(Clone, Mergeable)]
/// #[backfill(crate = "my_alias")]
/// struct Pool {
///     size: u32,
///     #[backfill(skip)]
///     label: &'static str,
/// }
/// ```
#[proc_macro_derive(Mergeable, attributes(backfill))]
pub fn derive_mergeable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
