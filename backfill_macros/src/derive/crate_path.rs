//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[backfill(crate = "...")]` attribute value into a
//! `TokenStream` that replaces the hardcoded `::backfill` path in generated
//! code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed type attribute.
///
/// Defaults to `::backfill` when no override is present.
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), ":: backfill");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::backfill }, |path| quote! { #path })
}
