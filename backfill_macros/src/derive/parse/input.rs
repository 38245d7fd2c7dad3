//! Input parsing for the `Mergeable` derive.
//!
//! Gathers the type identifier, generics, fields and attribute metadata in
//! one pass so expansion can fail fast with a spanned error.

use syn::{Data, DeriveInput, Fields, GenericParam, Member};

use super::{FieldAttrs, TypeAttrs, parse_field_attrs, parse_type_attrs};

/// A field together with its parsed attributes.
pub(crate) struct ParsedField {
    pub member: Member,
    pub attrs: FieldAttrs,
}

/// An enum variant and its fields.
pub(crate) struct ParsedVariant {
    pub ident: syn::Ident,
    pub fields: Vec<ParsedField>,
}

/// Structural shape of the derive target.
pub(crate) enum Shape {
    Struct(Vec<ParsedField>),
    Enum(Vec<ParsedVariant>),
}

/// Everything the generators need from the derive input.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub attrs: TypeAttrs,
    pub shape: Shape,
}

/// Parses and validates the derive input.
///
/// Rejects unions, enums without variants and types with lifetime
/// parameters, none of which can satisfy `Mergeable`'s `'static` bound or
/// carry a meaningful merge.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    if let Some(lifetime) = input.generics.params.iter().find_map(|param| match param {
        GenericParam::Lifetime(def) => Some(&def.lifetime),
        _ => None,
    }) {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Mergeable cannot be derived for types with lifetime parameters",
        ));
    }

    let attrs = parse_type_attrs(&input.attrs)?;
    let shape = match &input.data {
        Data::Struct(data) => Shape::Struct(parse_fields(&data.fields)?),
        Data::Enum(data) => {
            if data.variants.is_empty() {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Mergeable cannot be derived for enums without variants",
                ));
            }
            let variants = data
                .variants
                .iter()
                .map(|variant| {
                    Ok(ParsedVariant {
                        ident: variant.ident.clone(),
                        fields: parse_fields(&variant.fields)?,
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?;
            Shape::Enum(variants)
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Mergeable cannot be derived for unions",
            ));
        }
    };

    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        shape,
    })
}

fn parse_fields(fields: &Fields) -> syn::Result<Vec<ParsedField>> {
    fields
        .iter()
        .zip(fields.members())
        .map(|(field, member)| {
            Ok(ParsedField {
                member,
                attrs: parse_field_attrs(&field.attrs)?,
            })
        })
        .collect()
}
