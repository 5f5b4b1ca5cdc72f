//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro builds the compile-time field table behind `listquery::Record`,
//! an index-based accessor over it, and field name constants for building
//! filters without string typos.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_container_attrs, parse_field_attrs};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let container = parse_container_attrs(&input.attrs)?;

    let mut field_defs: Vec<TokenStream> = Vec::new();
    let mut value_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut bounds: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let ident = field_name.unraw().to_string();
        let alias = attrs
            .rename
            .or_else(|| container.rename_all.map(|rule| rule.apply(&ident)));
        let flatten = attrs.flatten;

        let alias_tokens = match &alias {
            Some(name) => quote! { ::core::option::Option::Some(#name) },
            None => quote! { ::core::option::Option::None },
        };
        field_defs.push(quote! {
            ::listquery::FieldDef::new(#ident, #alias_tokens, #flatten)
        });

        let index = field_defs.len() - 1;
        value_arms.push(quote! {
            #index => ::core::option::Option::Some(::listquery::AsValue::as_value(&self.#field_name)),
        });

        let ty = &field.ty;
        bounds.push(quote! { #ty: ::listquery::AsValue });

        // Flattened fields are never addressed by their own name
        if !flatten {
            let query_name = alias.unwrap_or(ident);
            let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
            field_constants.push(quote! {
                /// Field name constant for filter and sort paths.
                pub const #const_name: &'static str = #query_name;
            });
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Generic field types need their conversions spelled out
    let where_clause = if input.generics.params.is_empty() {
        quote! { #where_clause }
    } else {
        let existing = where_clause.into_iter().flat_map(|w| w.predicates.iter());
        quote! { where #(#existing,)* #(#bounds,)* }
    };

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::listquery::Record for #struct_name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::listquery::FieldDef] {
                const FIELDS: &[::listquery::FieldDef] = &[
                    #(#field_defs),*
                ];
                FIELDS
            }

            fn field_value(&self, index: usize) -> ::core::option::Option<::listquery::Value<'_>> {
                match index {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::listquery::AsValue for #struct_name #ty_generics #where_clause {
            fn as_value(&self) -> ::listquery::Value<'_> {
                ::listquery::Value::Record(self)
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
