// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Entity` generation.
//!
//! For
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! pub struct Person {
//!     #[column(name = "FullName")]
//!     pub name: String,
//! }
//! ```
//!
//! the macro emits
//!
//! ```rust,ignore
//! impl ::entity_mapper::Entity for Person {
//!     fn field_mappings() -> Vec<::entity_mapper::FieldMapping<Self>> {
//!         vec![
//!             ::entity_mapper::FieldMapping::new(
//!                 "name",
//!                 <String as ::entity_mapper::FromValue>::KIND,
//!                 |entity: &Self| ::entity_mapper::ToValue::to_value(&entity.name),
//!                 |entity: &mut Self, value| { entity.name = ...from_value(value)?; Ok(()) }
//!             )
//!             .with_column("FullName"),
//!         ]
//!     }
//! }
//! ```
//!
//! Getters and setters are non-capturing closures, coerced to the plain
//! function pointers `FieldMapping` stores.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, FieldDef};

/// Generate the `Entity` implementation.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let krate = &entity.krate;
    let ident = &entity.ident;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();
    let mappings = entity.mapped_fields().map(|f| field_mapping(entity, f));

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Entity for #ident #ty_generics #where_clause {
            fn field_mappings() -> ::std::vec::Vec<#krate::FieldMapping<Self>> {
                ::std::vec![#(#mappings),*]
            }
        }
    }
}

fn field_mapping(entity: &EntityDef, field: &FieldDef) -> TokenStream {
    let krate = &entity.krate;
    let ident = &field.ident;
    let ty = &field.ty;
    let name = field.name();
    let column = entity
        .column_override(field)
        .map(|column| quote! { .with_column(#column) });

    quote! {
        #krate::FieldMapping::new(
            #name,
            <#ty as #krate::FromValue>::KIND,
            |entity: &Self| #krate::ToValue::to_value(&entity.#ident),
            |entity: &mut Self, value: #krate::Value|
                -> ::core::result::Result<(), #krate::ConversionError> {
                entity.#ident = <#ty as #krate::FromValue>::from_value(value)?;
                ::core::result::Result::Ok(())
            }
        )
        #column
    }
}
