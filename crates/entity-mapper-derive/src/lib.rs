// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Derive macro for `entity-mapper`.
//!
//! This crate is an implementation detail. Depend on `entity-mapper`, which
//! re-exports [`Entity`](macro@Entity).
//!
//! # Attribute Quick Reference
//!
//! ## Struct-Level `#[entity(...)]`
//!
//! | Attribute | Default | Description |
//! |-----------|---------|-------------|
//! | `rename_all` | none | Column naming rule for fields without an explicit name |
//! | `crate` | `::entity_mapper` | Path to the runtime crate |
//!
//! ## Field-Level `#[column(...)]`
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `name = "..."` | Explicit column (and parameter) name |
//!
//! ```rust,ignore
//! use entity_mapper::Entity;
//!
//! #[derive(Debug, Default, Entity)]
//! #[entity(rename_all = "PascalCase")]
//! pub struct Person {
//!     pub name: String,
//!     pub age: Option<i32>,
//!
//!     #[column(name = "EMail")]
//!     pub email: String,
//!
//!     // Private fields are not mapped.
//!     cache: Vec<u8>,
//! }
//! ```
//!
//! Only visible fields (`pub`, `pub(crate)`, ...) are mapped, in declaration
//! order. Every mapped field type must implement both `ToValue` and
//! `FromValue`.
//!
//! # Rename Rules
//!
//! | Rule | `created_at` becomes |
//! |------|----------------------|
//! | `"PascalCase"` | `CreatedAt` |
//! | `"camelCase"` | `createdAt` |
//! | `"snake_case"` | `created_at` |
//! | `"SCREAMING_SNAKE_CASE"` | `CREATED_AT` |
//! | `"kebab-case"` | `created-at` |
//! | `"lowercase"` | `created_at` |
//! | `"UPPERCASE"` | `CREATED_AT` |
//!
//! # Compile-Time Checks
//!
//! | Mistake | Error |
//! |---------|-------|
//! | `#[column(name = "")]` | column name cannot be blank |
//! | Two fields resolving to the same column, ignoring case | duplicate column |
//! | Unknown `#[column(...)]` or `#[entity(...)]` key | unknown option |
//! | Enum, tuple struct or unit struct | named structs only |

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod entity;

use proc_macro::TokenStream;

/// Derive the field table used by `entity-mapper` converters.
///
/// Generates `impl Entity for T`, listing every visible field with its
/// column name, value kind, getter and setter.
///
/// ```rust,ignore
/// #[derive(Default, Entity)]
/// pub struct Order {
///     pub id: i64,
///     #[column(name = "Total")]
///     pub amount: f64,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity, column))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
