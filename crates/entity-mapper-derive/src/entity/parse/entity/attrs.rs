// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level attribute parsing with darling.
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `rename_all` | No | none | [`RenameRule`] for unnamed columns |
//! | `crate` | No | `::entity_mapper` | Runtime crate path |

use darling::FromDeriveInput;
use syn::{Generics, Ident};

use crate::entity::parse::RenameRule;

/// Default path of the runtime crate.
pub fn default_crate_path() -> syn::Path {
    syn::parse_quote!(::entity_mapper)
}

/// Attributes parsed from `#[entity(...)]`.
///
/// ```rust,ignore
/// #[entity(rename_all = "PascalCase", crate = "my_reexport::mapper")]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
pub struct EntityAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics, carried into the generated impl.
    pub generics: Generics,

    /// Naming rule for fields without `#[column(name)]`.
    #[darling(default)]
    pub rename_all: Option<RenameRule>,

    /// Path the generated code uses to reach the runtime crate.
    #[darling(rename = "crate", default = "default_crate_path")]
    pub krate: syn::Path
}
