// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/      → EntityDef, FieldDef, ColumnConfig, RenameRule
//! └── mapping.rs  → impl Entity (field table)
//! ```

mod mapping;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => mapping::generate(&entity).into(),
        Err(err) => err.write_errors().into()
    }
}
