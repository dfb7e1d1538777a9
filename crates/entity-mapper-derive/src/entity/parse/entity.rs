// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity definition: struct attributes plus parsed fields.
//!
//! Parsing rejects mistakes that would otherwise surface at runtime as
//! configuration errors:
//!
//! - blank `#[column(name = "")]`
//! - two mapped fields resolving to the same column, ignoring ASCII case

mod attrs;

use darling::FromDeriveInput;
use syn::{DeriveInput, Generics, Ident};

use self::attrs::EntityAttrs;
use super::{FieldDef, RenameRule};

/// Complete parsed entity.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Runtime crate path.
    pub krate: syn::Path,

    /// Naming rule for fields without an explicit name.
    pub rename_all: Option<RenameRule>,

    /// All named fields in declaration order, mapped or not.
    pub fields: Vec<FieldDef>
}

impl EntityDef {
    /// Parse and validate from a derive input.
    ///
    /// # Errors
    ///
    /// Unsupported shapes, malformed attributes, blank column names and
    /// duplicate columns. All problems found are reported together.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let named = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named,
                _ => {
                    return Err(darling::Error::custom("Entity requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Entity can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let attrs = EntityAttrs::from_derive_input(input)?;

        let mut errors = darling::Error::accumulator();
        let fields: Vec<FieldDef> = named
            .named
            .iter()
            .filter_map(|f| errors.handle(FieldDef::from_field(f)))
            .collect();
        let fields = errors.finish_with(fields)?;

        let entity = Self {
            ident: attrs.ident,
            generics: attrs.generics,
            krate: attrs.krate,
            rename_all: attrs.rename_all,
            fields
        };
        entity.validate()?;
        Ok(entity)
    }

    /// Fields that take part in mapping.
    pub fn mapped_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_mapped())
    }

    /// Column name to emit as an override, if it differs from the field
    /// name.
    ///
    /// An explicit `#[column(name)]` wins over `rename_all`.
    #[must_use]
    pub fn column_override(&self, field: &FieldDef) -> Option<String> {
        field.column.name().or_else(|| {
            self.rename_all
                .map(|rule| rule.apply(&field.name()))
                .filter(|renamed| *renamed != field.name())
        })
    }

    /// Column the field resolves to.
    #[must_use]
    pub fn column_name(&self, field: &FieldDef) -> String {
        self.column_override(field).unwrap_or_else(|| field.name())
    }

    fn validate(&self) -> darling::Result<()> {
        let mut errors = darling::Error::accumulator();
        let mut seen: Vec<(String, &FieldDef)> = Vec::new();

        for field in self.mapped_fields() {
            if let Some(lit) = &field.column.name
                && lit.value().trim().is_empty()
            {
                errors.push(darling::Error::custom("column name cannot be blank").with_span(lit));
                continue;
            }

            let column = self.column_name(field);
            match seen.iter().find(|(c, _)| c.eq_ignore_ascii_case(&column)) {
                Some((_, first)) => errors.push(
                    darling::Error::custom(format!(
                        "field `{}` maps to column `{column}`, already used by field `{}`",
                        field.name(),
                        first.name()
                    ))
                    .with_span(&field.ident)
                ),
                None => seen.push((column, field))
            }
        }

        errors.finish()
    }
}
