// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.

mod column;

pub use column::ColumnConfig;
use syn::{Field, Ident, Type, Visibility, ext::IdentExt};

/// One named field of the entity struct.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field identifier, possibly raw (`r#type`).
    pub ident: Ident,

    /// Declared type.
    pub ty: Type,

    /// Declared visibility.
    pub vis: Visibility,

    /// `#[column(...)]` configuration.
    pub column: ColumnConfig
}

impl FieldDef {
    /// Parse a field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Unnamed fields and malformed `#[column(...)]` attributes.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;

        let mut column = ColumnConfig::default();
        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                column = ColumnConfig::from_attr(attr)?;
            }
        }

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            vis: field.vis.clone(),
            column
        })
    }

    /// Field name without the `r#` prefix.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Check if the field takes part in mapping.
    ///
    /// Private fields are left alone.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        !matches!(self.vis, Visibility::Inherited)
    }
}
