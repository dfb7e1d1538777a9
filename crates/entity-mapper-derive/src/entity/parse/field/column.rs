// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level `#[column(...)]` configuration.
//!
//! | Attribute | Example | Effect |
//! |-----------|---------|--------|
//! | `name` | `#[column(name = "EMail")]` | Column and parameter name |

use syn::{Attribute, LitStr};

/// Parsed `#[column(...)]` attribute.
#[derive(Debug, Clone, Default)]
pub struct ColumnConfig {
    /// Explicit column name, kept as a literal for error spans.
    pub name: Option<LitStr>
}

impl ColumnConfig {
    /// Parse from a `#[column(...)]` attribute.
    ///
    /// # Errors
    ///
    /// Unknown keys, a repeated `name`, or a value that is not a string
    /// literal.
    pub fn from_attr(attr: &Attribute) -> syn::Result<Self> {
        let mut config = Self::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let _: syn::Token![=] = meta.input.parse()?;
                let value: LitStr = meta.input.parse()?;
                if config.name.is_some() {
                    return Err(meta.error("duplicate `name` option"));
                }
                config.name = Some(value);
                Ok(())
            } else {
                Err(meta.error("unknown column option, expected `name`"))
            }
        })?;

        Ok(config)
    }

    /// Explicit name, if any.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.name.as_ref().map(LitStr::value)
    }
}
