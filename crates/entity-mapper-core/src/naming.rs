// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column-name resolution.
//!
//! A field binds to its explicit `#[column(name = "...")]` override when one
//! is declared, otherwise to its own identifier. Matching against database
//! columns ignores ASCII case.

use crate::{
    error::{Error, Result},
    mapping::FieldMapping
};

/// External name a field binds to.
#[must_use]
pub fn resolve<T>(field: &FieldMapping<T>) -> &'static str {
    field.column_override().unwrap_or(field.ident())
}

/// Check that an override is usable as a column name.
///
/// # Errors
///
/// [`Error::MappingConfiguration`] for empty or whitespace-only names.
pub fn validate_override<T>(field: &FieldMapping<T>) -> Result<()> {
    match field.column_override() {
        Some(name) if name.trim().is_empty() => Err(Error::configuration::<T>(format!(
            "column override on field `{}` cannot be blank",
            field.ident()
        ))),
        _ => Ok(())
    }
}

/// Resolve every field of `T`, rejecting blank overrides and ambiguity.
///
/// Returns `(field, name)` pairs in declaration order.
///
/// # Errors
///
/// [`Error::MappingConfiguration`] if an override is blank or two fields
/// resolve to the same name ignoring case.
pub fn resolve_all<T>(fields: &[FieldMapping<T>]) -> Result<Vec<(&FieldMapping<T>, &'static str)>> {
    let mut resolved: Vec<(&FieldMapping<T>, &'static str)> = Vec::with_capacity(fields.len());

    for field in fields {
        validate_override(field)?;
        let name = resolve(field);

        if let Some((other, _)) = resolved
            .iter()
            .find(|(_, seen)| seen.eq_ignore_ascii_case(name))
        {
            return Err(Error::configuration::<T>(format!(
                "fields `{}` and `{}` both map to column `{name}`",
                other.ident(),
                field.ident()
            )));
        }

        resolved.push((field, name));
    }

    Ok(resolved)
}
