// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Result row to entity.
//!
//! [`compile_inbound`] probes a representative row once and records, for every
//! field whose column is present, the column ordinal and the kind to read.
//! Fields without a matching column are dropped from the converter for good:
//! a later row that does carry the column still leaves them at their default.
//!
//! Per row, each retained field goes through:
//!
//! ```text
//! is_null(ordinal) ── yes ──► keep default
//!        │ no
//!        ▼
//! read_typed(ordinal, kind) ─► convert::coerce ─► setter
//! ```

use tracing::debug;

use crate::{
    convert,
    error::{ConversionError, Error, Result},
    mapping::{Entity, Setter},
    naming,
    row::RowAccessor,
    value::ValueKind
};

struct Binding<T> {
    field:   &'static str,
    column:  &'static str,
    ordinal: usize,
    kind:    ValueKind,
    set:     Setter<T>
}

impl<T> Binding<T> {
    fn failure(&self, source: ConversionError) -> Error {
        Error::TypeConversion {
            entity: std::any::type_name::<T>(),
            field: self.field,
            column: self.column.to_owned(),
            source
        }
    }
}

/// Compiled `&dyn RowAccessor -> T` converter.
pub struct InboundConverter<T> {
    bindings: Vec<Binding<T>>,
    skipped:  Vec<&'static str>
}

impl<T: Entity + Default> InboundConverter<T> {
    /// Build a new instance from one row.
    ///
    /// # Errors
    ///
    /// [`Error::TypeConversion`] if a stored value cannot become the field
    /// type, whether the accessor's read or the text bridge rejects it;
    /// driver errors from the accessor unchanged. The partially
    /// populated instance is discarded.
    pub fn convert(&self, row: &dyn RowAccessor) -> Result<T> {
        let mut entity = T::default();

        for binding in &self.bindings {
            if row.is_null(binding.ordinal)? {
                continue;
            }

            let raw = match row.read_typed(binding.ordinal, binding.kind) {
                Ok(raw) => raw,
                Err(Error::Conversion(source)) => return Err(binding.failure(source)),
                Err(err) => return Err(err)
            };
            convert::coerce(raw, binding.kind)
                .and_then(|value| (binding.set)(&mut entity, value))
                .map_err(|source| binding.failure(source))?;
        }

        Ok(entity)
    }

    /// Convert every row, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// See [`convert`](Self::convert).
    pub fn convert_all<'r, I, R>(&self, rows: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = &'r R>,
        R: RowAccessor + 'r
    {
        rows.into_iter().map(|row| self.convert(row)).collect()
    }
}

impl<T> InboundConverter<T> {
    /// Columns this converter reads, in field order.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|b| b.column)
    }

    /// Fields left out because the sample row lacked their column.
    #[must_use]
    pub fn skipped_fields(&self) -> &[&'static str] {
        &self.skipped
    }

    /// Check if `field` is populated by this converter.
    #[must_use]
    pub fn binds(&self, field: &str) -> bool {
        self.bindings.iter().any(|b| b.field == field)
    }
}

impl<T> std::fmt::Debug for InboundConverter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InboundConverter")
            .field("entity", &std::any::type_name::<T>())
            .field("columns", &self.columns().collect::<Vec<_>>())
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// Build the inbound converter for `T` against a sample row.
///
/// # Errors
///
/// [`Error::MappingConfiguration`] for blank overrides or ambiguous names;
/// any probing error other than [`Error::ColumnNotFound`].
pub fn compile_inbound<T: Entity>(sample: &dyn RowAccessor) -> Result<InboundConverter<T>> {
    let fields = T::field_mappings();
    let resolved = naming::resolve_all(&fields)?;

    let mut bindings = Vec::with_capacity(resolved.len());
    let mut skipped = Vec::new();

    for (field, column) in resolved {
        match sample.ordinal_of(column) {
            Ok(ordinal) => bindings.push(Binding {
                field: field.ident(),
                column,
                ordinal,
                kind: field.kind(),
                set: field.setter()
            }),
            Err(Error::ColumnNotFound(_)) => {
                debug!(
                    entity = std::any::type_name::<T>(),
                    field = field.ident(),
                    column,
                    "column absent from sample row, field skipped"
                );
                skipped.push(field.ident());
            }
            Err(err) => return Err(err)
        }
    }

    debug!(
        entity = std::any::type_name::<T>(),
        bound = bindings.len(),
        skipped = skipped.len(),
        "compiled inbound converter"
    );

    Ok(InboundConverter {
        bindings,
        skipped
    })
}
