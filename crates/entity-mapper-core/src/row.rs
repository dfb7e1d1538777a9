// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Row access abstraction.
//!
//! A [`RowAccessor`] is one positioned result row as seen by the inbound
//! converter. Drivers implement it over their native row type; [`ValueRow`]
//! is an owned in-memory row used by [`DataTable`](crate::DataTable) and in
//! tests.

use crate::{
    error::{Error, Result, RowShapeError},
    value::{Value, ValueKind}
};

/// One positioned result row.
///
/// Implementations need not be thread-safe. The inbound compiler only uses
/// the accessor it is handed for the duration of one call.
pub trait RowAccessor {
    /// Find the ordinal of a column, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// [`Error::ColumnNotFound`] if the row has no such column, any other
    /// error for driver failures.
    fn ordinal_of(&self, column: &str) -> Result<usize>;

    /// Check if the value at `ordinal` is null.
    ///
    /// # Errors
    ///
    /// Driver failures; [`Error::RowShape`] for an ordinal past the end.
    fn is_null(&self, ordinal: usize) -> Result<bool>;

    /// Read the value at `ordinal` as `kind`.
    ///
    /// Accessors return a value of `kind` when the stored representation
    /// allows it, or the stored text as [`Value::Text`], which the inbound
    /// converter then parses.
    ///
    /// # Errors
    ///
    /// Driver failures, [`Error::RowShape`] for an ordinal past the end,
    /// [`Error::Conversion`] for incompatible stored values.
    fn read_typed(&self, ordinal: usize, kind: ValueKind) -> Result<Value>;
}

impl<R: RowAccessor + ?Sized> RowAccessor for &R {
    fn ordinal_of(&self, column: &str) -> Result<usize> {
        (**self).ordinal_of(column)
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        (**self).is_null(ordinal)
    }

    fn read_typed(&self, ordinal: usize, kind: ValueKind) -> Result<Value> {
        (**self).read_typed(ordinal, kind)
    }
}

/// Check whether `row` has a column named `column`.
///
/// Any lookup failure, including driver errors, counts as absent.
pub fn has_column(row: &dyn RowAccessor, column: &str) -> bool {
    row.ordinal_of(column).is_ok()
}

/// Case-insensitive lookup of `column` in a list of names.
pub(crate) fn position_of<S: AsRef<str>>(columns: &[S], column: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| c.as_ref().eq_ignore_ascii_case(column))
        .ok_or_else(|| Error::ColumnNotFound(column.to_owned()))
}

/// Read a value out of an owned slice, casting numerics to `kind`.
pub(crate) fn read_slot(values: &[Value], ordinal: usize, kind: ValueKind) -> Result<Value> {
    let value = slot(values, ordinal)?.clone();
    Ok(value.cast(kind)?)
}

pub(crate) fn slot(values: &[Value], ordinal: usize) -> Result<&Value> {
    values
        .get(ordinal)
        .ok_or_else(|| {
            Error::from(RowShapeError::OrdinalOutOfRange {
                ordinal,
                width: values.len()
            })
        })
}

/// Owned row of named values.
///
/// # Example
///
/// ```rust
/// use entity_mapper_core::{RowAccessor, Value, ValueRow};
///
/// let row = ValueRow::new()
///     .with("Name", "Ann")
///     .with("Age", Value::Null);
///
/// assert_eq!(row.ordinal_of("age").unwrap(), 1);
/// assert!(row.is_null(1).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRow {
    columns: Vec<String>,
    values:  Vec<Value>
}

impl ValueRow {
    /// Create an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            values:  Vec::new()
        }
    }

    /// Append a column.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a column in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push(column.into());
        self.values.push(value.into());
    }

    /// Column names in ordinal order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in ordinal order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of a column by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        position_of(&self.columns, column)
            .ok()
            .and_then(|i| self.values.get(i))
    }
}

impl FromIterator<(String, Value)> for ValueRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let (columns, values) = iter.into_iter().unzip();
        Self {
            columns,
            values
        }
    }
}

impl RowAccessor for ValueRow {
    fn ordinal_of(&self, column: &str) -> Result<usize> {
        position_of(&self.columns, column)
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        slot(&self.values, ordinal).map(Value::is_null)
    }

    fn read_typed(&self, ordinal: usize, kind: ValueKind) -> Result<Value> {
        read_slot(&self.values, ordinal, kind)
    }
}
