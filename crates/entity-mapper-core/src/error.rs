// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types.
//!
//! # Overview
//!
//! | Variant | Raised by | Surfaced to caller |
//! |---------|-----------|--------------------|
//! | [`Error::MappingConfiguration`] | converter build | yes, build fails, cache untouched |
//! | [`Error::ColumnNotFound`] | [`RowAccessor::ordinal_of`](crate::RowAccessor::ordinal_of) | no during inbound probing, field is skipped |
//! | [`Error::TypeConversion`] | inbound conversion | yes, instance is discarded |
//! | [`Error::RowShape`] | row accessor, [`DataTable`](crate::DataTable) | yes |
//! | [`Error::UnsupportedColumnType`] | driver row accessor | yes |
//! | [`Error::Driver`] | driver, connection | yes, unchanged |
//! | session variants | [`Session`](crate::Session) | yes |

use thiserror::Error;

use crate::value::{Value, ValueKind};

/// Error reported by a database driver or row accessor.
///
/// Kept boxed and passed through [`Error::Driver`] untouched.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the mapper and the execution session.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid mapping metadata on an entity type.
    ///
    /// Blank column override or two fields resolving to the same column.
    #[error("invalid mapping for `{entity}`: {message}")]
    MappingConfiguration {
        /// Rust type name of the entity.
        entity:  &'static str,
        /// What is wrong.
        message: String
    },

    /// Row accessor has no column with this name.
    #[error("column `{0}` not found")]
    ColumnNotFound(String),

    /// Stored column value cannot be converted to the field type.
    #[error("cannot map column `{column}` into field `{entity}::{field}`: {source}")]
    TypeConversion {
        /// Rust type name of the entity.
        entity: &'static str,
        /// Field identifier.
        field:  &'static str,
        /// Resolved column name.
        column: String,
        /// Underlying value conversion failure.
        #[source]
        source: ConversionError
    },

    /// Row does not have the shape the caller asked for.
    ///
    /// Raised by the mapper's own row types, never by a driver.
    #[error("{0}")]
    RowShape(RowShapeError),

    /// Stored column type has no [`ValueKind`] counterpart.
    #[error("column `{column}` has unsupported type `{type_name}`")]
    UnsupportedColumnType {
        /// Column name as reported by the row.
        column:    String,
        /// Database type name.
        type_name: String
    },

    /// Error from the driver, passed through unchanged.
    #[error(transparent)]
    Driver(DriverError),

    /// Session has no usable connection string.
    #[error("invalid connection string")]
    InvalidConnectionString,

    /// Commit or rollback requested without an open transaction.
    #[error("no transaction in progress")]
    NoTransaction,

    /// Dialect name not recognized.
    #[error("unknown dialect `{0}`")]
    UnknownDialect(String),

    /// Operation not supported by the driver.
    #[error("{0} is not supported by this driver")]
    Unsupported(&'static str),

    /// Value conversion outside of entity mapping (scalar reads, parameters).
    #[error(transparent)]
    Conversion(#[from] ConversionError)
}

impl Error {
    /// Build a configuration error for entity `T`.
    pub fn configuration<T: ?Sized>(message: impl Into<String>) -> Self {
        Self::MappingConfiguration {
            entity:  std::any::type_name::<T>(),
            message: message.into()
        }
    }

    /// Wrap any driver error.
    pub fn driver(err: impl Into<DriverError>) -> Self {
        Self::Driver(err.into())
    }

    /// Check if this is a missing column.
    #[must_use]
    pub const fn is_column_not_found(&self) -> bool {
        matches!(self, Self::ColumnNotFound(_))
    }

    /// Check if this is a mapping configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MappingConfiguration { .. })
    }

    /// Check if this is a type conversion error.
    #[must_use]
    pub const fn is_type_conversion(&self) -> bool {
        matches!(self, Self::TypeConversion { .. } | Self::Conversion(_))
    }

    /// Check if this is a row shape error.
    #[must_use]
    pub const fn is_row_shape(&self) -> bool {
        matches!(self, Self::RowShape(_))
    }

    /// Check if this error came from the driver.
    #[must_use]
    pub const fn is_driver(&self) -> bool {
        matches!(self, Self::Driver(_))
    }
}

/// Mismatch between a row and the position or width asked of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowShapeError {
    /// Ordinal past the last column.
    #[error("ordinal {ordinal} out of range for a row of {width} columns")]
    OrdinalOutOfRange {
        /// Requested ordinal.
        ordinal: usize,
        /// Number of columns in the row.
        width:   usize
    },

    /// Row width differs from the table's column count.
    #[error("row has {found} values, table has {expected} columns")]
    WidthMismatch {
        /// Column count of the table.
        expected: usize,
        /// Values in the rejected row.
        found:    usize
    }
}

impl From<RowShapeError> for Error {
    fn from(err: RowShapeError) -> Self {
        Self::RowShape(err)
    }
}

/// Failure to turn a [`Value`] into a field type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Value is of another kind than the field expects.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Kind the field expects.
        expected: ValueKind,
        /// Kind name of the value received.
        found:    &'static str
    },

    /// Text could not be parsed into the field kind.
    #[error("cannot parse {text:?} as {expected}")]
    Unparsable {
        /// Kind the field expects.
        expected: ValueKind,
        /// Text received from the row.
        text:     String
    },

    /// Integer does not fit the field kind.
    #[error("{value} is out of range for {expected}")]
    OutOfRange {
        /// Kind the field expects.
        expected: ValueKind,
        /// Integer received.
        value:    i64
    },

    /// Integer does not fit an unsigned field type.
    #[error("{value} is out of range for {target}")]
    UnsignedOutOfRange {
        /// Rust type of the field.
        target: &'static str,
        /// Integer received.
        value:  i64
    }
}

impl ConversionError {
    /// Value of the wrong kind.
    #[must_use]
    pub fn mismatch(expected: ValueKind, found: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: found.kind_name()
        }
    }

    /// Unparsable text.
    #[must_use]
    pub fn unparsable(expected: ValueKind, text: &str) -> Self {
        Self::Unparsable {
            expected,
            text: text.to_owned()
        }
    }

    /// Integer out of range.
    #[must_use]
    pub const fn out_of_range(expected: ValueKind, value: i64) -> Self {
        Self::OutOfRange {
            expected,
            value
        }
    }
}
