// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field tables describing mappable types.
//!
//! An [`Entity`] exposes its mappable fields as a list of [`FieldMapping`]s:
//! identifier, optional column override, value kind, and a getter/setter pair
//! of plain function pointers. `#[derive(Entity)]` writes this table; the
//! converter compilers read it once per type and never again.
//!
//! # Manual Implementation
//!
//! ```rust
//! use entity_mapper_core::{Entity, FieldMapping, FromValue, ToValue};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age:  i32
//! }
//!
//! impl Entity for Person {
//!     fn field_mappings() -> Vec<FieldMapping<Self>> {
//!         vec![
//!             FieldMapping::new(
//!                 "name",
//!                 <String as FromValue>::KIND,
//!                 |p: &Self| p.name.to_value(),
//!                 |p: &mut Self, v| {
//!                     p.name = FromValue::from_value(v)?;
//!                     Ok(())
//!                 }
//!             )
//!             .with_column("Name"),
//!             FieldMapping::new(
//!                 "age",
//!                 <i32 as FromValue>::KIND,
//!                 |p: &Self| p.age.to_value(),
//!                 |p: &mut Self, v| {
//!                     p.age = FromValue::from_value(v)?;
//!                     Ok(())
//!                 }
//!             ),
//!         ]
//!     }
//! }
//! ```

use std::fmt;

use crate::{
    error::ConversionError,
    value::{Value, ValueKind}
};

/// Reads a field out of an instance.
pub type Getter<T> = fn(&T) -> Value;

/// Assigns a field of an instance.
pub type Setter<T> = fn(&mut T, Value) -> Result<(), ConversionError>;

/// A type whose public fields map to columns and parameters.
///
/// Usually derived with `#[derive(Entity)]`.
pub trait Entity: 'static {
    /// Mappable fields in declaration order.
    ///
    /// Called once per converter build, never per conversion.
    fn field_mappings() -> Vec<FieldMapping<Self>>
    where
        Self: Sized;
}

/// One mappable field of `T`.
pub struct FieldMapping<T> {
    ident:  &'static str,
    column: Option<&'static str>,
    kind:   ValueKind,
    get:    Getter<T>,
    set:    Setter<T>
}

impl<T> FieldMapping<T> {
    /// Describe a field without a column override.
    pub const fn new(ident: &'static str, kind: ValueKind, get: Getter<T>, set: Setter<T>) -> Self {
        Self {
            ident,
            column: None,
            kind,
            get,
            set
        }
    }

    /// Bind the field to an explicit column name.
    ///
    /// Blank names are rejected when the converter is built.
    #[must_use]
    pub const fn with_column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    /// Field identifier.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Explicit column override, if declared.
    #[must_use]
    pub const fn column_override(&self) -> Option<&'static str> {
        self.column
    }

    /// Underlying value kind.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Getter function.
    #[must_use]
    pub const fn getter(&self) -> Getter<T> {
        self.get
    }

    /// Setter function.
    #[must_use]
    pub const fn setter(&self) -> Setter<T> {
        self.set
    }
}

impl<T> Clone for FieldMapping<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldMapping<T> {}

impl<T> fmt::Debug for FieldMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("ident", &self.ident)
            .field("column", &self.column)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
