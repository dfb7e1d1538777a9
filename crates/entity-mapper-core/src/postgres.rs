// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL adapter for `sqlx`.
//!
//! Provides [`RowAccessor`] for [`PgRow`] and [`bind_parameters`] for
//! positional queries. Pair with a registry configured for
//! [`Dialect::Postgres`](crate::Dialect::Postgres) so parameters come out as
//! `$1, $2, ...` in field order.
//!
//! ```rust,ignore
//! let registry = ConverterRegistry::with_config(MapperConfig::new(Dialect::Postgres));
//! let record = registry.to_parameters(&filter)?;
//! let rows = bind_parameters(sqlx::query("SELECT * FROM person WHERE age > $1"), &record)
//!     .fetch_all(&pool)
//!     .await?;
//! let people: Vec<Person> = registry.to_entities(&rows)?;
//! ```
//!
//! Column values are decoded by their PostgreSQL type, then cast to the field
//! kind, so an `INT8` column fills an `i32` field when the value fits.

use sqlx::{
    Column, Row, TypeInfo, ValueRef,
    postgres::{PgArguments, PgRow, Postgres},
    query::Query
};

use crate::{
    error::{Error, Result, RowShapeError},
    outbound::ParameterRecord,
    row::RowAccessor,
    value::{Value, ValueKind}
};

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::driver(err)
    }
}

/// Bind the input parameters of `record` in order.
///
/// Null is bound as a text-typed null.
pub fn bind_parameters<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    record: &ParameterRecord
) -> Query<'q, Postgres, PgArguments> {
    for parameter in record.iter().filter(|p| p.is_input()) {
        query = match parameter.value.clone() {
            Value::Null => query.bind(None::<String>),
            Value::Bool(v) => query.bind(v),
            Value::I16(v) => query.bind(v),
            Value::I32(v) => query.bind(v),
            Value::I64(v) => query.bind(v),
            Value::F32(v) => query.bind(v),
            Value::F64(v) => query.bind(v),
            Value::Text(v) => query.bind(v),
            Value::Bytes(v) => query.bind(v),
            #[cfg(feature = "uuid")]
            Value::Uuid(v) => query.bind(v),
            #[cfg(feature = "chrono")]
            Value::Timestamp(v) => query.bind(v),
            #[cfg(feature = "chrono")]
            Value::TimestampTz(v) => query.bind(v)
        };
    }
    query
}

/// Kind a PostgreSQL type decodes into.
#[must_use]
pub fn stored_kind(type_name: &str) -> Option<ValueKind> {
    match type_name {
        "BOOL" => Some(ValueKind::Bool),
        "INT2" => Some(ValueKind::I16),
        "INT4" => Some(ValueKind::I32),
        "INT8" => Some(ValueKind::I64),
        "FLOAT4" => Some(ValueKind::F32),
        "FLOAT8" => Some(ValueKind::F64),
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => Some(ValueKind::Text),
        "BYTEA" => Some(ValueKind::Bytes),
        #[cfg(feature = "uuid")]
        "UUID" => Some(ValueKind::Uuid),
        #[cfg(feature = "chrono")]
        "TIMESTAMP" => Some(ValueKind::Timestamp),
        #[cfg(feature = "chrono")]
        "TIMESTAMPTZ" => Some(ValueKind::TimestampTz),
        _ => None
    }
}

fn decode(row: &PgRow, ordinal: usize, kind: ValueKind) -> Result<Value> {
    Ok(match kind {
        ValueKind::Bool => row.try_get::<Option<bool>, _>(ordinal)?.into(),
        ValueKind::I16 => row.try_get::<Option<i16>, _>(ordinal)?.into(),
        ValueKind::I32 => row.try_get::<Option<i32>, _>(ordinal)?.into(),
        ValueKind::I64 => row.try_get::<Option<i64>, _>(ordinal)?.into(),
        ValueKind::F32 => row.try_get::<Option<f32>, _>(ordinal)?.into(),
        ValueKind::F64 => row.try_get::<Option<f64>, _>(ordinal)?.into(),
        ValueKind::Text => row.try_get::<Option<String>, _>(ordinal)?.into(),
        ValueKind::Bytes => row.try_get::<Option<Vec<u8>>, _>(ordinal)?.into(),
        #[cfg(feature = "uuid")]
        ValueKind::Uuid => row.try_get::<Option<uuid::Uuid>, _>(ordinal)?.into(),
        #[cfg(feature = "chrono")]
        ValueKind::Timestamp => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(ordinal)?
            .into(),
        #[cfg(feature = "chrono")]
        ValueKind::TimestampTz => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(ordinal)?
            .into()
    })
}

impl RowAccessor for PgRow {
    fn ordinal_of(&self, column: &str) -> Result<usize> {
        self.columns()
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(column))
            .map(|c| c.ordinal())
            .ok_or_else(|| Error::ColumnNotFound(column.to_owned()))
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        Ok(self.try_get_raw(ordinal)?.is_null())
    }

    fn read_typed(&self, ordinal: usize, kind: ValueKind) -> Result<Value> {
        let columns = self.columns();
        let column = columns.get(ordinal).ok_or(RowShapeError::OrdinalOutOfRange {
            ordinal,
            width: columns.len()
        })?;
        let type_name = column.type_info().name();
        let stored = stored_kind(type_name).ok_or_else(|| Error::UnsupportedColumnType {
            column:    column.name().to_owned(),
            type_name: type_name.to_owned()
        })?;
        Ok(decode(self, ordinal, stored)?.cast(kind)?)
    }
}
