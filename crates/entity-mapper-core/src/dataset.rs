// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Materialized result sets.
//!
//! A [`DataSet`] holds one [`DataTable`] per result set returned by a command.
//! Rows are borrowed as [`DataRow`]s, which implement
//! [`RowAccessor`] and so bind to entities like any driver row.

use crate::{
    error::{Result, RowShapeError},
    mapping::Entity,
    registry::ConverterRegistry,
    row::{self, RowAccessor, ValueRow},
    value::{Value, ValueKind}
};

/// Result sets of one command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    tables: Vec<DataTable>
}

impl DataSet {
    /// Create an empty data set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: Vec::new()
        }
    }

    /// Append a table.
    pub fn push(&mut self, table: DataTable) {
        self.tables.push(table);
    }

    /// All tables.
    #[must_use]
    pub fn tables(&self) -> &[DataTable] {
        &self.tables
    }

    /// Table at `index`.
    #[must_use]
    pub fn table(&self, index: usize) -> Option<&DataTable> {
        self.tables.get(index)
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if there are no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// First column of the first row of the first table, or null.
    #[must_use]
    pub fn scalar(&self) -> Value {
        self.tables
            .first()
            .and_then(|t| t.row(0))
            .and_then(|r| r.values().first().cloned())
            .unwrap_or_default()
    }

    /// Take the tables out.
    #[must_use]
    pub fn into_tables(self) -> Vec<DataTable> {
        self.tables
    }
}

impl From<Vec<DataTable>> for DataSet {
    fn from(tables: Vec<DataTable>) -> Self {
        Self {
            tables
        }
    }
}

/// One result set: column names and rows of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows:    Vec<Vec<Value>>
}

impl DataTable {
    /// Create a table with the given columns and no rows.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows:    Vec::new()
        }
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// [`Error::RowShape`](crate::Error::RowShape) if the row width differs
    /// from the column count.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(RowShapeError::WidthMismatch {
                expected: self.columns.len(),
                found:    values.len()
            }
            .into());
        }
        self.rows.push(values);
        Ok(())
    }

    /// Column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<DataRow<'_>> {
        self.rows.get(index).map(|values| DataRow {
            columns: &self.columns,
            values
        })
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = DataRow<'_>> {
        self.rows.iter().map(|values| DataRow {
            columns: &self.columns,
            values
        })
    }

    /// Bind every row to `T` through `registry`.
    ///
    /// # Errors
    ///
    /// See [`ConverterRegistry::to_entities`].
    pub fn bind<T: Entity + Default>(&self, registry: &ConverterRegistry) -> Result<Vec<T>> {
        let rows: Vec<DataRow<'_>> = self.rows().collect();
        registry.to_entities(&rows)
    }
}

/// Borrowed row of a [`DataTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRow<'t> {
    columns: &'t [String],
    values:  &'t [Value]
}

impl<'t> DataRow<'t> {
    /// Values in column order.
    #[must_use]
    pub const fn values(&self) -> &'t [Value] {
        self.values
    }

    /// Value of a column by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'t Value> {
        row::position_of(self.columns, column)
            .ok()
            .and_then(|i| self.values.get(i))
    }

    /// Copy into an owned row.
    #[must_use]
    pub fn to_owned_row(&self) -> ValueRow {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }
}

impl RowAccessor for DataRow<'_> {
    fn ordinal_of(&self, column: &str) -> Result<usize> {
        row::position_of(self.columns, column)
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        row::slot(self.values, ordinal).map(Value::is_null)
    }

    fn read_typed(&self, ordinal: usize, kind: ValueKind) -> Result<Value> {
        row::read_slot(self.values, ordinal, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        mapping::FieldMapping,
        value::{FromValue, ToValue}
    };

    #[derive(Debug, Default, PartialEq)]
    struct City {
        name:       String,
        population: i64
    }

    impl Entity for City {
        fn field_mappings() -> Vec<FieldMapping<Self>> {
            vec![
                FieldMapping::new(
                    "name",
                    <String as FromValue>::KIND,
                    |c: &Self| c.name.to_value(),
                    |c: &mut Self, v| {
                        c.name = FromValue::from_value(v)?;
                        Ok(())
                    }
                ),
                FieldMapping::new(
                    "population",
                    <i64 as FromValue>::KIND,
                    |c: &Self| c.population.to_value(),
                    |c: &mut Self, v| {
                        c.population = FromValue::from_value(v)?;
                        Ok(())
                    }
                ),
            ]
        }
    }

    fn cities() -> DataTable {
        let mut table = DataTable::new(["Name", "Population"]);
        table
            .push_row(vec![Value::from("Oslo"), Value::I64(709_000)])
            .unwrap();
        table
            .push_row(vec![Value::from("Bergen"), Value::Null])
            .unwrap();
        table
    }

    #[test]
    fn rows_are_accessors() {
        let table = cities();
        let row = table.row(1).unwrap();
        assert_eq!(row.ordinal_of("population").unwrap(), 1);
        assert!(row.is_null(1).unwrap());
        assert_eq!(row.get("NAME"), Some(&Value::from("Bergen")));
    }

    #[test]
    fn width_mismatch_rejected() {
        let mut table = DataTable::new(["A"]);
        let err = table.push_row(vec![]).unwrap_err();
        assert!(matches!(
            err,
            Error::RowShape(RowShapeError::WidthMismatch {
                expected: 1,
                found:    0
            })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn bind_table_to_entities() {
        let registry = ConverterRegistry::new();
        let cities: Vec<City> = cities().bind(&registry).unwrap();
        assert_eq!(
            cities,
            vec![
                City {
                    name:       "Oslo".into(),
                    population: 709_000
                },
                City {
                    name:       "Bergen".into(),
                    population: 0
                },
            ]
        );
    }

    #[test]
    fn scalar_of_data_set() {
        let set = DataSet::from(vec![cities()]);
        assert_eq!(set.scalar(), Value::from("Oslo"));
        assert_eq!(DataSet::new().scalar(), Value::Null);
    }

    #[test]
    fn owned_copy_of_row() {
        let table = cities();
        let owned = table.row(0).unwrap().to_owned_row();
        assert_eq!(owned.columns(), ["Name".to_string(), "Population".to_string()]);
    }
}
