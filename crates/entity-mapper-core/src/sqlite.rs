// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQLite driver backed by `rusqlite`.
//!
//! Parameters are bound by name: each input parameter whose name the
//! statement declares (`@Name`, `:Name`, `$Name`) is bound, the rest are
//! ignored. Stored procedures do not exist in SQLite and are rejected.
//!
//! | SQLite storage | [`Value`] |
//! |----------------|-----------|
//! | `NULL` | [`Value::Null`] |
//! | `INTEGER` | [`Value::I64`] |
//! | `REAL` | [`Value::F64`] |
//! | `TEXT` | [`Value::Text`] |
//! | `BLOB` | [`Value::Bytes`] |
//!
//! UUIDs and timestamps have no storage class of their own. They are written
//! as text (hyphenated UUID, `YYYY-MM-DD HH:MM:SS.f`, RFC 3339 for UTC) and
//! parsed back by the inbound text bridge. A 16-byte blob also reads as a
//! UUID.
//!
//! The connection string is a file path or `:memory:`. An in-memory database
//! lives only as long as its connection, and a [`Session`](crate::Session)
//! closes idle connections, so in-memory databases are useful only inside a
//! transaction.

use rusqlite::{
    ToSql,
    types::{ToSqlOutput, ValueRef}
};
use tracing::trace;

use crate::{
    config::SessionConfig,
    dataset::{DataSet, DataTable},
    driver::{Command, CommandKind, Connection, Driver, ExecuteOutcome},
    error::{Error, Result},
    row::RowAccessor,
    value::{Value, ValueKind}
};

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::driver(err)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Self::Bool(v) => ToSqlOutput::Owned(i64::from(*v).into()),
            Self::I16(v) => ToSqlOutput::Owned(i64::from(*v).into()),
            Self::I32(v) => ToSqlOutput::Owned(i64::from(*v).into()),
            Self::I64(v) => ToSqlOutput::Owned((*v).into()),
            Self::F32(v) => ToSqlOutput::Owned(f64::from(*v).into()),
            Self::F64(v) => ToSqlOutput::Owned((*v).into()),
            Self::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Self::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
            #[cfg(feature = "uuid")]
            Self::Uuid(v) => ToSqlOutput::Owned(v.hyphenated().to_string().into()),
            #[cfg(feature = "chrono")]
            Self::Timestamp(v) => {
                ToSqlOutput::Owned(v.format("%Y-%m-%d %H:%M:%S%.f").to_string().into())
            }
            #[cfg(feature = "chrono")]
            Self::TimestampTz(v) => ToSqlOutput::Owned(v.to_rfc3339().into())
        })
    }
}

/// Convert a borrowed SQLite value.
///
/// # Errors
///
/// [`Error::Driver`] for text that is not UTF-8.
pub fn value_from_ref(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::I64(v),
        ValueRef::Real(v) => Value::F64(v),
        ValueRef::Text(bytes) => Value::Text(
            std::str::from_utf8(bytes)
                .map_err(Error::driver)?
                .to_owned()
        ),
        ValueRef::Blob(bytes) => Value::Bytes(bytes.to_vec())
    })
}

impl RowAccessor for rusqlite::Row<'_> {
    fn ordinal_of(&self, column: &str) -> Result<usize> {
        self.as_ref()
            .column_index(column)
            .map_err(|err| match err {
                rusqlite::Error::InvalidColumnName(name) => Error::ColumnNotFound(name),
                other => Error::driver(other)
            })
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        Ok(matches!(self.get_ref(ordinal)?, ValueRef::Null))
    }

    fn read_typed(&self, ordinal: usize, kind: ValueKind) -> Result<Value> {
        Ok(value_from_ref(self.get_ref(ordinal)?)?.cast(kind)?)
    }
}

/// Opens [`SqliteConnection`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDriver;

impl Driver for SqliteDriver {
    type Connection = SqliteConnection;

    fn connect(&self, config: &SessionConfig) -> Result<SqliteConnection> {
        let conn = rusqlite::Connection::open(&config.connection_string)?;
        if let Some(timeout) = config.command_timeout {
            conn.busy_timeout(timeout)?;
        }
        Ok(SqliteConnection::new(conn))
    }
}

/// An open SQLite connection.
#[derive(Debug)]
pub struct SqliteConnection {
    conn: rusqlite::Connection
}

impl SqliteConnection {
    /// Wrap an existing connection.
    #[must_use]
    pub const fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn
        }
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Driver errors.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(rusqlite::Connection::open_in_memory()?))
    }

    /// Borrow the underlying connection.
    #[must_use]
    pub const fn inner(&self) -> &rusqlite::Connection {
        &self.conn
    }

    fn prepare(&self, command: &Command<'_>) -> Result<rusqlite::Statement<'_>> {
        if command.kind == CommandKind::StoredProcedure {
            return Err(Error::Unsupported("stored procedures"));
        }

        let mut stmt = self.conn.prepare(command.text)?;
        for parameter in command.inputs() {
            match stmt.parameter_index(&parameter.name)? {
                Some(index) => stmt.raw_bind_parameter(index, &parameter.value)?,
                None => trace!(parameter = %parameter.name, "parameter not used by statement")
            }
        }
        Ok(stmt)
    }
}

impl Connection for SqliteConnection {
    fn begin(&mut self) -> Result<()> {
        Ok(self.conn.execute_batch("BEGIN")?)
    }

    fn commit(&mut self) -> Result<()> {
        Ok(self.conn.execute_batch("COMMIT")?)
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(self.conn.execute_batch("ROLLBACK")?)
    }

    fn execute(&mut self, command: &Command<'_>) -> Result<ExecuteOutcome> {
        let mut stmt = self.prepare(command)?;
        let affected = stmt.raw_execute()?;
        Ok(ExecuteOutcome::affected(affected as u64))
    }

    fn query(&mut self, command: &Command<'_>) -> Result<DataSet> {
        let mut stmt = self.prepare(command)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
        let width = columns.len();
        let mut table = DataTable::new(columns);

        let mut rows = stmt.raw_query();
        while let Some(row) = rows.next()? {
            let values = (0..width)
                .map(|i| value_from_ref(row.get_ref(i)?))
                .collect::<Result<Vec<_>>>()?;
            table.push_row(values)?;
        }

        Ok(DataSet::from(vec![table]))
    }

    fn for_each_row(
        &mut self,
        command: &Command<'_>,
        visit: &mut dyn FnMut(&dyn RowAccessor) -> Result<()>
    ) -> Result<()> {
        let mut stmt = self.prepare(command)?;
        let mut rows = stmt.raw_query();
        while let Some(row) = rows.next()? {
            visit(row)?;
        }
        Ok(())
    }

    fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::Parameter;

    fn text_command<'a>(text: &'a str, parameters: &'a [Parameter]) -> Command<'a> {
        Command {
            text,
            kind: CommandKind::Text,
            parameters,
            timeout: None
        }
    }

    fn seeded() -> SqliteConnection {
        let mut conn = SqliteConnection::in_memory().unwrap();
        conn.execute(&text_command(
            "CREATE TABLE person (Name TEXT, Age INTEGER, Note)",
            &[]
        ))
        .unwrap();
        conn
    }

    #[cfg(all(feature = "uuid", feature = "chrono"))]
    #[test]
    fn uuid_and_timestamps_stored_as_text() {
        let mut conn = seeded();
        let id = uuid::Uuid::from_u128(0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8);
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 15, 0))
            .unwrap();
        let parameters = [
            Parameter::new("@Name", Value::Uuid(id)),
            Parameter::new("@Note", Value::Timestamp(at)),
        ];
        conn.execute(&text_command(
            "INSERT INTO person (Name, Note) VALUES (@Name, @Note)",
            &parameters
        ))
        .unwrap();

        let data = conn
            .query(&text_command("SELECT Name, Note FROM person", &[]))
            .unwrap();
        let row = data.table(0).and_then(|t| t.row(0)).unwrap();
        assert_eq!(
            row.get("Name"),
            Some(&Value::Text("67e55044-10b1-426f-9247-bb680e5fe0c8".into()))
        );
        assert_eq!(row.get("Note"), Some(&Value::Text("2024-03-01 08:15:00".into())));
    }

    #[test]
    fn named_parameters_are_bound() {
        let mut conn = seeded();
        let parameters = [
            Parameter::new("@Name", "Ann"),
            Parameter::new("@Age", 30_i32),
            Parameter::new("@Unused", true),
        ];
        let outcome = conn
            .execute(&text_command(
                "INSERT INTO person (Name, Age) VALUES (@Name, @Age)",
                &parameters
            ))
            .unwrap();
        assert_eq!(outcome.affected, 1);

        let data = conn
            .query(&text_command("SELECT Name, Age, Note FROM person", &[]))
            .unwrap();
        let table = data.table(0).unwrap();
        assert_eq!(table.columns(), ["Name", "Age", "Note"]);
        let row = table.row(0).unwrap();
        assert_eq!(row.values(), [Value::from("Ann"), Value::I64(30), Value::Null]);
    }

    #[test]
    fn native_rows_are_accessors() {
        let mut conn = seeded();
        conn.execute(&text_command(
            "INSERT INTO person VALUES ('Bo', NULL, '42')",
            &[]
        ))
        .unwrap();

        let mut seen = 0;
        conn.for_each_row(
            &text_command("SELECT * FROM person", &[]),
            &mut |row: &dyn RowAccessor| {
                assert_eq!(row.ordinal_of("name")?, 0);
                assert!(row.is_null(1)?);
                assert!(row.ordinal_of("Email").unwrap_err().is_column_not_found());
                assert_eq!(row.read_typed(2, ValueKind::I32)?, Value::from("42"));
                seen += 1;
                Ok(())
            }
        )
        .unwrap();
        assert_eq!(seen, 1);
    }

    #[test]
    fn integers_narrow_on_read() {
        let mut conn = seeded();
        conn.execute(&text_command("INSERT INTO person (Age) VALUES (7)", &[]))
            .unwrap();
        conn.for_each_row(
            &text_command("SELECT Age FROM person", &[]),
            &mut |row: &dyn RowAccessor| {
                assert_eq!(row.read_typed(0, ValueKind::I16)?, Value::I16(7));
                Ok(())
            }
        )
        .unwrap();
    }

    #[test]
    fn stored_procedures_unsupported() {
        let mut conn = seeded();
        let command = Command {
            text:       "AddPerson",
            kind:       CommandKind::StoredProcedure,
            parameters: &[],
            timeout:    None
        };
        assert!(matches!(conn.execute(&command), Err(Error::Unsupported(_))));
    }

    #[test]
    fn transactions_roll_back() {
        let mut conn = seeded();
        conn.begin().unwrap();
        conn.execute(&text_command("INSERT INTO person (Name) VALUES ('x')", &[]))
            .unwrap();
        conn.rollback().unwrap();
        let data = conn
            .query(&text_command("SELECT COUNT(*) FROM person", &[]))
            .unwrap();
        assert_eq!(data.scalar(), Value::I64(0));
    }

    #[test]
    fn sql_errors_are_driver_errors() {
        let mut conn = seeded();
        let err = conn
            .query(&text_command("SELECT * FROM missing", &[]))
            .unwrap_err();
        assert!(err.is_driver());
    }
}
