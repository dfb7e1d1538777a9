// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Execution session.
//!
//! A [`Session`] owns a connection string and at most one lazily opened
//! connection. Each command opens the connection on demand and releases it
//! afterwards, except while a transaction is in progress.
//!
//! # Connection Lifecycle
//!
//! | Operation | Opens if closed | Closes afterwards |
//! |-----------|-----------------|-------------------|
//! | `execute_non_query*` | yes | unless in a transaction |
//! | `execute_scalar*` | yes | unless in a transaction |
//! | `execute_dataset*` / `bind*` | yes | only if this call opened it |
//! | `begin_transaction` | yes | no |
//! | `commit` / `rollback` | no | yes |
//!
//! Closing a connection with a transaction in progress rolls the transaction
//! back first. This applies to [`Session::close`], to
//! [`Session::set_connection_string`] and to drop.
//!
//! # Example
//!
//! ```rust,ignore
//! use entity_mapper::{CommandKind, Session, SessionConfig, sqlite::SqliteDriver};
//!
//! let mut session = Session::new(SqliteDriver, SessionConfig::new("app.db"));
//! session.begin_transaction()?;
//! session.execute_non_query_with(
//!     "INSERT INTO person (Name, Age) VALUES (@Name, @Age)",
//!     CommandKind::Text,
//!     &person
//! )?;
//! session.commit()?;
//!
//! let people: Vec<Person> = session.bind("SELECT * FROM person", CommandKind::Text, &[])?;
//! ```

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    config::SessionConfig,
    dataset::DataSet,
    driver::{Command, CommandKind, Connection, Driver},
    error::{Error, Result},
    inbound::InboundConverter,
    mapping::Entity,
    outbound::Parameter,
    registry::ConverterRegistry,
    row::RowAccessor,
    value::Value
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    UnlessTransaction,
    IfOpenedHere
}

/// Connection-owning command runner.
///
/// Not thread-safe; use one session per thread.
pub struct Session<'r, D: Driver> {
    driver:         D,
    config:         SessionConfig,
    registry:       &'r ConverterRegistry,
    connection:     Option<D::Connection>,
    in_transaction: bool
}

impl<D: Driver> Session<'static, D> {
    /// Create a session mapping entities through the global registry.
    pub fn new(driver: D, config: SessionConfig) -> Self {
        Self::with_registry(driver, config, ConverterRegistry::global())
    }
}

impl<'r, D: Driver> Session<'r, D> {
    /// Create a session mapping entities through `registry`.
    pub fn with_registry(driver: D, config: SessionConfig, registry: &'r ConverterRegistry) -> Self {
        Self {
            driver,
            config,
            registry,
            connection: None,
            in_transaction: false
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current connection string.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.config.connection_string
    }

    /// Replace the connection string, releasing the current connection.
    ///
    /// A transaction in progress is rolled back.
    ///
    /// # Errors
    ///
    /// Errors from rolling back or closing the released connection. The new
    /// connection string is stored either way.
    pub fn set_connection_string(&mut self, connection_string: impl Into<String>) -> Result<()> {
        let released = self.close();
        self.config.connection_string = connection_string.into();
        released
    }

    /// Set the per-command timeout.
    pub fn set_command_timeout(&mut self, timeout: Option<Duration>) {
        self.config.command_timeout = timeout;
    }

    /// Check if a connection is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Check if a transaction is in progress.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Open the connection if needed and start a transaction.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] if a transaction is already in progress,
    /// [`Error::InvalidConnectionString`], driver errors.
    pub fn begin_transaction(&mut self) -> Result<()> {
        if self.in_transaction {
            return Err(Error::Unsupported("nested transactions"));
        }

        let opened_here = self.connection.is_none();
        let begun = self.open()?.begin();
        if let Err(err) = begun {
            if opened_here && let Err(close_err) = self.close() {
                warn!(error = %close_err, "failed to close connection after aborted begin");
            }
            return Err(err);
        }

        self.in_transaction = true;
        debug!("transaction started");
        Ok(())
    }

    /// Commit the transaction and release the connection.
    ///
    /// # Errors
    ///
    /// [`Error::NoTransaction`] without a transaction in progress, driver
    /// errors.
    pub fn commit(&mut self) -> Result<()> {
        self.finish_transaction(true)
    }

    /// Roll back the transaction and release the connection.
    ///
    /// # Errors
    ///
    /// [`Error::NoTransaction`] without a transaction in progress, driver
    /// errors.
    pub fn rollback(&mut self) -> Result<()> {
        self.finish_transaction(false)
    }

    /// Close the connection, rolling back a transaction in progress.
    ///
    /// Does nothing if no connection is open.
    ///
    /// # Errors
    ///
    /// The first error from rolling back or closing.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut connection) = self.connection.take() else {
            return Ok(());
        };

        let rolled_back = if self.in_transaction {
            self.in_transaction = false;
            debug!("rolling back pending transaction before close");
            connection.rollback()
        } else {
            Ok(())
        };

        let closed = connection.close();
        debug!("connection closed");
        rolled_back.and(closed)
    }

    /// Run a command that returns no rows.
    ///
    /// Returns the affected row count, or for stored procedures the value
    /// captured by the return-value parameter.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConnectionString`], driver errors.
    pub fn execute_non_query(
        &mut self,
        text: &str,
        kind: CommandKind,
        parameters: &[Parameter]
    ) -> Result<i64> {
        let parameters = self.with_return_slot(kind, parameters);
        let command = self.command(text, kind, &parameters);

        let outcome = self.run(Release::UnlessTransaction, |c| c.execute(&command))?;
        let affected = i64::try_from(outcome.affected).unwrap_or(i64::MAX);

        Ok(match kind {
            CommandKind::StoredProcedure => outcome
                .return_value
                .as_ref()
                .and_then(Value::as_i64)
                .unwrap_or(affected),
            CommandKind::Text => affected
        })
    }

    /// Run a command that returns no rows, with parameters from `entity`.
    ///
    /// # Errors
    ///
    /// Mapping errors for `T`, then as [`execute_non_query`](Self::execute_non_query).
    pub fn execute_non_query_with<T: Entity>(
        &mut self,
        text: &str,
        kind: CommandKind,
        entity: &T
    ) -> Result<i64> {
        let record = self.registry.to_parameters(entity)?;
        self.execute_non_query(text, kind, record.as_slice())
    }

    /// Run a command and return the first column of the first row.
    ///
    /// [`Value::Null`] when the command returns no rows.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConnectionString`], driver errors.
    pub fn execute_scalar(
        &mut self,
        text: &str,
        kind: CommandKind,
        parameters: &[Parameter]
    ) -> Result<Value> {
        let command = self.command(text, kind, parameters);
        let data = self.run(Release::UnlessTransaction, |c| c.query(&command))?;
        Ok(data.scalar())
    }

    /// [`execute_scalar`](Self::execute_scalar) with parameters from `entity`.
    ///
    /// # Errors
    ///
    /// Mapping errors for `T`, then as [`execute_scalar`](Self::execute_scalar).
    pub fn execute_scalar_with<T: Entity>(
        &mut self,
        text: &str,
        kind: CommandKind,
        entity: &T
    ) -> Result<Value> {
        let record = self.registry.to_parameters(entity)?;
        self.execute_scalar(text, kind, record.as_slice())
    }

    /// Run a command and materialize every result set.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConnectionString`], driver errors.
    pub fn execute_dataset(
        &mut self,
        text: &str,
        kind: CommandKind,
        parameters: &[Parameter]
    ) -> Result<DataSet> {
        let command = self.command(text, kind, parameters);
        self.run(Release::IfOpenedHere, |c| c.query(&command))
    }

    /// [`execute_dataset`](Self::execute_dataset) with parameters from `entity`.
    ///
    /// # Errors
    ///
    /// Mapping errors for `T`, then as [`execute_dataset`](Self::execute_dataset).
    pub fn execute_dataset_with<T: Entity>(
        &mut self,
        text: &str,
        kind: CommandKind,
        entity: &T
    ) -> Result<DataSet> {
        let record = self.registry.to_parameters(entity)?;
        self.execute_dataset(text, kind, record.as_slice())
    }

    /// Run a query and map each row of the first result set to `T`.
    ///
    /// The inbound converter for `T` is built from the first row if none is
    /// cached; an empty result builds nothing.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConnectionString`], driver errors, mapping errors.
    pub fn bind<T: Entity + Default>(
        &mut self,
        text: &str,
        kind: CommandKind,
        parameters: &[Parameter]
    ) -> Result<Vec<T>> {
        let command = self.command(text, kind, parameters);
        let registry = self.registry;
        let mut converter: Option<std::sync::Arc<InboundConverter<T>>> = None;
        let mut entities = Vec::new();

        self.run(Release::IfOpenedHere, |c| {
            c.for_each_row(&command, &mut |row: &dyn RowAccessor| {
                if converter.is_none() {
                    converter = Some(registry.inbound::<T>(row)?);
                }
                if let Some(converter) = &converter {
                    entities.push(converter.convert(row)?);
                }
                Ok(())
            })
        })?;

        Ok(entities)
    }

    /// [`bind`](Self::bind) with parameters from `filter`.
    ///
    /// # Errors
    ///
    /// Mapping errors for `K`, then as [`bind`](Self::bind).
    pub fn bind_with<T, K>(&mut self, text: &str, kind: CommandKind, filter: &K) -> Result<Vec<T>>
    where
        T: Entity + Default,
        K: Entity
    {
        let record = self.registry.to_parameters(filter)?;
        self.bind(text, kind, record.as_slice())
    }

    fn command<'a>(&self, text: &'a str, kind: CommandKind, parameters: &'a [Parameter]) -> Command<'a> {
        Command {
            text,
            kind,
            parameters,
            timeout: self.config.command_timeout
        }
    }

    fn with_return_slot(&self, kind: CommandKind, parameters: &[Parameter]) -> Vec<Parameter> {
        let mut all = parameters.to_vec();
        if kind == CommandKind::StoredProcedure {
            all.push(Parameter::return_value(self.config.return_parameter.clone()));
        }
        all
    }

    fn open(&mut self) -> Result<&mut D::Connection> {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => {
                if !self.config.has_connection_string() {
                    return Err(Error::InvalidConnectionString);
                }
                let connection = self.driver.connect(&self.config)?;
                debug!(timeout = ?self.config.command_timeout, "connection opened");
                connection
            }
        };
        Ok(self.connection.insert(connection))
    }

    fn run<R>(
        &mut self,
        release: Release,
        f: impl FnOnce(&mut D::Connection) -> Result<R>
    ) -> Result<R> {
        let opened_here = self.connection.is_none();
        let result = f(self.open()?);

        let release_now = !self.in_transaction
            && match release {
                Release::UnlessTransaction => true,
                Release::IfOpenedHere => opened_here
            };

        if release_now {
            let closed = self.close();
            return result.and_then(|value| closed.map(|()| value));
        }
        result
    }

    fn finish_transaction(&mut self, commit: bool) -> Result<()> {
        if !self.in_transaction {
            return Err(Error::NoTransaction);
        }
        let Some(connection) = self.connection.as_mut() else {
            self.in_transaction = false;
            return Err(Error::NoTransaction);
        };

        let finished = if commit {
            connection.commit()
        } else {
            connection.rollback()
        };
        self.in_transaction = false;
        debug!(commit, "transaction finished");

        let closed = self.close();
        finished.and(closed)
    }
}

impl<D: Driver> Drop for Session<'_, D> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(error = %err, "failed to close session connection on drop");
        }
    }
}

impl<D: Driver> std::fmt::Debug for Session<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("open", &self.connection.is_some())
            .field("in_transaction", &self.in_transaction)
            .field("command_timeout", &self.config.command_timeout)
            .finish_non_exhaustive()
    }
}
