// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Driver seam used by [`Session`](crate::Session).
//!
//! A [`Driver`] opens [`Connection`]s from a [`SessionConfig`]. The session
//! decides when to open, close and wrap commands in transactions; the
//! connection only runs what it is handed.
//!
//! # Implementing a Driver
//!
//! | Method | Must |
//! |--------|------|
//! | [`Connection::execute`] | bind input parameters, run, report affected rows and the return-value slot if present |
//! | [`Connection::query`] | materialize every result set into a [`DataSet`] |
//! | [`Connection::for_each_row`] | stream rows of the first result set through a [`RowAccessor`] |
//! | [`Connection::close`] | release the connection; the session rolls back first |
//!
//! Parameters holding [`Value::Null`] are bound as database null.

use std::time::Duration;

use crate::{
    config::SessionConfig,
    dataset::DataSet,
    error::Result,
    outbound::{Parameter, ParameterDirection},
    row::RowAccessor,
    value::Value
};

/// How the command text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommandKind {
    /// Raw SQL text.
    #[default]
    Text,

    /// Name of a stored procedure.
    ///
    /// The session appends the return-value parameter and reports its value
    /// as the affected count.
    StoredProcedure
}

/// A command ready to run on a connection.
#[derive(Debug, Clone, Copy)]
pub struct Command<'a> {
    /// SQL text or procedure name.
    pub text:       &'a str,
    /// Interpretation of `text`.
    pub kind:       CommandKind,
    /// Parameters, input first, return-value slot last if any.
    pub parameters: &'a [Parameter],
    /// Driver-level timeout.
    pub timeout:    Option<Duration>
}

impl<'a> Command<'a> {
    /// Input parameters in order.
    pub fn inputs(&self) -> impl Iterator<Item = &'a Parameter> {
        self.parameters.iter().filter(|p| p.is_input())
    }

    /// Return-value slot, if the command carries one.
    #[must_use]
    pub fn return_parameter(&self) -> Option<&'a Parameter> {
        self.parameters
            .iter()
            .find(|p| p.direction == ParameterDirection::ReturnValue)
    }
}

/// Result of a non-query command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecuteOutcome {
    /// Rows affected as reported by the driver.
    pub affected:     u64,
    /// Value captured by the return-value slot.
    pub return_value: Option<Value>
}

impl ExecuteOutcome {
    /// Outcome of a plain command.
    #[must_use]
    pub const fn affected(affected: u64) -> Self {
        Self {
            affected,
            return_value: None
        }
    }
}

/// Opens connections.
pub trait Driver {
    /// Connection type produced.
    type Connection: Connection;

    /// Open a connection.
    ///
    /// # Errors
    ///
    /// Driver errors, including malformed connection strings.
    fn connect(&self, config: &SessionConfig) -> Result<Self::Connection>;
}

/// An open database connection.
pub trait Connection {
    /// Start a transaction.
    ///
    /// # Errors
    ///
    /// Driver errors.
    fn begin(&mut self) -> Result<()>;

    /// Commit the current transaction.
    ///
    /// # Errors
    ///
    /// Driver errors.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the current transaction.
    ///
    /// # Errors
    ///
    /// Driver errors.
    fn rollback(&mut self) -> Result<()>;

    /// Run a command that returns no rows.
    ///
    /// # Errors
    ///
    /// Driver errors.
    fn execute(&mut self, command: &Command<'_>) -> Result<ExecuteOutcome>;

    /// Run a command and materialize its result sets.
    ///
    /// # Errors
    ///
    /// Driver errors.
    fn query(&mut self, command: &Command<'_>) -> Result<DataSet>;

    /// Run a command and hand each row of the first result set to `visit`.
    ///
    /// # Errors
    ///
    /// Driver errors, or the first error returned by `visit`.
    fn for_each_row(
        &mut self,
        command: &Command<'_>,
        visit: &mut dyn FnMut(&dyn RowAccessor) -> Result<()>
    ) -> Result<()>;

    /// Release the connection.
    ///
    /// # Errors
    ///
    /// Driver errors.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_splits_inputs_and_return_slot() {
        let parameters = [
            Parameter::new("@Name", "Ann"),
            Parameter::new("@Age", 30_i32),
            Parameter::return_value("@_sp_return"),
        ];
        let command = Command {
            text:       "dbo.AddPerson",
            kind:       CommandKind::StoredProcedure,
            parameters: &parameters,
            timeout:    None
        };
        assert_eq!(command.inputs().count(), 2);
        assert_eq!(command.return_parameter().unwrap().name, "@_sp_return");
    }

    #[test]
    fn text_command_has_no_return_slot() {
        let command = Command {
            text:       "SELECT 1",
            kind:       CommandKind::default(),
            parameters: &[],
            timeout:    None
        };
        assert_eq!(command.kind, CommandKind::Text);
        assert!(command.return_parameter().is_none());
    }
}
