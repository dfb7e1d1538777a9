// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameter marker conventions.
//!
//! This module defines [`Dialect`], which controls how the outbound converter
//! names the parameters it produces.

use std::str::FromStr;

use crate::error::Error;

/// Database dialect for parameter naming.
///
/// # Supported Databases
///
/// | Dialect | Marker | Example |
/// |---------|--------|---------|
/// | SQL Server | `@name` | `@Name` |
/// | SQLite | `@name` | `@Name` |
/// | Oracle | `:name` | `:Name` |
/// | PostgreSQL | `$n` (positional) | `$2` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// SQL Server - named `@` parameters.
    #[default]
    SqlServer,

    /// SQLite - accepts `@` named parameters.
    Sqlite,

    /// Oracle - named `:` parameters.
    Oracle,

    /// PostgreSQL - positional `$1, $2, ...` parameters.
    Postgres
}

impl Dialect {
    /// Marker prepended to named parameters.
    ///
    /// Positional dialects have no named marker and return `"$"`.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::SqlServer | Self::Sqlite => "@",
            Self::Oracle => ":",
            Self::Postgres => "$"
        }
    }

    /// Check if parameters are bound by position instead of name.
    #[must_use]
    pub const fn is_positional(&self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Name of the parameter for a column at a 1-based position.
    #[must_use]
    pub fn parameter_name(&self, position: usize, column: &str) -> String {
        if self.is_positional() {
            self.placeholder(position)
        } else {
            format!("{}{column}", self.prefix())
        }
    }

    /// Positional placeholder for parameter at given index (1-based).
    #[must_use]
    pub fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    /// Strip this dialect's marker from a parameter name.
    #[must_use]
    pub fn bare_name<'a>(&self, parameter: &'a str) -> &'a str {
        parameter.strip_prefix(self.prefix()).unwrap_or(parameter)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "sqlserver" | "mssql" | "tsql" => Ok(Self::SqlServer),
            "sqlite" => Ok(Self::Sqlite),
            "oracle" => Ok(Self::Oracle),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(Error::UnknownDialect(value.to_owned()))
        }
    }
}
