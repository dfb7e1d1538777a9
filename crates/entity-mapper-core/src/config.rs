// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mapper and session configuration.
//!
//! | Type | Field | Default |
//! |------|-------|---------|
//! | [`MapperConfig`] | `dialect` | [`Dialect::SqlServer`] |
//! | [`SessionConfig`] | `connection_string` | empty (rejected on open) |
//! | | `command_timeout` | none |
//! | | `return_parameter` | `@_sp_return` |
//!
//! Both deserialize with `serde` when the `serde` feature is enabled.

use std::time::Duration;

use crate::dialect::Dialect;

/// Name of the reserved stored-procedure return-value parameter.
pub const DEFAULT_RETURN_PARAMETER: &str = "@_sp_return";

/// Settings of a [`ConverterRegistry`](crate::ConverterRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapperConfig {
    /// Parameter naming convention for outbound converters.
    pub dialect: Dialect
}

impl MapperConfig {
    /// Configuration for a dialect.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect
        }
    }
}

/// Settings of a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Driver-specific connection string.
    pub connection_string: String,

    /// Per-command timeout handed to the driver.
    pub command_timeout: Option<Duration>,

    /// Parameter receiving a stored procedure's return value.
    pub return_parameter: String
}

impl SessionConfig {
    /// Configuration with a connection string and defaults otherwise.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            ..Self::default()
        }
    }

    /// Set the command timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }

    /// Set the return-value parameter name.
    #[must_use]
    pub fn with_return_parameter(mut self, name: impl Into<String>) -> Self {
        self.return_parameter = name.into();
        self
    }

    /// Check if the connection string is usable.
    #[must_use]
    pub fn has_connection_string(&self) -> bool {
        !self.connection_string.trim().is_empty()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connection_string: String::new(),
            command_timeout:   None,
            return_parameter:  DEFAULT_RETURN_PARAMETER.to_owned()
        }
    }
}
