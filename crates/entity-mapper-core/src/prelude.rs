// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use entity_mapper_core::prelude::*;
//! ```

pub use crate::{
    CommandKind, ConverterRegistry, DataSet, DataTable, Dialect, Entity, Error, FieldMapping,
    FromValue, MapperConfig, Parameter, ParameterRecord, Result, RowAccessor, Session,
    SessionConfig, ToValue, Value, ValueKind, ValueRow, has_column, to_entities, to_parameters
};
