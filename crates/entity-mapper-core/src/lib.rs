// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core of entity-mapper.
//!
//! Compiles, once per type, converters between typed entities and the
//! parameter/row representation of a relational database, caches them, and
//! runs commands through a connection-owning [`Session`].
//!
//! # Overview
//!
//! | Item | Role |
//! |------|------|
//! | [`Entity`] / [`FieldMapping`] | field table of a mappable type, usually derived |
//! | [`naming`] | field to column name resolution |
//! | [`OutboundConverter`] | `&T -> ParameterRecord` |
//! | [`InboundConverter`] | `&dyn RowAccessor -> T` |
//! | [`convert`] | text-to-scalar bridge applied to inbound values |
//! | [`ConverterRegistry`] | concurrent converter cache |
//! | [`Session`] / [`Driver`] | command execution, transactions |
//!
//! # Feature Flags
//!
//! | Feature | Adds |
//! |---------|------|
//! | `sqlite` | [`sqlite`] driver over `rusqlite` |
//! | `postgres` | [`postgres`] row accessor and binder over `sqlx` |
//! | `serde` | `Deserialize`/`Serialize` for configuration types |
//! | `uuid` | [`Value::Uuid`] for `uuid::Uuid` fields |
//! | `chrono` | [`Value::Timestamp`] and [`Value::TimestampTz`] |
//!
//! # Usage
//!
//! Most users depend on `entity-mapper`, which re-exports this crate together
//! with `#[derive(Entity)]`.
//!
//! ```rust
//! use entity_mapper_core::{ConverterRegistry, Value, ValueRow};
//! # use entity_mapper_core::{Entity, FieldMapping, FromValue, ToValue};
//! # #[derive(Debug, Default, PartialEq)]
//! # struct Person { name: String, age: i32 }
//! # impl Entity for Person {
//! #     fn field_mappings() -> Vec<FieldMapping<Self>> {
//! #         vec![
//! #             FieldMapping::new("name", <String as FromValue>::KIND,
//! #                 |p: &Self| p.name.to_value(),
//! #                 |p: &mut Self, v| { p.name = FromValue::from_value(v)?; Ok(()) })
//! #                 .with_column("Name"),
//! #             FieldMapping::new("age", <i32 as FromValue>::KIND,
//! #                 |p: &Self| p.age.to_value(),
//! #                 |p: &mut Self, v| { p.age = FromValue::from_value(v)?; Ok(()) })
//! #                 .with_column("Age"),
//! #         ]
//! #     }
//! # }
//!
//! let registry = ConverterRegistry::new();
//!
//! let ann = Person { name: "Ann".into(), age: 30 };
//! let record = registry.to_parameters(&ann).unwrap();
//! assert_eq!(record.pairs(), [("@Name", &Value::from("Ann")), ("@Age", &Value::I32(30))]);
//!
//! let row = ValueRow::new().with("name", "Ann").with("AGE", Value::Null);
//! let people: Vec<Person> = registry.to_entities(&[row]).unwrap();
//! assert_eq!(people, [Person { name: "Ann".into(), age: 0 }]);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod dataset;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod inbound;
pub mod mapping;
pub mod naming;
pub mod outbound;
pub mod prelude;
pub mod registry;
pub mod row;
pub mod session;
pub mod value;

#[cfg(feature = "postgres")]
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
pub mod postgres;
#[cfg(feature = "sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "sqlite")))]
pub mod sqlite;

pub use config::{DEFAULT_RETURN_PARAMETER, MapperConfig, SessionConfig};
pub use dataset::{DataRow, DataSet, DataTable};
pub use dialect::Dialect;
pub use driver::{Command, CommandKind, Connection, Driver, ExecuteOutcome};
pub use error::{ConversionError, DriverError, Error, Result, RowShapeError};
pub use inbound::{InboundConverter, compile_inbound};
pub use mapping::{Entity, FieldMapping, Getter, Setter};
pub use outbound::{
    OutboundConverter, Parameter, ParameterDirection, ParameterRecord, compile_outbound
};
pub use registry::{ConverterRegistry, Direction, to_entities, to_parameters};
pub use row::{RowAccessor, ValueRow, has_column};
pub use session::Session;
pub use value::{FromValue, ToValue, Value, ValueKind};
