// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # entity-mapper
//!
//! One crate, all features. Re-exports:
//! - [`Entity`](macro@Entity) derive macro from `entity-mapper-derive`
//! - All types from `entity-mapper-core` ([`ConverterRegistry`],
//!   [`Session`], [`Value`], ...)
//!
//! # Quick Start
//!
//! ```rust
//! use entity_mapper::{Entity, ValueRow, to_entities, to_parameters};
//!
//! #[derive(Debug, Default, PartialEq, Entity)]
//! #[entity(rename_all = "PascalCase")]
//! pub struct Person {
//!     pub name: String,
//!     pub age: i32,
//! }
//!
//! let ann = Person { name: "Ann".into(), age: 30 };
//! let record = to_parameters(&ann)?;
//! assert_eq!(record.get("@Name").map(|p| &p.value), Some(&"Ann".into()));
//!
//! let row = ValueRow::new().with("Name", "Ann").with("Age", 30_i64);
//! let people: Vec<Person> = to_entities(&[row])?;
//! assert_eq!(people, [ann]);
//! # Ok::<(), entity_mapper::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `sqlite` | `SqliteDriver` over `rusqlite` |
//! | `postgres` | `RowAccessor` for `sqlx` PostgreSQL rows |
//! | `serde` | `Deserialize` for configuration types |
//! | `uuid` | `uuid::Uuid` fields |
//! | `chrono` | `NaiveDateTime` and `DateTime<Utc>` fields |

pub use entity_mapper_core::*;
pub use entity_mapper_derive::Entity;
