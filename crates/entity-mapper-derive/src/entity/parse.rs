// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[derive(Entity)]`.
//!
//! ```text
//! parse.rs
//! ├── entity.rs   - EntityDef (struct attributes, validation)
//! ├── field.rs    - FieldDef (+ column.rs for #[column(...)])
//! └── rename.rs   - RenameRule for rename_all
//! ```

mod entity;
mod field;
mod rename;

pub use entity::EntityDef;
pub use field::FieldDef;
pub use rename::RenameRule;
