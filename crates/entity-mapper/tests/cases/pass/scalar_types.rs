// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_mapper::{Entity, FieldMapping, ValueKind};

#[derive(Debug, Default, Entity)]
pub struct Sample {
    pub flag: bool,
    pub small: i16,
    pub medium: i32,
    pub large: i64,
    pub ratio: f32,
    pub precise: f64,
    pub label: String,
    pub payload: Vec<u8>,
    pub maybe_flag: Option<bool>,
    pub maybe_large: Option<i64>,
    pub maybe_label: Option<String>,
    pub r#type: String,
}

fn main() {
    let mappings: Vec<FieldMapping<Sample>> = Sample::field_mappings();
    assert_eq!(mappings.len(), 12);
    assert_eq!(mappings[0].kind(), ValueKind::Bool);
    assert_eq!(mappings[7].kind(), ValueKind::Bytes);
    assert_eq!(mappings[9].kind(), ValueKind::I64);
    assert_eq!(mappings[11].ident(), "type");
}
