// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, NaiveDateTime, Utc};
use entity_mapper::{Entity, FieldMapping, ValueKind};
use uuid::Uuid;

#[derive(Debug, Default, Entity)]
pub struct Device {
    pub id: Uuid,
    pub flags: u8,
    pub port: u16,
    pub serial: u32,
    pub first_seen: Option<NaiveDateTime>,
    pub last_sync: Option<DateTime<Utc>>,
}

fn main() {
    let kinds: Vec<ValueKind> = Device::field_mappings()
        .iter()
        .map(FieldMapping::kind)
        .collect();
    assert_eq!(
        kinds,
        [
            ValueKind::Uuid,
            ValueKind::I16,
            ValueKind::I32,
            ValueKind::I64,
            ValueKind::Timestamp,
            ValueKind::TimestampTz,
        ]
    );
}
