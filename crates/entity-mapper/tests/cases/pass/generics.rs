// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_mapper::{ConverterRegistry, Entity, FromValue, ToValue, Value, ValueRow};

#[derive(Debug, Default, Entity)]
pub struct Keyed<K>
where
    K: ToValue + FromValue + 'static,
{
    pub key: K,
    pub label: String,
}

fn main() {
    let registry = ConverterRegistry::new();

    let record = registry
        .to_parameters(&Keyed { key: 7_i64, label: "seven".to_string() })
        .unwrap();
    assert_eq!(record.get("@key").unwrap().value, Value::I64(7));

    let rows = [ValueRow::new().with("key", "abc").with("label", "text key")];
    let keyed: Vec<Keyed<String>> = registry.to_entities(&rows).unwrap();
    assert_eq!(keyed[0].key, "abc");
}
