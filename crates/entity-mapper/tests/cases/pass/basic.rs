// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_mapper::{ConverterRegistry, Entity, Value, ValueRow};

#[derive(Debug, Default, PartialEq, Entity)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
    cache: Vec<u8>,
}

fn main() {
    let registry = ConverterRegistry::new();
    let ann = Person {
        name: "Ann".to_string(),
        age: 30,
        email: None,
        cache: vec![1, 2, 3],
    };

    let record = registry.to_parameters(&ann).unwrap();
    assert_eq!(record.len(), 3);
    assert_eq!(record.get("@age").unwrap().value, Value::I32(30));
    assert_eq!(record.get("@email").unwrap().value, Value::Null);

    let row = ValueRow::new()
        .with("NAME", "Ann")
        .with("Age", 30_i32)
        .with("Email", Value::Null);
    let people: Vec<Person> = registry.to_entities(&[row]).unwrap();
    assert_eq!(people[0].name, "Ann");
    assert!(people[0].cache.is_empty());
}
