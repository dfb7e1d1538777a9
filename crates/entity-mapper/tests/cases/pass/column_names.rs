// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use entity_mapper::{ConverterRegistry, Entity};

#[derive(Debug, Default, Entity)]
#[entity(rename_all = "PascalCase")]
pub struct Customer {
    pub first_name: String,

    #[column(name = "EMail")]
    pub email: String,

    pub loyalty_points: i64,
}

#[derive(Debug, Default, Entity)]
#[entity(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Setting {
    pub setting_key: String,
    pub setting_value: Option<String>,
}

fn main() {
    let registry = ConverterRegistry::new();

    let names: Vec<String> = registry
        .to_parameters(&Customer::default())
        .unwrap()
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, ["@FirstName", "@EMail", "@LoyaltyPoints"]);

    let names: Vec<String> = registry
        .to_parameters(&Setting::default())
        .unwrap()
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, ["@SETTING_KEY", "@SETTING_VALUE"]);
}
