// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

mod mapper {
    pub use entity_mapper::*;
}

use mapper::Entity;

#[derive(Debug, Default, Entity)]
#[entity(crate = "mapper")]
pub struct Note {
    pub body: String,
}

fn main() {
    let record = mapper::ConverterRegistry::new()
        .to_parameters(&Note { body: "hello".to_string() })
        .unwrap();
    assert_eq!(record.len(), 1);
}
