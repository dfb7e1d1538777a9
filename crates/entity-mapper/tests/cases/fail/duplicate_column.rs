// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use entity_mapper::Entity;

#[derive(Entity)]
pub struct Order {
    pub total: i64,
    #[column(name = "TOTAL")]
    pub amount: i64
}

fn main() {}
