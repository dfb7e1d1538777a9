// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column naming rules for `#[entity(rename_all = "...")]`.

use convert_case::{Case, Casing};
use darling::FromMeta;

/// Rule applied to field names that carry no explicit `#[column(name)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `created_at` → `CreatedAt`.
    Pascal,

    /// `created_at` → `createdAt`.
    Camel,

    /// `createdAt` → `created_at`.
    Snake,

    /// `created_at` → `CREATED_AT`.
    ScreamingSnake,

    /// `created_at` → `created-at`.
    Kebab,

    /// Lowercase the field name as written.
    Lower,

    /// Uppercase the field name as written.
    Upper
}

impl RenameRule {
    /// Apply the rule to a field name.
    #[must_use]
    pub fn apply(self, field: &str) -> String {
        match self {
            Self::Pascal => field.to_case(Case::Pascal),
            Self::Camel => field.to_case(Case::Camel),
            Self::Snake => field.to_case(Case::Snake),
            Self::ScreamingSnake => field.to_case(Case::Snake).to_uppercase(),
            Self::Kebab => field.to_case(Case::Kebab),
            Self::Lower => field.to_lowercase(),
            Self::Upper => field.to_uppercase()
        }
    }
}

impl FromMeta for RenameRule {
    /// Accepts the serde spellings: `"PascalCase"`, `"camelCase"`,
    /// `"snake_case"`, `"SCREAMING_SNAKE_CASE"`, `"kebab-case"`,
    /// `"lowercase"` and `"UPPERCASE"`.
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}
