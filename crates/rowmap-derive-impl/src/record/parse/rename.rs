// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `rename_all` rules for implicit column names.
//!
//! | Value | `first_name` becomes |
//! |-------|----------------------|
//! | `"snake_case"` | `first_name` |
//! | `"kebab-case"` | `first-name` |
//! | `"camelCase"` | `firstName` |
//! | `"PascalCase"` | `FirstName` |
//! | `"SCREAMING_SNAKE_CASE"` | `FIRST_NAME` |
//! | `"SCREAMING-KEBAB-CASE"` | `FIRST-NAME` |

use convert_case::{Case, Casing};
use darling::FromMeta;

/// Case conversion applied to member names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `snake_case`.
    Snake,
    /// `kebab-case`.
    Kebab,
    /// `camelCase`.
    Camel,
    /// `PascalCase`.
    Pascal,
    /// `SCREAMING_SNAKE_CASE`.
    ScreamingSnake,
    /// `SCREAMING-KEBAB-CASE`.
    ScreamingKebab
}

impl RenameRule {
    /// Converts a member name.
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Snake => name.to_case(Case::Snake),
            Self::Kebab => name.to_case(Case::Kebab),
            Self::Camel => name.to_case(Case::Camel),
            Self::Pascal => name.to_case(Case::Pascal),
            Self::ScreamingSnake => name.to_case(Case::Snake).to_uppercase(),
            Self::ScreamingKebab => name.to_case(Case::Kebab).to_uppercase()
        }
    }
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "snake_case" => Ok(Self::Snake),
            "kebab-case" => Ok(Self::Kebab),
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(darling::Error::unknown_value(other))
        }
    }
}
