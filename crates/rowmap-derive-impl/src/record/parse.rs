// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the derive macros.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── attrs.rs  - #[record(...)] / #[value(...)] via darling
//! ├── def.rs    - RecordDef, ValueDef
//! ├── field.rs  - #[tag(...)], #[embed], visibility
//! └── rename.rs - rename_all rules
//! ```

mod attrs;
mod def;
mod field;
mod rename;

#[cfg(test)]
mod tests;

pub use attrs::{CapabilitySet, RecordAttrs, ValueAttrs};
pub use def::{RecordDef, ValueDef};
pub use field::FieldDef;
pub use rename::RenameRule;
