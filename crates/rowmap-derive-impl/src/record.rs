// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Record)]` implementation.
//!
//! # Architecture
//!
//! ```text
//! record.rs (orchestrator)
//! ├── parse.rs        - attribute and field parsing
//! ├── reflect.rs      - Reflect impl with field descriptors
//! └── capabilities.rs - capability builder chain (shared with Value)
//! ```

pub mod capabilities;
pub mod parse;
mod reflect;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::RecordDef;

/// Main entry point for the Record derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match RecordDef::from_derive_input(&input) {
        Ok(record) => reflect::generate(&record).into(),
        Err(err) => err.write_errors().into()
    }
}
