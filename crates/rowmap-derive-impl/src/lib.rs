// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Container-Level
//!
//! ```rust,ignore
//! #[derive(Record)]
//! #[record(
//!     rename_all = "camelCase",     // Optional: case of implicit column names
//!     marshal, unmarshal,           // Optional: Marshaler / Unmarshaler
//!     display, from_str,            // Optional: Display / FromStr
//!     implements(Describe)          // Optional: trait-object views
//! )]
//! pub struct User { /* ... */ }
//!
//! #[derive(Value)]
//! #[value(display, from_str)]       // Same capability flags, no rename_all
//! pub enum Level { Low, High }
//! ```
//!
//! ## Field-Level
//!
//! ```rust,ignore
//! pub struct User {
//!     #[tag(csv = "user_name")]              // Column name in the `csv` namespace
//!     pub name: String,
//!
//!     #[tag(csv = "age,omitempty")]          // Skip empty cells / default values
//!     pub age: Option<u32>,
//!
//!     #[tag(csv = "-")]                      // Ignored
//!     pub secret: String,
//!
//!     #[tag(csv = ",inline", json = "addr")] // Flatten a nested record
//!     pub address: Address,
//!
//!     #[embed]                               // Promote members of a nested record
//!     pub meta: Meta,
//! }
//! ```

mod record;
mod utils;
mod value;

use proc_macro::TokenStream;

/// Derive macro describing a struct as a record.
///
/// Generates a `rowmap_core::Reflect` implementation listing every member
/// with its visibility, `#[embed]` flag, raw tags and accessors. Column
/// resolution happens at runtime per tag namespace.
///
/// # Example
///
/// ```rust,ignore
/// use rowmap::Record;
///
/// #[derive(Record, Default)]
/// pub struct Address {
///     pub city:    String,
///     pub country: String,
/// }
///
/// #[derive(Record, Default)]
/// pub struct Person {
///     #[tag(csv = "Name")]
///     pub name:    String,
///     #[embed]
///     pub address: Address,
///     pub age:     Option<u32>,
/// }
/// ```
///
/// # Errors
///
/// Compile errors are reported for enums, tuple and unit structs, lifetime
/// parameters, duplicated tag namespaces and unknown `rename_all` values.
#[proc_macro_derive(Record, attributes(record, tag, embed))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}

/// Derive macro describing a type as an opaque column value.
///
/// The value is converted through the capabilities listed in
/// `#[value(...)]`.
///
/// # Example
///
/// ```rust,ignore
/// use rowmap::Value;
///
/// #[derive(Value, Clone, Copy, Default)]
/// #[value(display, from_str)]
/// pub struct Celsius(f64);
/// ```
#[proc_macro_derive(Value, attributes(value))]
pub fn derive_value(input: TokenStream) -> TokenStream {
    value::derive(input)
}
