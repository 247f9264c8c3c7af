// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # rowmap
//!
//! One crate, all features. Re-exports:
//! - [`Record`] and [`Value`] derive macros from `rowmap-derive-impl`
//! - All types from `rowmap-core` ([`Decoder`], [`Encoder`], [`Registry`],
//!   [`TypeCache`], [`Dynamic`])
//!
//! # Quick Start
//!
//! ```rust
//! use rowmap::{Decoder, Encoder, Record, rows};
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! pub struct Row {
//!     #[tag(csv = "Int")]
//!     pub int:  i64,
//!     #[tag(csv = "Str")]
//!     pub text: String,
//!     #[tag(csv = "Bool")]
//!     pub flag: bool
//! }
//!
//! let mut decoder = Decoder::new(rows([["Int", "Str", "Bool"], ["1", "a", "true"]])).unwrap();
//! let decoded: Vec<Row> = decoder.decode_all().unwrap();
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.encode_all(&decoded).unwrap();
//! let written = encoder.into_inner();
//! assert_eq!(written[1], ["1", "a", "true"]);
//! ```

pub use rowmap_core::*;
pub use rowmap_derive_impl::{Record, Value};
