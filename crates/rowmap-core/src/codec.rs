// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-type codec compilation.
//!
//! A codec is compiled once per bound field and reused for every record.
//! Selection walks a fixed priority list; the first match wins:
//!
//! | # | Source | Example |
//! |---|--------|---------|
//! | 1 | [`Registry`] entry for the exact type, then for a declared interface | `register_decoder::<Date, _, _>` |
//! | 2 | marshal / unmarshal capability | `#[record(marshal)]` |
//! | 3 | text capability | `#[value(display, from_str)]` |
//! | 4 | built-in codec for the [`Kind`](crate::Kind) | integers, floats, bool, strings, base64 bytes, pointers, [`Dynamic`](crate::Dynamic) |
//! | 5 | none | [`Error::UnsupportedType`](crate::Error::UnsupportedType) |

mod decode;
mod encode;
mod registry;

use std::{any::Any, sync::Arc};

pub(crate) use decode::decode_fn;
pub(crate) use encode::encode_fn;
pub use registry::Registry;

use crate::error::Result;

/// Decodes one cell into a type-erased destination.
pub(crate) type DecodeFn = Arc<dyn Fn(&str, &mut dyn Any) -> Result<()> + Send + Sync>;

/// Appends the cell for a type-erased source; the flag is `omitempty`.
pub(crate) type EncodeFn = Arc<dyn Fn(&dyn Any, bool, &mut String) -> Result<()> + Send + Sync>;
