// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use rowmap_core::prelude::*;
//!
//! let decoder = Decoder::new(rows([["a"], ["1"]])).unwrap();
//! assert_eq!(decoder.header(), ["a"]);
//! ```

pub use crate::{
    BoxError, Decoder, DecoderOptions, Dynamic, Encoder, EncoderOptions, Error, Marshaler, Reader,
    Reflect, Registry, Unmarshaler, Writer, rows
};
