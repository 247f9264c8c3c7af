// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime engine for rowmap.
//!
//! Maps tabular records (rows of strings with a header) onto Rust structs
//! and back. Types describe themselves through [`Reflect`], usually derived
//! with `#[derive(Record)]` from the `rowmap` crate; this crate turns those
//! descriptions into ordered column lists and per-field codecs.
//!
//! # Overview
//!
//! - [`Decoder`] - rows to records
//! - [`Encoder`] - records to rows
//! - [`Reflect`], [`TypeInfo`] - static type descriptions
//! - [`Registry`] - custom codecs keyed by type or interface
//! - [`TypeCache`] - shared resolved field lists
//! - [`Reader`], [`Writer`] - row sources and sinks
//! - [`prelude`] - convenient re-exports
//!
//! # Column resolution
//!
//! Columns are named by the field annotation of the selected tag namespace
//! (default [`DEFAULT_TAG`]), falling back to the member name. Members of
//! `#[embed]` records are promoted into the outer record; a shallower field
//! shadows a deeper one of the same name and equally deep duplicates are
//! dropped. See [`Tag`] for the annotation grammar.
//!
//! # Usage
//!
//! Most users should depend on `rowmap`, which re-exports this crate
//! together with the derive macros:
//!
//! ```rust,ignore
//! use rowmap::{Decoder, Record, rows};
//!
//! #[derive(Record, Default)]
//! struct User {
//!     pub name: String,
//!     #[tag(csv = "age,omitempty")]
//!     pub age:  u32
//! }
//!
//! let mut decoder = Decoder::new(rows([["name", "age"], ["Ann", "30"]]))?;
//! let users: Vec<User> = decoder.decode_all()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate self as rowmap_core;

mod cache;
mod codec;
mod decoder;
mod encoder;
mod error;
mod fields;
mod io;
mod options;
pub mod prelude;
mod reflect;
mod tag;

use std::sync::Arc;

pub use cache::TypeCache;
pub use codec::Registry;
pub use decoder::{Decoder, MapFn};
pub use encoder::Encoder;
pub use error::{BoxError, Error, Result};
pub use fields::ResolvedField;
pub use io::{Reader, Writer, rows};
pub use options::{DEFAULT_TAG, DecoderOptions, EncoderOptions};
pub use reflect::{
    Capabilities, DynValue, Dynamic, FieldInfo, Getter, GetterMut, InterfaceCast, Kind, Marshaler,
    PointerInfo, Reflect, TypeInfo, TypeInfoFn, Unmarshaler
};
pub use tag::Tag;

/// Column names of `T` for a tag namespace, in resolved order.
///
/// # Errors
///
/// - [`Error::InvalidEncodeSource`] when `T` is not a record
/// - [`Error::Column`] wrapping [`Error::UnsupportedType`] when a field has
///   no encoder
pub fn header<T: Reflect>(tag: &str) -> Result<Vec<String>> {
    let info = T::type_info();
    let (target, _) = info.deref();
    if !target.is_struct() {
        return Err(Error::InvalidEncodeSource {
            type_name: info.name(),
            reason:    "source is not a record"
        });
    }

    let registry = Registry::default();
    TypeCache::global()
        .fields(tag, &target)
        .iter()
        .map(|field| {
            codec::encode_fn(field.type_info(), &registry)
                .map_err(|err| Error::column(field.name(), err))?;
            Ok(field.name().to_owned())
        })
        .collect()
}

/// Resolved fields of `T` for a tag namespace, from the global cache.
///
/// Pointer layers around `T` are looked through; a non-record yields an
/// empty list.
#[must_use]
pub fn fields<T: Reflect>(tag: &str) -> Arc<[ResolvedField]> {
    let (target, _) = T::type_info().deref();
    TypeCache::global().fields(tag, &target)
}
