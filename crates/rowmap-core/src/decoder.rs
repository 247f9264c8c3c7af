// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record decoding.
//!
//! A [`Decoder`] reads rows from a [`Reader`] and assigns each cell to the
//! record field whose resolved name matches the column header.
//!
//! # Lifecycle
//!
//! ```text
//! new(reader) ── reads header ──► unbound
//!                                   │ decode::<T>()
//!                                   ▼
//!                               bound(T, tag) ◄── same T, same tag: reused
//!                                   │ other T, tag change, registration
//!                                   ▼
//!                                rebind
//! ```
//!
//! Binding resolves `T` through the [`TypeCache`] and compiles a decoder for
//! every field that has a matching column. Fields without a column are left
//! untouched unless [`DecoderOptions::disallow_missing_columns`] is set.

use std::{
    any::{Any, TypeId},
    borrow::Cow,
    collections::HashMap,
    fmt,
    sync::Arc
};

use tracing::{debug, trace};

use crate::{
    cache::TypeCache,
    codec::{DecodeFn, Registry, decode_fn},
    error::{BoxError, Error, Result},
    fields::ResolvedField,
    io::Reader,
    options::DecoderOptions,
    reflect::{Reflect, TypeInfo}
};

/// Value substitution applied to every cell before decoding.
///
/// Receives the raw cell and its column name.
pub type MapFn = Box<dyn FnMut(&str, &str) -> String + Send>;

struct BoundField {
    field:  ResolvedField,
    column: usize,
    decode: DecodeFn
}

struct Binding {
    type_id: TypeId,
    tag:     String,
    fields:  Vec<BoundField>
}

/// Decodes records into reflected types.
///
/// ```rust
/// use rowmap_core::{Decoder, rows};
///
/// # fn main() -> rowmap_core::Result<()> {
/// let mut decoder = Decoder::new(rows([["n"], ["1"], ["2"]]))?;
/// assert_eq!(decoder.header(), ["n"]);
/// # Ok(())
/// # }
/// ```
pub struct Decoder<R> {
    reader:   R,
    header:   Vec<String>,
    columns:  HashMap<String, usize>,
    record:   Vec<String>,
    used:     Vec<bool>,
    options:  DecoderOptions,
    registry: Registry,
    cache:    Arc<TypeCache>,
    map:      Option<MapFn>,
    bound:    Option<Binding>
}

impl<R: Reader> Decoder<R> {
    /// Creates a decoder whose first record is the header.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] when the reader is exhausted immediately,
    /// [`Error::Read`] when it fails.
    pub fn new(mut reader: R) -> Result<Self> {
        let header = reader
            .read_record()
            .map_err(|err| Error::Read(err.into()))?
            .ok_or(Error::EmptyInput)?;
        Ok(Self::with_header(reader, header))
    }

    /// Creates a decoder with an explicit header; every record is data.
    pub fn with_header<I, S>(reader: R, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        // Last occurrence of a duplicated header name wins.
        let columns = header
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        let used = vec![false; header.len()];
        Self {
            reader,
            header,
            columns,
            record: Vec::new(),
            used,
            options: DecoderOptions::default(),
            registry: Registry::default(),
            cache: TypeCache::global(),
            map: None,
            bound: None
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.set_options(options);
        self
    }

    /// Uses `cache` instead of the global type cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<TypeCache>) -> Self {
        self.cache = cache;
        self.bound = None;
        self
    }

    /// Replaces the settings.
    pub fn set_options(&mut self, options: DecoderOptions) {
        self.options = options;
        self.bound = None;
    }

    /// Current settings.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Selects the tag namespace.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.options.tag = tag.into();
        self.bound = None;
    }

    /// Enables or disables fail-slow mode.
    pub fn set_fail_slow(&mut self, fail_slow: bool) {
        self.options.fail_slow = fail_slow;
    }

    /// Installs a value substitution applied before decoding each cell.
    ///
    /// The substitution runs before the `omitempty` check, so it can turn
    /// placeholder values into empty cells.
    pub fn set_map<F>(&mut self, map: F)
    where
        F: FnMut(&str, &str) -> String + Send + 'static
    {
        self.map = Some(Box::new(map));
    }

    /// Registers a decoder for type `T`; see
    /// [`Registry::register_decoder`].
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `T` already has one.
    pub fn register_decoder<T, F, E>(&mut self, decode: F) -> Result<()>
    where
        T: Any,
        F: Fn(&[u8]) -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        self.registry.register_decoder(decode)?;
        self.bound = None;
        Ok(())
    }

    /// Registers a decoder for implementors of interface `I`; see
    /// [`Registry::register_interface_decoder`].
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `I` already has one.
    pub fn register_interface_decoder<I, F, E>(&mut self, decode: F) -> Result<()>
    where
        I: ?Sized + 'static,
        F: Fn(&[u8], &mut I) -> std::result::Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        self.registry.register_interface_decoder(decode)?;
        self.bound = None;
        Ok(())
    }

    /// Header row.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Most recently read record.
    #[must_use]
    pub fn record(&self) -> &[String] {
        &self.record
    }

    /// Indices of header columns not consumed by the last decode call.
    #[must_use]
    pub fn unused(&self) -> Vec<usize> {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(index, _)| index)
            .collect()
    }

    /// Shared access to the reader.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads one record into `dst`.
    ///
    /// Returns `Ok(false)` at end of stream. `dst` may be a record or any
    /// pointer chain ending in one; nil pointers are allocated.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDecodeTarget`] when `T` is not a record
    /// - [`Error::FieldCount`] when the record width differs from the header
    /// - [`Error::Column`] wrapping the first field failure, or
    ///   [`Error::Joined`] with all of them in fail-slow mode
    pub fn decode<T: Reflect>(&mut self, dst: &mut T) -> Result<bool> {
        let Some(record) = self
            .reader
            .read_record()
            .map_err(|err| Error::Read(err.into()))?
        else {
            return Ok(false);
        };
        self.record = record;
        self.used.fill(false);
        if self.record.len() != self.header.len() {
            return Err(Error::FieldCount {
                expected: self.header.len(),
                actual:   self.record.len()
            });
        }
        self.assign(dst)?;
        Ok(true)
    }

    /// Decodes every remaining record.
    ///
    /// # Errors
    ///
    /// Stops at the first failing record; see [`Decoder::decode`].
    pub fn decode_all<T: Reflect + Default>(&mut self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        loop {
            let mut value = T::default();
            if !self.decode(&mut value)? {
                return Ok(out);
            }
            out.push(value);
        }
    }

    fn assign<T: Reflect>(&mut self, dst: &mut T) -> Result<()> {
        let info = T::type_info();
        let (target_info, chain) = info.deref();
        if !target_info.is_struct() {
            return Err(Error::InvalidDecodeTarget {
                type_name: info.name(),
                reason:    "destination is not a record"
            });
        }

        let mut target: &mut dyn Any = dst;
        for pointer in &chain {
            target = (pointer.materialize)(target).ok_or(Error::InvalidDecodeTarget {
                type_name: info.name(),
                reason:    "destination pointer cannot be allocated"
            })?;
        }

        self.bind(&target_info)?;
        let Some(binding) = self.bound.as_ref() else {
            return Ok(());
        };

        let mut errors = Vec::new();
        for bound in &binding.fields {
            self.used[bound.column] = true;
            let column = &self.header[bound.column];
            let raw = &self.record[bound.column];
            let cell = match self.map.as_mut() {
                Some(map) => Cow::Owned(map(raw, column)),
                None => Cow::Borrowed(raw.as_str())
            };
            if bound.field.tag().omit_empty && cell.is_empty() {
                continue;
            }

            let result = bound
                .field
                .get_mut(&mut *target)
                .and_then(|slot| (bound.decode)(&*cell, slot));
            if let Err(err) = result {
                let err = Error::column(column.as_str(), err);
                if !self.options.fail_slow {
                    return Err(err);
                }
                errors.push(err);
            }
        }

        trace!(
            type_name = target_info.name(),
            failed = errors.len(),
            "decoded record"
        );
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Joined(errors))
        }
    }

    fn bind(&mut self, info: &TypeInfo) -> Result<()> {
        if let Some(binding) = &self.bound
            && binding.type_id == info.id()
            && binding.tag == self.options.tag
        {
            return Ok(());
        }

        let resolved = self.cache.fields(&self.options.tag, info);
        let mut fields = Vec::with_capacity(resolved.len());
        let mut missing = Vec::new();
        for field in resolved.iter() {
            let Some(&column) = self.columns.get(field.name()) else {
                missing.push(field.name().to_owned());
                continue;
            };
            let decode = decode_fn(field.type_info(), &self.registry)
                .map_err(|err| Error::column(field.name(), err))?;
            fields.push(BoundField {
                field: field.clone(),
                column,
                decode
            });
        }
        if self.options.disallow_missing_columns && !missing.is_empty() {
            return Err(Error::MissingColumns {
                columns: missing
            });
        }

        debug!(
            type_name = info.name(),
            tag = %self.options.tag,
            bound = fields.len(),
            missing = missing.len(),
            "decoder bound record type"
        );
        self.bound = Some(Binding {
            type_id: info.id(),
            tag: self.options.tag.clone(),
            fields
        });
        Ok(())
    }
}

impl<R> fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("header", &self.header)
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("bound", &self.bound.as_ref().map(|b| b.fields.len()))
            .finish_non_exhaustive()
    }
}
