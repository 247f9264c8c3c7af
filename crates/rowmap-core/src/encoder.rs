// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record encoding.
//!
//! An [`Encoder`] writes one row per record to a [`Writer`]. The first call
//! resolves the record type, compiles an encoder for every field and, unless
//! disabled, writes the header row in resolved order. Encoding a different
//! type or switching the tag namespace recompiles; the header is written at
//! most once per encoder.

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc
};

use tracing::{debug, trace};

use crate::{
    cache::TypeCache,
    codec::{EncodeFn, Registry, encode_fn},
    error::{BoxError, Error, Result},
    fields::ResolvedField,
    io::Writer,
    options::EncoderOptions,
    reflect::{Reflect, TypeInfo}
};

struct BoundField {
    field:  ResolvedField,
    encode: EncodeFn
}

struct Binding {
    type_id: TypeId,
    tag:     String,
    fields:  Vec<BoundField>
}

/// Encodes reflected records into rows.
///
/// ```rust
/// use rowmap_core::{Encoder, EncoderOptions};
///
/// let encoder = Encoder::new(Vec::<Vec<String>>::new())
///     .with_options(EncoderOptions::new().with_auto_header(false));
/// assert!(encoder.get_ref().is_empty());
/// ```
pub struct Encoder<W> {
    writer:         W,
    options:        EncoderOptions,
    registry:       Registry,
    cache:          Arc<TypeCache>,
    bound:          Option<Binding>,
    header_written: bool,
    record:         Vec<String>
}

impl<W: Writer> Encoder<W> {
    /// Creates an encoder with default settings.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            options: EncoderOptions::default(),
            registry: Registry::default(),
            cache: TypeCache::global(),
            bound: None,
            header_written: false,
            record: Vec::new()
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_options(mut self, options: EncoderOptions) -> Self {
        self.options = options;
        self.bound = None;
        self
    }

    /// Uses `cache` instead of the global type cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<TypeCache>) -> Self {
        self.cache = cache;
        self.bound = None;
        self
    }

    /// Current settings.
    #[must_use]
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Selects the tag namespace.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.options.tag = tag.into();
        self.bound = None;
    }

    /// Enables or disables the automatic header row.
    pub fn set_auto_header(&mut self, auto_header: bool) {
        self.options.auto_header = auto_header;
    }

    /// Registers an encoder for type `T`; see
    /// [`Registry::register_encoder`].
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `T` already has one.
    pub fn register_encoder<T, F, E>(&mut self, encode: F) -> Result<()>
    where
        T: Any,
        F: Fn(&T) -> std::result::Result<Vec<u8>, E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        self.registry.register_encoder(encode)?;
        self.bound = None;
        Ok(())
    }

    /// Registers an encoder for implementors of interface `I`; see
    /// [`Registry::register_interface_encoder`].
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `I` already has one.
    pub fn register_interface_encoder<I, F, E>(&mut self, encode: F) -> Result<()>
    where
        I: ?Sized + 'static,
        F: Fn(&I) -> std::result::Result<Vec<u8>, E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        self.registry.register_interface_encoder(encode)?;
        self.bound = None;
        Ok(())
    }

    /// Shared access to the writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the header row for `T` without a record.
    ///
    /// A later [`encode`](Encoder::encode) does not write it again.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEncodeSource`] when `T` is not a record,
    /// [`Error::Column`] when a field has no encoder.
    pub fn encode_header<T: Reflect>(&mut self) -> Result<()> {
        let info = T::type_info();
        let (target_info, _) = info.deref();
        if !target_info.is_struct() {
            return Err(not_a_record(&info));
        }
        self.bind(&target_info)?;
        self.write_header()
    }

    /// Writes one record.
    ///
    /// `value` may be a record or any pointer chain ending in one. Nil
    /// pointers inside the record produce empty cells.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEncodeSource`] when `T` is not a record or is nil
    /// - [`Error::Column`] wrapping a field failure
    /// - [`Error::Write`] when the writer fails
    pub fn encode<T: Reflect>(&mut self, value: &T) -> Result<()> {
        let info = T::type_info();
        let (target_info, chain) = info.deref();
        if !target_info.is_struct() {
            return Err(not_a_record(&info));
        }

        let mut source: &dyn Any = value;
        for pointer in &chain {
            source = (pointer.get)(source).ok_or(Error::InvalidEncodeSource {
                type_name: info.name(),
                reason:    "source is nil"
            })?;
        }

        self.bind(&target_info)?;
        if self.options.auto_header && !self.header_written {
            self.write_header()?;
        }

        let Some(binding) = self.bound.as_ref() else {
            return Ok(());
        };
        self.record.resize(binding.fields.len(), String::new());
        for (cell, bound) in self.record.iter_mut().zip(&binding.fields) {
            cell.clear();
            let Some(field) = bound.field.get(source) else {
                continue;
            };
            (bound.encode)(field, bound.field.tag().omit_empty, cell)
                .map_err(|err| Error::column(bound.field.name(), err))?;
        }

        trace!(type_name = target_info.name(), "encoded record");
        self.writer
            .write_record(&self.record)
            .map_err(|err| Error::Write(err.into()))
    }

    /// Writes every record of `values`.
    ///
    /// # Errors
    ///
    /// Stops at the first failure; see [`Encoder::encode`].
    pub fn encode_all<'a, T, I>(&mut self, values: I) -> Result<()>
    where
        T: Reflect,
        I: IntoIterator<Item = &'a T>
    {
        values.into_iter().try_for_each(|value| self.encode(value))
    }

    fn write_header(&mut self) -> Result<()> {
        let Some(binding) = self.bound.as_ref() else {
            return Ok(());
        };
        let header: Vec<String> = binding
            .fields
            .iter()
            .map(|bound| bound.field.name().to_owned())
            .collect();
        self.writer
            .write_record(&header)
            .map_err(|err| Error::Write(err.into()))?;
        self.header_written = true;
        debug!(columns = header.len(), "wrote header row");
        Ok(())
    }

    fn bind(&mut self, info: &TypeInfo) -> Result<()> {
        if let Some(binding) = &self.bound
            && binding.type_id == info.id()
            && binding.tag == self.options.tag
        {
            return Ok(());
        }

        let resolved = self.cache.fields(&self.options.tag, info);
        let fields = resolved
            .iter()
            .map(|field| {
                let encode = encode_fn(field.type_info(), &self.registry)
                    .map_err(|err| Error::column(field.name(), err))?;
                Ok(BoundField {
                    field: field.clone(),
                    encode
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            type_name = info.name(),
            tag = %self.options.tag,
            fields = fields.len(),
            "encoder bound record type"
        );
        self.bound = Some(Binding {
            type_id: info.id(),
            tag: self.options.tag.clone(),
            fields
        });
        Ok(())
    }
}

fn not_a_record(info: &TypeInfo) -> Error {
    Error::InvalidEncodeSource {
        type_name: info.name(),
        reason:    "source is not a record"
    }
}

impl<W> fmt::Debug for Encoder<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("header_written", &self.header_written)
            .field("bound", &self.bound.as_ref().map(|b| b.fields.len()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rowmap_derive_impl::Record;

    use super::*;
    use crate::reflect::Dynamic;

    #[derive(Record, Default)]
    struct Item {
        pub id:    u32,
        #[tag(csv = "label")]
        pub name:  String,
        #[tag(csv = ",omitempty")]
        pub price: Option<f64>,
        #[tag(csv = "-")]
        pub note:  String
    }

    fn written(encoder: Encoder<Vec<Vec<String>>>) -> Vec<Vec<String>> {
        encoder.into_inner()
    }

    #[test]
    fn header_then_rows() {
        let mut encoder = Encoder::new(Vec::new());
        encoder
            .encode(&Item {
                id:    1,
                name:  "pen".into(),
                price: Some(1.5),
                note:  "x".into()
            })
            .unwrap();
        encoder.encode(&Item::default()).unwrap();
        assert_eq!(written(encoder), [
            vec!["id", "label", "price"],
            vec!["1", "pen", "1.5"],
            vec!["0", "", ""],
        ]);
    }

    #[test]
    fn explicit_header_is_not_repeated() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode_header::<Item>().unwrap();
        encoder.encode(&Item::default()).unwrap();
        let rows = written(encoder);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["id", "label", "price"]);
    }

    #[test]
    fn auto_header_can_be_disabled() {
        let mut encoder =
            Encoder::new(Vec::new()).with_options(EncoderOptions::new().with_auto_header(false));
        encoder.encode(&Item::default()).unwrap();
        assert_eq!(written(encoder), [vec!["0", "", ""]]);
    }

    #[test]
    fn pointer_sources_are_followed() {
        let mut encoder = Encoder::new(Vec::new());
        let value = Some(Box::new(Item {
            id: 4,
            ..Item::default()
        }));
        encoder.encode(&value).unwrap();
        let err = encoder.encode(&None::<Item>).unwrap_err();
        assert!(matches!(err, Error::InvalidEncodeSource { reason: "source is nil", .. }));
        assert_eq!(written(encoder)[1][0], "4");
    }

    #[test]
    fn non_record_source_is_rejected() {
        let mut encoder = Encoder::new(Vec::new());
        assert!(matches!(
            encoder.encode(&5_u8).unwrap_err(),
            Error::InvalidEncodeSource { .. }
        ));
    }

    #[derive(Record, Default)]
    struct Inner {
        pub v: i32
    }

    #[derive(Record, Default)]
    struct Holder {
        #[embed]
        pub inner: Option<Inner>,
        pub tail:  Dynamic
    }

    #[test]
    fn nil_intermediate_pointer_gives_empty_cell() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(&Holder::default()).unwrap();
        encoder
            .encode(&Holder {
                inner: Some(Inner {
                    v: 0
                }),
                tail:  Dynamic::new(String::from("t"))
            })
            .unwrap();
        assert_eq!(written(encoder), [vec!["v", "tail"], vec!["", ""], vec!["0", "t"]]);
    }

    struct Opaque;

    impl Reflect for Opaque {
        fn type_info() -> TypeInfo {
            TypeInfo::opaque::<Self>()
        }
    }

    #[derive(Record)]
    struct Broken {
        pub ok:  i32,
        pub bad: Opaque
    }

    #[test]
    fn unsupported_field_fails_with_column() {
        let mut encoder = Encoder::new(Vec::new());
        let err = encoder
            .encode(&Broken {
                ok:  1,
                bad: Opaque
            })
            .unwrap_err();
        assert_eq!(err.column_name(), Some("bad"));
        assert!(matches!(err.root(), Error::UnsupportedType { .. }));
    }

    #[test]
    fn different_type_rebinds_without_second_header() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(&Inner {
            v: 1
        })
        .unwrap();
        encoder.encode(&Item::default()).unwrap();
        assert_eq!(written(encoder), [vec!["v"], vec!["1"], vec!["0", "", ""]]);
    }

    #[test]
    fn registered_encoder_wins() {
        let mut encoder = Encoder::new(Vec::new());
        encoder
            .register_encoder(|v: &u32| Ok::<_, BoxError>(format!("#{v}").into_bytes()))
            .unwrap();
        encoder.encode(&Inner::default()).unwrap();
        encoder.encode(&Item::default()).unwrap();
        assert_eq!(written(encoder)[2][0], "#0");
    }
}
