// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! User-registered codecs.

use std::{
    any::{Any, TypeId, type_name},
    collections::{HashMap, hash_map::Entry},
    sync::Arc
};

use super::{DecodeFn, EncodeFn};
use crate::{
    error::{BoxError, Error, Result},
    reflect::{InterfaceCast, TypeInfo, downcast_mut, downcast_ref}
};

type InterfaceDecodeFn = Arc<dyn Fn(&str, &mut dyn Any, &InterfaceCast) -> Result<()> + Send + Sync>;
type InterfaceEncodeFn = Arc<dyn Fn(&dyn Any, &InterfaceCast, &mut String) -> Result<()> + Send + Sync>;

/// Custom codecs keyed by concrete type or by interface.
///
/// Registrations take priority over every capability and built-in codec.
/// Registering the same key twice fails with
/// [`Error::DuplicateRegistration`].
///
/// ```rust
/// use rowmap_core::Registry;
///
/// let mut registry = Registry::new();
/// registry
///     .register_decoder(|data: &[u8]| std::str::from_utf8(data).map(str::len))
///     .unwrap();
/// assert!(registry.register_decoder(|_: &[u8]| Ok::<usize, std::fmt::Error>(0)).is_err());
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    decoders:           HashMap<TypeId, DecodeFn>,
    encoders:           HashMap<TypeId, EncodeFn>,
    interface_decoders: HashMap<TypeId, InterfaceDecodeFn>,
    interface_encoders: HashMap<TypeId, InterfaceEncodeFn>
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
            && self.encoders.is_empty()
            && self.interface_decoders.is_empty()
            && self.interface_encoders.is_empty()
    }

    /// Registers a decoder producing values of type `T`.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `T` already has a decoder.
    pub fn register_decoder<T, F, E>(&mut self, decode: F) -> Result<()>
    where
        T: Any,
        F: Fn(&[u8]) -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        let decode: DecodeFn = Arc::new(move |cell: &str, value: &mut dyn Any| {
            let target = downcast_mut::<T>(value)?;
            *target = decode(cell.as_bytes()).map_err(custom::<T, E>)?;
            Ok(())
        });
        insert_once(&mut self.decoders, TypeId::of::<T>(), type_name::<T>(), decode)
    }

    /// Registers an encoder for values of type `T`.
    ///
    /// The produced bytes must be valid UTF-8. `omitempty` does not apply.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `T` already has an encoder.
    pub fn register_encoder<T, F, E>(&mut self, encode: F) -> Result<()>
    where
        T: Any,
        F: Fn(&T) -> std::result::Result<Vec<u8>, E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        let encode: EncodeFn = Arc::new(move |value: &dyn Any, _omit_empty: bool, out: &mut String| {
            let bytes = encode(downcast_ref::<T>(value)?).map_err(custom::<T, E>)?;
            push_utf8(out, bytes, type_name::<T>())
        });
        insert_once(&mut self.encoders, TypeId::of::<T>(), type_name::<T>(), encode)
    }

    /// Registers a decoder for every type that implements the interface `I`.
    ///
    /// Types declare interfaces with `#[record(implements(...))]`,
    /// `#[value(implements(...))]` or
    /// [`TypeInfo::implements`](crate::TypeInfo::implements).
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `I` already has a decoder.
    pub fn register_interface_decoder<I, F, E>(&mut self, decode: F) -> Result<()>
    where
        I: ?Sized + 'static,
        F: Fn(&[u8], &mut I) -> std::result::Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        let decode: InterfaceDecodeFn = Arc::new(move |cell: &str, value: &mut dyn Any, cast: &InterfaceCast| {
            let caster = cast.caster::<I>().ok_or_else(mismatch::<I>)?;
            let target = (caster.as_mut)(value).ok_or_else(mismatch::<I>)?;
            decode(cell.as_bytes(), target).map_err(custom::<I, E>)
        });
        insert_once(
            &mut self.interface_decoders,
            TypeId::of::<I>(),
            type_name::<I>(),
            decode
        )
    }

    /// Registers an encoder for every type that implements the interface `I`.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if `I` already has an encoder.
    pub fn register_interface_encoder<I, F, E>(&mut self, encode: F) -> Result<()>
    where
        I: ?Sized + 'static,
        F: Fn(&I) -> std::result::Result<Vec<u8>, E> + Send + Sync + 'static,
        E: Into<BoxError>
    {
        let encode: InterfaceEncodeFn = Arc::new(move |value: &dyn Any, cast: &InterfaceCast, out: &mut String| {
            let caster = cast.caster::<I>().ok_or_else(mismatch::<I>)?;
            let source = (caster.as_ref)(value).ok_or_else(mismatch::<I>)?;
            let bytes = encode(source).map_err(custom::<I, E>)?;
            push_utf8(out, bytes, type_name::<I>())
        });
        insert_once(
            &mut self.interface_encoders,
            TypeId::of::<I>(),
            type_name::<I>(),
            encode
        )
    }

    pub(crate) fn decoder_for(&self, info: &TypeInfo) -> Option<DecodeFn> {
        if let Some(decode) = self.decoders.get(&info.id()) {
            return Some(Arc::clone(decode));
        }
        info.interfaces().iter().find_map(|cast| {
            let decode = Arc::clone(self.interface_decoders.get(&cast.id())?);
            let cast = cast.clone();
            Some(Arc::new(move |cell: &str, value: &mut dyn Any| decode(cell, value, &cast)) as DecodeFn)
        })
    }

    pub(crate) fn encoder_for(&self, info: &TypeInfo) -> Option<EncodeFn> {
        if let Some(encode) = self.encoders.get(&info.id()) {
            return Some(Arc::clone(encode));
        }
        info.interfaces().iter().find_map(|cast| {
            let encode = Arc::clone(self.interface_encoders.get(&cast.id())?);
            let cast = cast.clone();
            Some(Arc::new(move |value: &dyn Any, _omit_empty: bool, out: &mut String| {
                encode(value, &cast, out)
            }) as EncodeFn)
        })
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("decoders", &self.decoders.len())
            .field("encoders", &self.encoders.len())
            .field("interface_decoders", &self.interface_decoders.len())
            .field("interface_encoders", &self.interface_encoders.len())
            .finish()
    }
}

fn insert_once<V>(
    map: &mut HashMap<TypeId, V>,
    key: TypeId,
    type_name: &'static str,
    value: V
) -> Result<()> {
    match map.entry(key) {
        Entry::Occupied(_) => Err(Error::DuplicateRegistration {
            type_name
        }),
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

fn custom<T: ?Sized, E: Into<BoxError>>(err: E) -> Error {
    Error::Custom {
        type_name: type_name::<T>(),
        source:    err.into()
    }
}

fn mismatch<T: ?Sized>() -> Error {
    Error::Mismatch {
        type_name: type_name::<T>()
    }
}

pub(super) fn push_utf8(out: &mut String, bytes: Vec<u8>, type_name: &'static str) -> Result<()> {
    let text = String::from_utf8(bytes).map_err(|err| Error::Custom {
        type_name,
        source: Box::new(err)
    })?;
    out.push_str(&text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflect;

    trait Shape {
        fn sides(&self) -> u8;
        fn set_sides(&mut self, sides: u8);
    }

    #[derive(Debug, Default, PartialEq)]
    struct Polygon(u8);

    impl Shape for Polygon {
        fn sides(&self) -> u8 {
            self.0
        }

        fn set_sides(&mut self, sides: u8) {
            self.0 = sides;
        }
    }

    fn polygon_info() -> TypeInfo {
        TypeInfo::opaque::<Polygon>().implements::<dyn Shape>(
            |v| v.downcast_ref::<Polygon>().map(|p| p as &(dyn Shape + 'static)),
            |v| v.downcast_mut::<Polygon>().map(|p| p as &mut (dyn Shape + 'static))
        )
    }

    #[test]
    fn exact_type_registration() {
        let mut registry = Registry::new();
        registry
            .register_decoder(|data: &[u8]| -> std::result::Result<u8, BoxError> {
                Ok(std::str::from_utf8(data)?.len() as u8)
            })
            .unwrap();

        let decode = registry.decoder_for(&<u8 as Reflect>::type_info()).unwrap();
        let mut value = 0_u8;
        decode("abcd", &mut value).unwrap();
        assert_eq!(value, 4);
        assert!(registry.decoder_for(&<u16 as Reflect>::type_info()).is_none());
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = Registry::new();
        registry
            .register_encoder(|v: &u8| Ok::<_, BoxError>(v.to_string().into_bytes()))
            .unwrap();
        let err = registry
            .register_encoder(|_: &u8| Ok::<_, BoxError>(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistration { .. }));
    }

    #[test]
    fn interface_registration_applies_to_implementors() {
        let mut registry = Registry::new();
        registry
            .register_interface_decoder::<dyn Shape, _, _>(|data, shape| {
                shape.set_sides(data.len() as u8);
                Ok::<_, BoxError>(())
            })
            .unwrap();
        registry
            .register_interface_encoder::<dyn Shape, _, _>(|shape| {
                Ok::<_, BoxError>(format!("{}-gon", shape.sides()).into_bytes())
            })
            .unwrap();

        let info = polygon_info();
        let mut value = Polygon::default();
        registry.decoder_for(&info).unwrap()("xyz", &mut value).unwrap();
        assert_eq!(value, Polygon(3));

        let mut out = String::new();
        registry.encoder_for(&info).unwrap()(&value, false, &mut out).unwrap();
        assert_eq!(out, "3-gon");
    }

    #[test]
    fn user_errors_are_wrapped() {
        let mut registry = Registry::new();
        registry
            .register_decoder(|_: &[u8]| Err::<u32, _>("boom"))
            .unwrap();
        let mut value = 0_u32;
        let err = registry.decoder_for(&<u32 as Reflect>::type_info()).unwrap()("1", &mut value).unwrap_err();
        assert!(matches!(err, Error::Custom { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn invalid_utf8_output_is_an_error() {
        let mut registry = Registry::new();
        registry
            .register_encoder(|_: &u8| Ok::<_, BoxError>(vec![0xff, 0xfe]))
            .unwrap();
        let mut out = String::new();
        let err = registry.encoder_for(&<u8 as Reflect>::type_info()).unwrap()(&1_u8, false, &mut out);
        assert!(err.is_err());
    }
}
