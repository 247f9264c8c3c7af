// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cell decoders.

use std::{
    any::{Any, type_name},
    str::FromStr,
    sync::Arc
};

use base64::{Engine, engine::general_purpose::STANDARD};

use super::{DecodeFn, Registry};
use crate::{
    error::{Error, Result},
    reflect::{Dynamic, Kind, PointerInfo, TypeInfo, downcast_mut}
};

/// Compiles the decoder for a type.
pub(crate) fn decode_fn(info: &TypeInfo, registry: &Registry) -> Result<DecodeFn> {
    if let Some(decode) = registry.decoder_for(info) {
        return Ok(decode);
    }

    let capabilities = info.capabilities();
    if let Some(unmarshal) = capabilities.unmarshal {
        return Ok(Arc::new(move |cell: &str, value: &mut dyn Any| {
            unmarshal(value, cell.as_bytes())
        }));
    }
    if let Some(from_str) = capabilities.from_str {
        return Ok(Arc::new(move |cell: &str, value: &mut dyn Any| {
            from_str(value, cell)
        }));
    }

    let decode: DecodeFn = match info.kind() {
        Kind::Bool => Arc::new(decode_bool),
        Kind::I8 => Arc::new(decode_number::<i8>),
        Kind::I16 => Arc::new(decode_number::<i16>),
        Kind::I32 => Arc::new(decode_number::<i32>),
        Kind::I64 => Arc::new(decode_number::<i64>),
        Kind::Isize => Arc::new(decode_number::<isize>),
        Kind::U8 => Arc::new(decode_number::<u8>),
        Kind::U16 => Arc::new(decode_number::<u16>),
        Kind::U32 => Arc::new(decode_number::<u32>),
        Kind::U64 => Arc::new(decode_number::<u64>),
        Kind::Usize => Arc::new(decode_number::<usize>),
        Kind::F32 => Arc::new(decode_float::<f32>),
        Kind::F64 => Arc::new(decode_float::<f64>),
        Kind::Str => Arc::new(decode_string),
        Kind::Bytes => Arc::new(decode_bytes),
        Kind::Pointer(pointer) => decode_pointer(*pointer, registry)?,
        Kind::Interface => decode_interface(registry.clone()),
        Kind::Struct(_) | Kind::Opaque => {
            return Err(Error::UnsupportedType {
                type_name: info.name()
            });
        }
    };
    Ok(decode)
}

fn unmarshal_error<T>(cell: &str) -> Error {
    Error::UnmarshalType {
        value:     cell.to_owned(),
        type_name: type_name::<T>()
    }
}

fn decode_bool(cell: &str, value: &mut dyn Any) -> Result<()> {
    let target = downcast_mut::<bool>(value)?;
    *target = match cell {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        _ => return Err(unmarshal_error::<bool>(cell))
    };
    Ok(())
}

fn decode_number<T: FromStr + Any>(cell: &str, value: &mut dyn Any) -> Result<()> {
    let target = downcast_mut::<T>(value)?;
    *target = cell.parse().map_err(|_| unmarshal_error::<T>(cell))?;
    Ok(())
}

/// Floats with a NaN constant; an empty cell decodes to NaN.
trait Float: FromStr + Any {
    const NAN: Self;
}

impl Float for f32 {
    const NAN: Self = f32::NAN;
}

impl Float for f64 {
    const NAN: Self = f64::NAN;
}

fn decode_float<T: Float>(cell: &str, value: &mut dyn Any) -> Result<()> {
    let target = downcast_mut::<T>(value)?;
    *target = if cell.is_empty() {
        T::NAN
    } else {
        cell.parse().map_err(|_| unmarshal_error::<T>(cell))?
    };
    Ok(())
}

fn decode_string(cell: &str, value: &mut dyn Any) -> Result<()> {
    let target = downcast_mut::<String>(value)?;
    target.clear();
    target.push_str(cell);
    Ok(())
}

fn decode_bytes(cell: &str, value: &mut dyn Any) -> Result<()> {
    let target = downcast_mut::<Vec<u8>>(value)?;
    *target = STANDARD.decode(cell)?;
    Ok(())
}

fn decode_pointer(pointer: PointerInfo, registry: &Registry) -> Result<DecodeFn> {
    let elem = (pointer.elem)();
    let inner = decode_fn(&elem, registry)?;
    let elem_name = elem.name();
    Ok(Arc::new(move |cell: &str, value: &mut dyn Any| {
        let target = (pointer.materialize)(value).ok_or(Error::Mismatch {
            type_name: elem_name
        })?;
        inner(cell, target)
    }))
}

fn decode_interface(registry: Registry) -> DecodeFn {
    Arc::new(move |cell: &str, value: &mut dyn Any| {
        let holder = downcast_mut::<Dynamic>(value)?;
        if holder.is_nil() {
            holder.set(cell.to_owned());
            return Ok(());
        }
        let held = holder.value_mut().ok_or(Error::Mismatch {
            type_name: type_name::<Dynamic>()
        })?;
        let decode = decode_fn(&held.type_info(), &registry)?;
        decode(cell, held.as_any_mut())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflect;

    fn decode<T: Reflect + Default>(cell: &str) -> Result<T> {
        let mut value = T::default();
        decode_fn(&T::type_info(), &Registry::default())?(cell, &mut value)?;
        Ok(value)
    }

    #[test]
    fn integers_parse_base_ten() {
        assert_eq!(decode::<i8>("-12").unwrap(), -12);
        assert_eq!(decode::<u64>("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(decode::<isize>("+7").unwrap(), 7);
    }

    #[test]
    fn integer_overflow_and_garbage_fail() {
        let err = decode::<u8>("256").unwrap_err();
        assert!(matches!(err, Error::UnmarshalType { ref value, .. } if value == "256"));
        assert!(decode::<i32>("1.5").is_err());
        assert!(decode::<u16>("").is_err());
        assert!(decode::<u32>("-1").is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(decode::<f64>("1.25").unwrap(), 1.25);
        assert!(decode::<f64>("NaN").unwrap().is_nan());
        assert!(decode::<f32>("nan").unwrap().is_nan());
        assert!(decode::<f64>("").unwrap().is_nan());
        assert!(decode::<f64>("one").is_err());
    }

    #[test]
    fn booleans_accept_standard_spellings() {
        for cell in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(decode::<bool>(cell).unwrap(), "{cell}");
        }
        for cell in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!decode::<bool>(cell).unwrap(), "{cell}");
        }
        assert!(decode::<bool>("yes").is_err());
        assert!(decode::<bool>("tRuE").is_err());
    }

    #[test]
    fn bytes_are_base64() {
        assert_eq!(decode::<Vec<u8>>("aGVsbG8=").unwrap(), b"hello");
        assert!(matches!(decode::<Vec<u8>>("***").unwrap_err(), Error::Base64(_)));
    }

    #[test]
    fn pointers_allocate() {
        assert_eq!(decode::<Option<i32>>("5").unwrap(), Some(5));
        assert_eq!(decode::<Option<Box<String>>>("x").unwrap(), Some(Box::new("x".to_owned())));
    }

    #[test]
    fn nil_interface_stores_string() {
        let value = decode::<Dynamic>("raw").unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("raw"));
    }

    #[test]
    fn populated_interface_decodes_held_type() {
        let mut value = Dynamic::new(0_i64);
        decode_fn(&Dynamic::type_info(), &Registry::default()).unwrap()("42", &mut value).unwrap();
        assert_eq!(value.downcast_ref::<i64>(), Some(&42));

        let mut value = Dynamic::new(0_i64);
        let err = decode_fn(&Dynamic::type_info(), &Registry::default()).unwrap()("x", &mut value);
        assert!(err.is_err());
    }

    #[test]
    fn char_uses_text_capability() {
        assert_eq!(decode::<char>("z").unwrap(), 'z');
        assert!(matches!(decode::<char>("zz").unwrap_err(), Error::Marshaler { method: "from_str", .. }));
    }

    #[test]
    fn opaque_without_capability_is_unsupported() {
        struct Raw;
        impl Reflect for Raw {
            fn type_info() -> TypeInfo {
                TypeInfo::opaque::<Self>()
            }
        }
        let err = decode_fn(&Raw::type_info(), &Registry::default()).err().unwrap();
        assert!(matches!(err, Error::UnsupportedType { .. }));
    }

    #[test]
    fn registry_overrides_builtin() {
        let mut registry = Registry::default();
        registry
            .register_decoder(|data: &[u8]| Ok::<i32, crate::BoxError>(data.len() as i32))
            .unwrap();
        let mut value = 0_i32;
        decode_fn(&i32::type_info(), &registry).unwrap()("abc", &mut value).unwrap();
        assert_eq!(value, 3);
    }
}
