// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cell encoders.
//!
//! Built-in encoders honor `omitempty` by writing nothing for the zero value
//! of their kind. Capabilities and registered encoders always write.

use std::{
    any::Any,
    fmt::{Display, LowerExp, Write as _},
    sync::Arc
};

use base64::{Engine, engine::general_purpose::STANDARD};

use super::{EncodeFn, Registry, registry::push_utf8};
use crate::{
    error::{Error, Result},
    reflect::{Dynamic, Kind, PointerInfo, TypeInfo, downcast_ref}
};

/// Compiles the encoder for a type.
pub(crate) fn encode_fn(info: &TypeInfo, registry: &Registry) -> Result<EncodeFn> {
    if let Some(encode) = registry.encoder_for(info) {
        return Ok(encode);
    }

    let capabilities = info.capabilities();
    if let Some(marshal) = capabilities.marshal {
        let type_name = info.name();
        return Ok(Arc::new(move |value: &dyn Any, _omit_empty: bool, out: &mut String| {
            push_utf8(out, marshal(value)?, type_name)
        }));
    }
    if let Some(display) = capabilities.display {
        return Ok(Arc::new(move |value: &dyn Any, _omit_empty: bool, out: &mut String| {
            display(value, out)
        }));
    }

    let encode: EncodeFn = match info.kind() {
        Kind::Bool => Arc::new(encode_display::<bool>),
        Kind::I8 => Arc::new(encode_display::<i8>),
        Kind::I16 => Arc::new(encode_display::<i16>),
        Kind::I32 => Arc::new(encode_display::<i32>),
        Kind::I64 => Arc::new(encode_display::<i64>),
        Kind::Isize => Arc::new(encode_display::<isize>),
        Kind::U8 => Arc::new(encode_display::<u8>),
        Kind::U16 => Arc::new(encode_display::<u16>),
        Kind::U32 => Arc::new(encode_display::<u32>),
        Kind::U64 => Arc::new(encode_display::<u64>),
        Kind::Usize => Arc::new(encode_display::<usize>),
        Kind::F32 => Arc::new(encode_float::<f32>),
        Kind::F64 => Arc::new(encode_float::<f64>),
        Kind::Str => Arc::new(encode_string),
        Kind::Bytes => Arc::new(encode_bytes),
        Kind::Pointer(pointer) => encode_pointer(*pointer, registry)?,
        Kind::Interface => encode_interface(registry.clone()),
        Kind::Struct(_) | Kind::Opaque => {
            return Err(Error::UnsupportedType {
                type_name: info.name()
            });
        }
    };
    Ok(encode)
}

/// Numbers and booleans: `Display` output, nothing for the default value.
fn encode_display<T>(value: &dyn Any, omit_empty: bool, out: &mut String) -> Result<()>
where
    T: Display + Default + PartialEq + Any
{
    let value = downcast_ref::<T>(value)?;
    if omit_empty && *value == T::default() {
        return Ok(());
    }
    // Writing into a String cannot fail.
    let _ = write!(out, "{value}");
    Ok(())
}

/// Floats with a magnitude readout for choosing the notation.
trait FloatText: Display + LowerExp + Default + PartialEq + Copy + Any {
    fn magnitude(self) -> f64;
}

impl FloatText for f32 {
    fn magnitude(self) -> f64 {
        f64::from(self.abs())
    }
}

impl FloatText for f64 {
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

/// Shortest round-trip text; exponent form outside `[1e-5, 1e21)`.
fn encode_float<T: FloatText>(value: &dyn Any, omit_empty: bool, out: &mut String) -> Result<()> {
    let value = *downcast_ref::<T>(value)?;
    if omit_empty && value == T::default() {
        return Ok(());
    }
    let magnitude = value.magnitude();
    let _ = if magnitude.is_finite() && magnitude != 0.0 && !(1e-5..1e21).contains(&magnitude) {
        write!(out, "{value:e}")
    } else {
        write!(out, "{value}")
    };
    Ok(())
}

fn encode_string(value: &dyn Any, _omit_empty: bool, out: &mut String) -> Result<()> {
    out.push_str(downcast_ref::<String>(value)?);
    Ok(())
}

fn encode_bytes(value: &dyn Any, _omit_empty: bool, out: &mut String) -> Result<()> {
    STANDARD.encode_string(downcast_ref::<Vec<u8>>(value)?, out);
    Ok(())
}

fn encode_pointer(pointer: PointerInfo, registry: &Registry) -> Result<EncodeFn> {
    let inner = encode_fn(&(pointer.elem)(), registry)?;
    Ok(Arc::new(move |value: &dyn Any, _omit_empty: bool, out: &mut String| {
        match (pointer.get)(value) {
            Some(target) => inner(target, false, out),
            None => Ok(())
        }
    }))
}

fn encode_interface(registry: Registry) -> EncodeFn {
    Arc::new(move |value: &dyn Any, omit_empty: bool, out: &mut String| {
        let Some(held) = downcast_ref::<Dynamic>(value)?.value() else {
            return Ok(());
        };
        let encode = encode_fn(&held.type_info(), &registry)?;
        encode(held.as_any(), omit_empty, out)
    })
}
