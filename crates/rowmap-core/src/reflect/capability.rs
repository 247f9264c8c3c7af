// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Self-codec capabilities a type can declare.
//!
//! A capability takes precedence over the built-in codec for the type's kind
//! but yields to codecs registered on a decoder or encoder.
//!
//! | Capability | Trait | Direction |
//! |------------|-------|-----------|
//! | marshal | [`Marshaler`] | encode |
//! | unmarshal | [`Unmarshaler`] | decode |
//! | display | [`Display`](fmt::Display) | encode (text) |
//! | from_str | [`FromStr`] | decode (text) |
//!
//! Marshal capabilities win over text capabilities in their direction.

use std::{
    any::{Any, type_name},
    fmt::{self, Write as _},
    str::FromStr
};

use super::{downcast_mut, downcast_ref};
use crate::error::{BoxError, Error, Result};

/// Produces the cell bytes for a value.
///
/// The bytes must be valid UTF-8.
///
/// ```rust
/// use rowmap_core::{BoxError, Marshaler};
///
/// struct Flag(bool);
///
/// impl Marshaler for Flag {
///     fn marshal_field(&self) -> Result<Vec<u8>, BoxError> {
///         Ok(if self.0 { b"Y".to_vec() } else { b"N".to_vec() })
///     }
/// }
///
/// assert_eq!(Flag(true).marshal_field().unwrap(), b"Y");
/// ```
pub trait Marshaler {
    /// Encodes `self` as cell bytes.
    fn marshal_field(&self) -> std::result::Result<Vec<u8>, BoxError>;
}

/// Parses cell bytes into an existing value.
pub trait Unmarshaler {
    /// Replaces the contents of `self` with the decoded cell.
    fn unmarshal_field(&mut self, data: &[u8]) -> std::result::Result<(), BoxError>;
}

/// Type-erased encoder capability.
pub type MarshalFn = fn(&dyn Any) -> Result<Vec<u8>>;

/// Type-erased decoder capability.
pub type UnmarshalFn = fn(&mut dyn Any, &[u8]) -> Result<()>;

/// Type-erased text encoder; appends to the output buffer.
pub type DisplayFn = fn(&dyn Any, &mut String) -> Result<()>;

/// Type-erased text decoder.
pub type FromStrFn = fn(&mut dyn Any, &str) -> Result<()>;

/// Capability table of a type.
#[derive(Clone, Copy, Default)]
pub struct Capabilities {
    /// Set by [`TypeInfo::with_marshaler`](super::TypeInfo::with_marshaler).
    pub marshal:   Option<MarshalFn>,
    /// Set by [`TypeInfo::with_unmarshaler`](super::TypeInfo::with_unmarshaler).
    pub unmarshal: Option<UnmarshalFn>,
    /// Set by [`TypeInfo::with_display`](super::TypeInfo::with_display).
    pub display:   Option<DisplayFn>,
    /// Set by [`TypeInfo::with_from_str`](super::TypeInfo::with_from_str).
    pub from_str:  Option<FromStrFn>
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("marshal", &self.marshal.is_some())
            .field("unmarshal", &self.unmarshal.is_some())
            .field("display", &self.display.is_some())
            .field("from_str", &self.from_str.is_some())
            .finish()
    }
}

pub(super) fn marshal_via<T: Marshaler + Any>(value: &dyn Any) -> Result<Vec<u8>> {
    downcast_ref::<T>(value)?
        .marshal_field()
        .map_err(|source| Error::Marshaler {
            type_name: type_name::<T>(),
            method: "marshal",
            source
        })
}

pub(super) fn unmarshal_via<T: Unmarshaler + Any>(value: &mut dyn Any, data: &[u8]) -> Result<()> {
    downcast_mut::<T>(value)?
        .unmarshal_field(data)
        .map_err(|source| Error::Marshaler {
            type_name: type_name::<T>(),
            method: "unmarshal",
            source
        })
}

pub(super) fn display_via<T: fmt::Display + Any>(value: &dyn Any, out: &mut String) -> Result<()> {
    let value = downcast_ref::<T>(value)?;
    write!(out, "{value}").map_err(|err| Error::Marshaler {
        type_name: type_name::<T>(),
        method:    "display",
        source:    Box::new(err)
    })
}

pub(super) fn from_str_via<T>(value: &mut dyn Any, text: &str) -> Result<()>
where
    T: FromStr + Any,
    T::Err: Into<BoxError>
{
    let target = downcast_mut::<T>(value)?;
    *target = text.parse::<T>().map_err(|err| Error::Marshaler {
        type_name: type_name::<T>(),
        method:    "from_str",
        source:    err.into()
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper(String);

    impl Marshaler for Upper {
        fn marshal_field(&self) -> std::result::Result<Vec<u8>, BoxError> {
            Ok(self.0.to_uppercase().into_bytes())
        }
    }

    impl Unmarshaler for Upper {
        fn unmarshal_field(&mut self, data: &[u8]) -> std::result::Result<(), BoxError> {
            if data.is_empty() {
                return Err("empty".into());
            }
            self.0 = String::from_utf8(data.to_vec())?.to_lowercase();
            Ok(())
        }
    }

    #[test]
    fn marshal_goes_through_trait() {
        let value = Upper("abc".into());
        assert_eq!(marshal_via::<Upper>(&value).unwrap(), b"ABC");
    }

    #[test]
    fn unmarshal_failure_names_method() {
        let mut value = Upper(String::new());
        let err = unmarshal_via::<Upper>(&mut value, b"").unwrap_err();
        assert!(matches!(err, Error::Marshaler { method: "unmarshal", .. }));

        unmarshal_via::<Upper>(&mut value, b"XY").unwrap();
        assert_eq!(value.0, "xy");
    }

    #[test]
    fn text_capabilities_round_trip() {
        let mut out = String::from("n=");
        display_via::<u32>(&42_u32, &mut out).unwrap();
        assert_eq!(out, "n=42");

        let mut target = 0_u32;
        from_str_via::<u32>(&mut target, "17").unwrap();
        assert_eq!(target, 17);
        assert!(from_str_via::<u32>(&mut target, "x").is_err());
    }
}
