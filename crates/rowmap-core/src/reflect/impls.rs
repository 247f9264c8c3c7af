// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! [`Reflect`] for primitives and standard containers.
//!
//! `Option<T>` is the nullable pointer: nil is `None`, and materializing
//! stores `T::default()`. `Box<T>` is a pointer that is never nil.

use std::any::Any;

use super::{Kind, PointerInfo, Reflect, TypeInfo};

macro_rules! reflect_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>(Kind::$kind)
                }
            }
        )*
    };
}

reflect_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Str,
    Vec<u8> => Bytes,
}

impl Reflect for char {
    fn type_info() -> TypeInfo {
        TypeInfo::opaque::<Self>()
            .with_display::<Self>()
            .with_from_str::<Self>()
    }
}

impl<T: Reflect + Default> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::pointer::<Self>(PointerInfo {
            elem:        T::type_info,
            nullable:    true,
            get:         |value| {
                value
                    .downcast_ref::<Option<T>>()?
                    .as_ref()
                    .map(|inner| inner as &dyn Any)
            },
            get_mut:     |value| {
                value
                    .downcast_mut::<Option<T>>()?
                    .as_mut()
                    .map(|inner| inner as &mut dyn Any)
            },
            materialize: |value| {
                let slot = value.downcast_mut::<Option<T>>()?;
                Some(slot.get_or_insert_with(T::default) as &mut dyn Any)
            }
        })
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::pointer::<Self>(PointerInfo {
            elem:        T::type_info,
            nullable:    false,
            get:         |value| {
                value
                    .downcast_ref::<Box<T>>()
                    .map(|inner| &**inner as &dyn Any)
            },
            get_mut:     |value| {
                value
                    .downcast_mut::<Box<T>>()
                    .map(|inner| &mut **inner as &mut dyn Any)
            },
            materialize: |value| {
                value
                    .downcast_mut::<Box<T>>()
                    .map(|inner| &mut **inner as &mut dyn Any)
            }
        })
    }
}
