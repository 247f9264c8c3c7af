// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The empty-interface value holder.

use std::{any::Any, fmt};

use super::{Kind, Reflect, TypeInfo};

/// Object-safe view of a value stored inside a [`Dynamic`].
///
/// Implemented for every `Reflect + Clone + PartialEq + Debug` type.
pub trait DynValue: Any + Send + Sync {
    /// Description of the concrete type.
    fn type_info(&self) -> TypeInfo;

    /// Shared access to the concrete value.
    fn as_any(&self) -> &dyn Any;

    /// Mutable access to the concrete value.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clones into a new box.
    fn clone_box(&self) -> Box<dyn DynValue>;

    /// Compares with another held value of any type.
    fn eq_dyn(&self, other: &dyn DynValue) -> bool;

    /// Debug-formats the concrete value.
    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T> DynValue for T
where
    T: Reflect + Clone + PartialEq + fmt::Debug + Send + Sync
{
    fn type_info(&self) -> TypeInfo {
        T::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn DynValue> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn DynValue) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }

    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A field that may hold a value of any reflected type, or nothing.
///
/// Decoding into a nil `Dynamic` stores the raw cell as a `String`; decoding
/// into a populated one decodes using the held value's own type. Encoding a
/// nil `Dynamic` yields an empty cell.
///
/// ```rust
/// use rowmap_core::Dynamic;
///
/// let value = Dynamic::new(10_i32);
/// assert_eq!(value.downcast_ref::<i32>(), Some(&10));
/// assert!(Dynamic::nil().is_nil());
/// ```
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn DynValue>>);

impl Dynamic {
    /// Creates an empty holder.
    #[must_use]
    pub const fn nil() -> Self {
        Self(None)
    }

    /// Creates a holder containing `value`.
    #[must_use]
    pub fn new<T: DynValue>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// Check if nothing is held.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    /// Replaces the held value.
    pub fn set<T: DynValue>(&mut self, value: T) {
        self.0 = Some(Box::new(value));
    }

    /// Takes the held value out, leaving nil behind.
    pub fn take(&mut self) -> Self {
        Self(self.0.take())
    }

    /// Returns the held value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref()?.as_any().downcast_ref::<T>()
    }

    /// Returns the held value mutably if it is a `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn value(&self) -> Option<&dyn DynValue> {
        self.0.as_deref()
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut dyn DynValue> {
        self.0.as_deref_mut()
    }
}

impl Reflect for Dynamic {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Kind::Interface)
    }
}

impl Clone for Dynamic {
    fn clone(&self) -> Self {
        Self(self.0.as_deref().map(DynValue::clone_box))
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self.value(), other.value()) {
            (None, None) => true,
            (Some(a), Some(b)) => a.eq_dyn(b),
            _ => false
        }
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => {
                f.write_str("Dynamic(")?;
                value.fmt_dyn(f)?;
                f.write_str(")")
            }
            None => f.write_str("Dynamic(nil)")
        }
    }
}
