// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static type descriptions used in place of runtime reflection.
//!
//! Every type that can appear inside a record implements [`Reflect`], which
//! returns a [`TypeInfo`]: the type identity, its [`Kind`], the capabilities
//! it exposes (marshal, display, ...) and the interfaces it can be viewed
//! as. Records get their implementation from `#[derive(Record)]`, opaque leaf
//! types from `#[derive(Value)]`, and primitives from this crate.
//!
//! # Architecture
//!
//! ```text
//! reflect.rs (model)
//! ├── capability.rs - Marshaler/Unmarshaler traits, capability table
//! ├── dynamic.rs    - Dynamic, the empty-interface holder
//! └── impls.rs      - Reflect for primitives, Option, Box, Vec<u8>
//! ```
//!
//! # Value access
//!
//! Values are accessed through `&dyn Any`. A [`FieldInfo`] carries a pair of
//! accessor functions that project a record onto one of its members, and a
//! [`PointerInfo`] carries the functions that look through (or allocate) one
//! layer of indirection. Type descriptions of members are stored as function
//! pointers, so self-referential records are described lazily.

mod capability;
mod dynamic;
mod impls;

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    sync::Arc
};

pub use capability::{Capabilities, Marshaler, Unmarshaler};
pub use dynamic::{DynValue, Dynamic};

use crate::error::{Error, Result};

/// Lazily produces the description of a type.
pub type TypeInfoFn = fn() -> TypeInfo;

/// Projects a value onto one of its parts.
pub type Getter = fn(&dyn Any) -> Option<&dyn Any>;

/// Mutable counterpart of [`Getter`].
pub type GetterMut = fn(&mut dyn Any) -> Option<&mut dyn Any>;

/// Types that can describe their own shape.
///
/// # Example
///
/// ```rust
/// use rowmap_core::{Kind, Reflect};
///
/// let info = <Option<i32> as Reflect>::type_info();
/// let (target, chain) = info.deref();
/// assert!(matches!(target.kind(), Kind::I32));
/// assert_eq!(chain.len(), 1);
/// ```
pub trait Reflect: Any {
    /// Returns the description of `Self`.
    fn type_info() -> TypeInfo;
}

/// Shape of a type, as far as the codec compiler is concerned.
#[derive(Clone)]
pub enum Kind {
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `String`.
    Str,
    /// `Vec<u8>`, encoded as base64.
    Bytes,
    /// One layer of indirection (`Option<T>`, `Box<T>`).
    Pointer(PointerInfo),
    /// A [`Dynamic`] value holder.
    Interface,
    /// A record with named members in declaration order.
    Struct(Arc<[FieldInfo]>),
    /// Anything else; only usable through capabilities or registrations.
    Opaque
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pointer(pointer) => f.debug_tuple("Pointer").field(pointer).finish(),
            Self::Struct(fields) => f.debug_tuple("Struct").field(&fields.len()).finish(),
            Self::Bool => f.write_str("Bool"),
            Self::I8 => f.write_str("I8"),
            Self::I16 => f.write_str("I16"),
            Self::I32 => f.write_str("I32"),
            Self::I64 => f.write_str("I64"),
            Self::Isize => f.write_str("Isize"),
            Self::U8 => f.write_str("U8"),
            Self::U16 => f.write_str("U16"),
            Self::U32 => f.write_str("U32"),
            Self::U64 => f.write_str("U64"),
            Self::Usize => f.write_str("Usize"),
            Self::F32 => f.write_str("F32"),
            Self::F64 => f.write_str("F64"),
            Self::Str => f.write_str("Str"),
            Self::Bytes => f.write_str("Bytes"),
            Self::Interface => f.write_str("Interface"),
            Self::Opaque => f.write_str("Opaque")
        }
    }
}

/// One layer of indirection.
#[derive(Clone, Copy)]
pub struct PointerInfo {
    /// Description of the pointee.
    pub elem:        TypeInfoFn,
    /// Whether the pointer can be nil.
    pub nullable:    bool,
    /// Pointee, or `None` when nil.
    pub get:         Getter,
    /// Mutable pointee, or `None` when nil.
    pub get_mut:     GetterMut,
    /// Mutable pointee, allocating a default value when nil.
    pub materialize: GetterMut
}

impl fmt::Debug for PointerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerInfo")
            .field("elem", &(self.elem)().name())
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// One structural member of a record.
///
/// Generated by `#[derive(Record)]`; the accessors project the record onto
/// the member and return `None` only if handed a value of another type.
#[derive(Clone, Copy)]
pub struct FieldInfo {
    /// Structural member name (after any `rename_all`).
    pub name:     &'static str,
    /// Whether the member is public.
    pub exported: bool,
    /// Whether the member is marked `#[embed]`.
    pub embedded: bool,
    /// Raw annotation strings keyed by tag namespace.
    pub tags:     &'static [(&'static str, &'static str)],
    /// Description of the member type.
    pub ty:       TypeInfoFn,
    /// Shared accessor.
    pub get:      Getter,
    /// Mutable accessor.
    pub get_mut:  GetterMut
}

impl FieldInfo {
    /// Raw annotation for the given namespace.
    #[must_use]
    pub fn tag(&self, namespace: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(key, _)| *key == namespace)
            .map(|(_, raw)| *raw)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("exported", &self.exported)
            .field("embedded", &self.embedded)
            .field("tags", &self.tags)
            .finish()
    }
}

/// Upcast functions that view a concrete type as a trait object `I`.
pub(crate) struct Caster<I: ?Sized + 'static> {
    pub(crate) as_ref: fn(&dyn Any) -> Option<&I>,
    pub(crate) as_mut: fn(&mut dyn Any) -> Option<&mut I>
}

/// Declares that a type can be viewed as the trait object with id `id`.
#[derive(Clone)]
pub struct InterfaceCast {
    id:     TypeId,
    name:   &'static str,
    caster: Arc<dyn Any + Send + Sync>
}

impl InterfaceCast {
    /// Identity of the trait object type (`TypeId::of::<dyn Trait>()`).
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Name of the trait object type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn caster<I: ?Sized + 'static>(&self) -> Option<&Caster<I>> {
        self.caster.downcast_ref::<Caster<I>>()
    }
}

impl fmt::Debug for InterfaceCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterfaceCast").field(&self.name).finish()
    }
}

/// Description of a type.
#[derive(Clone)]
pub struct TypeInfo {
    id:           TypeId,
    name:         &'static str,
    kind:         Kind,
    capabilities: Capabilities,
    interfaces:   Vec<InterfaceCast>
}

impl TypeInfo {
    /// Describes `T` with the given kind and no capabilities.
    #[must_use]
    pub fn new<T: Any>(kind: Kind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind,
            capabilities: Capabilities::default(),
            interfaces: Vec::new()
        }
    }

    /// Describes an opaque leaf type.
    #[must_use]
    pub fn opaque<T: Any>() -> Self {
        Self::new::<T>(Kind::Opaque)
    }

    /// Describes a record with the given members.
    #[must_use]
    pub fn record<T: Any>(fields: Vec<FieldInfo>) -> Self {
        Self::new::<T>(Kind::Struct(fields.into()))
    }

    /// Describes a pointer type.
    #[must_use]
    pub fn pointer<T: Any>(pointer: PointerInfo) -> Self {
        Self::new::<T>(Kind::Pointer(pointer))
    }

    /// Type identity.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shape of the type.
    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Capabilities declared by the type.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Interfaces the type can be viewed as.
    #[must_use]
    pub fn interfaces(&self) -> &[InterfaceCast] {
        &self.interfaces
    }

    /// Check if the type is a record.
    #[must_use]
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, Kind::Struct(_))
    }

    /// Record members, empty for any other kind.
    #[must_use]
    pub fn fields(&self) -> &[FieldInfo] {
        match &self.kind {
            Kind::Struct(fields) => fields,
            _ => &[]
        }
    }

    /// Looks through every pointer layer.
    ///
    /// Returns the innermost non-pointer type together with the chain of
    /// pointers that lead to it, outermost first.
    #[must_use]
    pub fn deref(&self) -> (TypeInfo, Vec<PointerInfo>) {
        let mut info = self.clone();
        let mut chain = Vec::new();
        loop {
            let pointer = match &info.kind {
                Kind::Pointer(pointer) => *pointer,
                _ => break
            };
            chain.push(pointer);
            info = (pointer.elem)();
        }
        (info, chain)
    }

    /// Attaches the [`Marshaler`] capability of `T`.
    #[must_use]
    pub fn with_marshaler<T: Marshaler + Any>(mut self) -> Self {
        debug_assert_eq!(self.id, TypeId::of::<T>());
        self.capabilities.marshal = Some(capability::marshal_via::<T>);
        self
    }

    /// Attaches the [`Unmarshaler`] capability of `T`.
    #[must_use]
    pub fn with_unmarshaler<T: Unmarshaler + Any>(mut self) -> Self {
        debug_assert_eq!(self.id, TypeId::of::<T>());
        self.capabilities.unmarshal = Some(capability::unmarshal_via::<T>);
        self
    }

    /// Attaches text encoding through [`Display`](fmt::Display).
    #[must_use]
    pub fn with_display<T: fmt::Display + Any>(mut self) -> Self {
        debug_assert_eq!(self.id, TypeId::of::<T>());
        self.capabilities.display = Some(capability::display_via::<T>);
        self
    }

    /// Attaches text decoding through [`FromStr`](std::str::FromStr).
    #[must_use]
    pub fn with_from_str<T>(mut self) -> Self
    where
        T: std::str::FromStr + Any,
        T::Err: Into<crate::BoxError>
    {
        debug_assert_eq!(self.id, TypeId::of::<T>());
        self.capabilities.from_str = Some(capability::from_str_via::<T>);
        self
    }

    /// Declares that the type can be viewed as the trait object `I`.
    ///
    /// Interface-keyed registrations on a [`Registry`](crate::Registry)
    /// apply to every type that declares the interface.
    ///
    /// ```rust
    /// use std::any::Any;
    ///
    /// use rowmap_core::TypeInfo;
    ///
    /// trait Label {
    ///     fn label(&self) -> String;
    /// }
    ///
    /// struct Code(u8);
    ///
    /// impl Label for Code {
    ///     fn label(&self) -> String {
    ///         format!("C{}", self.0)
    ///     }
    /// }
    ///
    /// let info = TypeInfo::opaque::<Code>().implements::<dyn Label>(
    ///     |v| v.downcast_ref::<Code>().map(|c| c as &(dyn Label + 'static)),
    ///     |v| v.downcast_mut::<Code>().map(|c| c as &mut (dyn Label + 'static))
    /// );
    /// assert_eq!(info.interfaces().len(), 1);
    /// ```
    #[must_use]
    pub fn implements<I: ?Sized + 'static>(
        mut self,
        as_ref: fn(&dyn Any) -> Option<&I>,
        as_mut: fn(&mut dyn Any) -> Option<&mut I>
    ) -> Self {
        self.interfaces.push(InterfaceCast {
            id:     TypeId::of::<I>(),
            name:   type_name::<I>(),
            caster: Arc::new(Caster {
                as_ref,
                as_mut
            })
        });
        self
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("capabilities", &self.capabilities)
            .field("interfaces", &self.interfaces)
            .finish()
    }
}

/// Downcasts a type-erased value or reports which type was expected.
pub(crate) fn downcast_ref<T: Any>(value: &dyn Any) -> Result<&T> {
    value.downcast_ref::<T>().ok_or(Error::Mismatch {
        type_name: type_name::<T>()
    })
}

/// Mutable counterpart of [`downcast_ref`].
pub(crate) fn downcast_mut<T: Any>(value: &mut dyn Any) -> Result<&mut T> {
    value.downcast_mut::<T>().ok_or(Error::Mismatch {
        type_name: type_name::<T>()
    })
}
