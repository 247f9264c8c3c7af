// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Container-level attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | `#[record]` | `#[value]` | Effect |
//! |-----------|:-----------:|:----------:|--------|
//! | `marshal` | yes | yes | encode through `Marshaler` |
//! | `unmarshal` | yes | yes | decode through `Unmarshaler` |
//! | `display` | yes | yes | encode through `Display` |
//! | `from_str` | yes | yes | decode through `FromStr` |
//! | `implements(A, B)` | yes | yes | declare trait-object views |
//! | `rename_all = "..."` | yes | no | case of implicit column names |

use darling::{FromDeriveInput, util::PathList};
use syn::{Generics, Ident, Path};

use super::RenameRule;

/// Capabilities declared on a type.
#[derive(Debug, Default, Clone)]
pub struct CapabilitySet {
    /// `marshal` flag.
    pub marshal:    bool,
    /// `unmarshal` flag.
    pub unmarshal:  bool,
    /// `display` flag.
    pub display:    bool,
    /// `from_str` flag.
    pub from_str:   bool,
    /// Traits listed in `implements(...)`.
    pub implements: Vec<Path>
}

/// Attributes parsed from `#[record(...)]`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Record)]
/// #[record(rename_all = "camelCase", display, from_str)]
/// pub struct Point { pub x_pos: i32 }
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub struct RecordAttrs {
    /// Struct identifier.
    pub ident:      Ident,
    /// Struct generics.
    pub generics:   Generics,
    #[darling(default)]
    pub marshal:    bool,
    #[darling(default)]
    pub unmarshal:  bool,
    #[darling(default)]
    pub display:    bool,
    #[darling(default)]
    pub from_str:   bool,
    #[darling(default)]
    pub implements: PathList,
    /// Case conversion for member names.
    #[darling(default)]
    pub rename_all: Option<RenameRule>
}

impl RecordAttrs {
    /// Declared capabilities.
    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet {
            marshal:    self.marshal,
            unmarshal:  self.unmarshal,
            display:    self.display,
            from_str:   self.from_str,
            implements: self.implements.to_vec()
        }
    }
}

/// Attributes parsed from `#[value(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(value), supports(any))]
pub struct ValueAttrs {
    /// Type identifier.
    pub ident:      Ident,
    /// Type generics.
    pub generics:   Generics,
    #[darling(default)]
    pub marshal:    bool,
    #[darling(default)]
    pub unmarshal:  bool,
    #[darling(default)]
    pub display:    bool,
    #[darling(default)]
    pub from_str:   bool,
    #[darling(default)]
    pub implements: PathList
}

impl ValueAttrs {
    /// Declared capabilities.
    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet {
            marshal:    self.marshal,
            unmarshal:  self.unmarshal,
            display:    self.display,
            from_str:   self.from_str,
            implements: self.implements.to_vec()
        }
    }
}
