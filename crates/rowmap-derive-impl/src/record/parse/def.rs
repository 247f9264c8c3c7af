// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsed definitions handed to the generators.
//!
//! # Construction
//!
//! ```text
//! DeriveInput ──► RecordAttrs (darling) ──┐
//!             └─► FieldDef per member ────┴──► RecordDef
//! DeriveInput ──► ValueAttrs (darling) ───────► ValueDef
//! ```
//!
//! Lifetime parameters are rejected: generated code erases values through
//! `dyn Any`, which requires `'static` types.

use darling::FromDeriveInput;
use syn::{DeriveInput, Generics, Ident, Type};

use super::{CapabilitySet, FieldDef, RecordAttrs, RenameRule, ValueAttrs};

/// Complete parsed record definition.
#[derive(Debug)]
pub struct RecordDef {
    /// Struct identifier.
    pub ident:        Ident,
    /// Struct generics as written.
    pub generics:     Generics,
    /// Members in declaration order.
    pub fields:       Vec<FieldDef>,
    /// Declared capabilities.
    pub capabilities: CapabilitySet,
    /// Case conversion for member names.
    pub rename_all:   Option<RenameRule>
}

impl RecordDef {
    /// Parse a record from derive input.
    ///
    /// # Errors
    ///
    /// Returns error for enums, tuple or unit structs, lifetime parameters
    /// and malformed attributes.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = RecordAttrs::from_derive_input(input)?;
        reject_lifetimes(input, "Record")?;

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Record requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Record can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        Ok(Self {
            capabilities: attrs.capabilities(),
            ident: attrs.ident,
            generics: attrs.generics,
            fields,
            rename_all: attrs.rename_all
        })
    }

    /// Member types, for generic bounds.
    pub fn field_types(&self) -> impl Iterator<Item = &Type> {
        self.fields.iter().map(|field| &field.ty)
    }
}

/// Parsed opaque value definition.
#[derive(Debug)]
pub struct ValueDef {
    /// Type identifier.
    pub ident:        Ident,
    /// Type generics as written.
    pub generics:     Generics,
    /// Declared capabilities.
    pub capabilities: CapabilitySet
}

impl ValueDef {
    /// Parse a value type from derive input.
    ///
    /// # Errors
    ///
    /// Returns error for lifetime parameters and malformed attributes.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = ValueAttrs::from_derive_input(input)?;
        reject_lifetimes(input, "Value")?;
        Ok(Self {
            capabilities: attrs.capabilities(),
            ident: attrs.ident,
            generics: attrs.generics
        })
    }
}

fn reject_lifetimes(input: &DeriveInput, derive: &str) -> darling::Result<()> {
    match input.generics.lifetimes().next() {
        Some(lifetime) => Err(darling::Error::custom(format!(
            "{derive} cannot be derived for types with lifetime parameters"
        ))
        .with_span(lifetime)),
        None => Ok(())
    }
}
