// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! ```rust,ignore
//! #[tag(csv = "name,omitempty", db = "user_name")] // one raw tag per namespace
//! pub name: String,
//!
//! #[embed]                                         // promote members
//! pub address: Address,
//! ```
//!
//! Tag strings are passed through untouched; they are parsed at runtime per
//! namespace.

use syn::{Attribute, Field, Ident, LitStr, Type, Visibility, ext::IdentExt};

use super::RenameRule;

/// Field definition with parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Member identifier.
    pub ident:    Ident,
    /// Member type.
    pub ty:       Type,
    /// Any `pub` visibility.
    pub exported: bool,
    /// Marked `#[embed]`.
    pub embedded: bool,
    /// `(namespace, raw tag)` pairs in declaration order.
    pub tags:     Vec<(String, String)>
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Returns error for unnamed fields, arguments on `#[embed]`, malformed
    /// or duplicated `#[tag(...)]` entries.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Record fields must be named").with_span(field)
        })?;

        let mut embedded = false;
        let mut tags = Vec::new();
        for attr in &field.attrs {
            if attr.path().is_ident("embed") {
                attr.meta.require_path_only()?;
                embedded = true;
            } else if attr.path().is_ident("tag") {
                parse_tags(attr, &mut tags)?;
            }
        }

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            exported: !matches!(field.vis, Visibility::Inherited),
            embedded,
            tags
        })
    }

    /// Structural name, after `rename_all`.
    pub fn name(&self, rename: Option<RenameRule>) -> String {
        let name = self.ident.unraw().to_string();
        match rename {
            Some(rule) => rule.apply(&name),
            None => name
        }
    }
}

/// Parse `#[tag(ns = "raw", ...)]` into `(namespace, raw)` pairs.
fn parse_tags(attr: &Attribute, tags: &mut Vec<(String, String)>) -> darling::Result<()> {
    attr.parse_nested_meta(|meta| {
        let namespace = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("expected a tag namespace such as `csv`"))?
            .unraw()
            .to_string();
        let raw: LitStr = meta.value()?.parse()?;
        if tags.iter().any(|(existing, _)| *existing == namespace) {
            return Err(meta.error(format!("duplicate `{namespace}` tag")));
        }
        tags.push((namespace, raw.value()));
        Ok(())
    })
    .map_err(darling::Error::from)
}
