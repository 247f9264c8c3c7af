// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Where-clause construction for generic types.
//!
//! Generated impls are type-erased through `dyn Any`, so every type parameter
//! gets a `'static` bound. A field whose type mentions a type parameter also
//! gets a `Reflect` bound; fields with concrete types are checked in the
//! generated body instead, which keeps self-referential records valid.

use std::collections::HashSet;

use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Generics, Ident, Type, WherePredicate, parse_quote};

/// Adds `'static` to every type parameter and `Reflect` to every field type
/// that depends on one.
pub fn with_reflect_bounds<'a>(
    generics: &Generics,
    field_types: impl IntoIterator<Item = &'a Type>
) -> Generics {
    let mut generics = generics.clone();
    let params: HashSet<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    if params.is_empty() {
        return generics;
    }

    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }

    let predicates: Vec<WherePredicate> = field_types
        .into_iter()
        .filter(|ty| mentions_any(ty.to_token_stream(), &params))
        .map(|ty| parse_quote!(#ty: ::rowmap_core::Reflect))
        .collect();
    generics.make_where_clause().predicates.extend(predicates);
    generics
}

/// Check if a token stream contains any of the given identifiers.
fn mentions_any(tokens: TokenStream, idents: &HashSet<Ident>) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => idents.contains(&ident),
        TokenTree::Group(group) => mentions_any(group.stream(), idents),
        _ => false
    })
}
