// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Value)]` implementation.
//!
//! Describes a type as an opaque column value whose text form comes from its
//! declared capabilities:
//!
//! ```rust,ignore
//! #[derive(Value, Clone, Copy)]
//! #[value(display, from_str)]
//! pub enum Level { Low, High }
//!
//! // generates
//! impl ::rowmap_core::Reflect for Level {
//!     fn type_info() -> ::rowmap_core::TypeInfo {
//!         ::rowmap_core::TypeInfo::opaque::<Self>()
//!             .with_display::<Self>()
//!             .with_from_str::<Self>()
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Type, parse_macro_input};

use crate::{
    record::{capabilities, parse::ValueDef},
    utils::bounds::with_reflect_bounds
};

/// Main entry point for the Value derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ValueDef::from_derive_input(&input) {
        Ok(value) => generate(&value).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(value: &ValueDef) -> TokenStream2 {
    let ident = &value.ident;
    let generics = with_reflect_bounds(&value.generics, std::iter::empty::<&Type>());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let capabilities = capabilities::generate(&value.capabilities);

    quote! {
        impl #impl_generics ::rowmap_core::Reflect for #ident #ty_generics #where_clause {
            fn type_info() -> ::rowmap_core::TypeInfo {
                ::rowmap_core::TypeInfo::opaque::<Self>()
                    #capabilities
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_opaque_type_info() {
        let input: DeriveInput = syn::parse_quote! {
            #[value(marshal, unmarshal)]
            pub struct Token(String);
        };
        let code = generate(&ValueDef::from_derive_input(&input).unwrap()).to_string();
        assert!(code.contains("Reflect for Token"));
        assert!(code.contains("TypeInfo :: opaque :: < Self >"));
        assert!(code.contains("with_marshaler"));
        assert!(code.contains("with_unmarshaler"));
    }

    #[test]
    fn generic_values_require_static() {
        let input: DeriveInput = syn::parse_quote! {
            #[value(display)]
            pub struct Tagged<T>(T);
        };
        let code = generate(&ValueDef::from_derive_input(&input).unwrap()).to_string();
        assert!(code.contains("T : 'static"));
    }
}
