// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Reflect` implementation for records.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! impl ::rowmap_core::Reflect for User {
//!     fn type_info() -> ::rowmap_core::TypeInfo {
//!         ::rowmap_core::TypeInfo::record::<Self>(::std::vec![
//!             ::rowmap_core::FieldInfo {
//!                 name: "name",
//!                 exported: true,
//!                 embedded: false,
//!                 tags: &[("csv", "user_name")],
//!                 ty: <String as ::rowmap_core::Reflect>::type_info,
//!                 get: |value| ..., // &User -> &record.name
//!                 get_mut: |value| ...,
//!             },
//!         ])
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    capabilities,
    parse::{FieldDef, RecordDef, RenameRule}
};
use crate::utils::bounds::with_reflect_bounds;

/// Generate the `Reflect` impl.
pub fn generate(record: &RecordDef) -> TokenStream {
    let ident = &record.ident;
    let generics = with_reflect_bounds(&record.generics, record.field_types());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let fields = record
        .fields
        .iter()
        .map(|field| field_info(field, record.rename_all));
    let capabilities = capabilities::generate(&record.capabilities);

    quote! {
        impl #impl_generics ::rowmap_core::Reflect for #ident #ty_generics #where_clause {
            fn type_info() -> ::rowmap_core::TypeInfo {
                ::rowmap_core::TypeInfo::record::<Self>(::std::vec![#(#fields),*])
                    #capabilities
            }
        }
    }
}

fn field_info(field: &FieldDef, rename: Option<RenameRule>) -> TokenStream {
    let member = &field.ident;
    let ty = &field.ty;
    let name = field.name(rename);
    let exported = field.exported;
    let embedded = field.embedded;
    let namespaces = field.tags.iter().map(|(namespace, _)| namespace);
    let raws = field.tags.iter().map(|(_, raw)| raw);

    quote! {
        ::rowmap_core::FieldInfo {
            name: #name,
            exported: #exported,
            embedded: #embedded,
            tags: &[#((#namespaces, #raws)),*],
            ty: <#ty as ::rowmap_core::Reflect>::type_info,
            get: |value: &dyn ::std::any::Any| {
                value
                    .downcast_ref::<Self>()
                    .map(|record| &record.#member as &dyn ::std::any::Any)
            },
            get_mut: |value: &mut dyn ::std::any::Any| {
                value
                    .downcast_mut::<Self>()
                    .map(|record| &mut record.#member as &mut dyn ::std::any::Any)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(input: syn::DeriveInput) -> String {
        generate(&RecordDef::from_derive_input(&input).unwrap()).to_string()
    }

    #[test]
    fn emits_field_descriptors() {
        let code = generated(syn::parse_quote! {
            pub struct User {
                #[tag(csv = "user_name")]
                pub name: String,
                #[embed]
                address: Address,
            }
        });
        assert!(code.contains("impl :: rowmap_core :: Reflect for User"));
        assert!(code.contains("TypeInfo :: record :: < Self >"));
        assert!(code.contains("name : \"name\""));
        assert!(code.contains("(\"csv\" , \"user_name\")"));
        assert!(code.contains("embedded : true"));
        assert!(code.contains("exported : false"));
        assert!(code.contains("record . address"));
    }

    #[test]
    fn applies_rename_all() {
        let code = generated(syn::parse_quote! {
            #[record(rename_all = "SCREAMING_SNAKE_CASE")]
            pub struct User {
                pub first_name: String,
            }
        });
        assert!(code.contains("\"FIRST_NAME\""));
        assert!(code.contains("record . first_name"));
    }

    #[test]
    fn bounds_generic_fields() {
        let code = generated(syn::parse_quote! {
            pub struct Wrapper<T> {
                pub inner: T,
                pub count: u32,
            }
        });
        assert!(code.contains("T : 'static"));
        assert!(code.contains("Reflect for Wrapper < T >"));
    }

    #[test]
    fn appends_capabilities() {
        let code = generated(syn::parse_quote! {
            #[record(display)]
            pub struct Point {
                pub x: i32,
            }
        });
        assert!(code.contains("with_display :: < Self >"));
    }
}
