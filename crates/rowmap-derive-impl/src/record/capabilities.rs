// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Capability builder chain appended to a generated `TypeInfo`.
//!
//! ```rust,ignore
//! ::rowmap_core::TypeInfo::opaque::<Self>()
//!     .with_display::<Self>()
//!     .implements::<dyn Describe + 'static>(as_ref, as_mut)
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::CapabilitySet;

/// Builder calls for the declared capabilities.
pub fn generate(capabilities: &CapabilitySet) -> TokenStream {
    let marshal = capabilities.marshal.then(|| quote! { .with_marshaler::<Self>() });
    let unmarshal = capabilities.unmarshal.then(|| quote! { .with_unmarshaler::<Self>() });
    let display = capabilities.display.then(|| quote! { .with_display::<Self>() });
    let from_str = capabilities.from_str.then(|| quote! { .with_from_str::<Self>() });
    let implements = capabilities.implements.iter().map(|path| {
        quote! {
            .implements::<dyn #path + 'static>(
                |value: &dyn ::std::any::Any| {
                    value.downcast_ref::<Self>().map(|this| this as &(dyn #path + 'static))
                },
                |value: &mut dyn ::std::any::Any| {
                    value.downcast_mut::<Self>().map(|this| this as &mut (dyn #path + 'static))
                }
            )
        }
    });

    quote! {
        #marshal
        #unmarshal
        #display
        #from_str
        #(#implements)*
    }
}
