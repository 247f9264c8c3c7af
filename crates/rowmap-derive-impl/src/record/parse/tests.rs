// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for record and value parsing.
//!
//! # Test Categories
//!
//! | Category | Tests | Coverage |
//! |----------|-------|----------|
//! | Fields | `fields_keep_declaration_order`, `raw_identifiers_are_unrawed` | Members |
//! | Tags | `tags_collect_per_namespace`, `duplicate_namespace_is_rejected` | `#[tag]` |
//! | Embed | `embed_marks_field`, `embed_with_arguments_is_rejected` | `#[embed]` |
//! | Capabilities | `record_capabilities`, `value_capabilities` | Flags |
//! | Rename | `rename_all_rules`, `unknown_rename_rule_is_rejected` | `rename_all` |
//! | Shape | `tuple_struct_is_rejected`, `enum_is_rejected`, `lifetimes_are_rejected` | Errors |
//!
//! Tests use `syn::parse_quote!` to create definitions, then inspect the
//! parsed `RecordDef` or `ValueDef`.

use syn::DeriveInput;

use super::{RecordDef, RenameRule, ValueDef};

fn record(input: DeriveInput) -> RecordDef {
    RecordDef::from_derive_input(&input).unwrap()
}

#[test]
fn fields_keep_declaration_order() {
    let def = record(syn::parse_quote! {
        pub struct User {
            pub id: u64,
            name: String,
            pub(crate) email: Option<String>,
        }
    });
    let names: Vec<_> = def.fields.iter().map(|f| f.name(None)).collect();
    assert_eq!(names, ["id", "name", "email"]);
    let exported: Vec<_> = def.fields.iter().map(|f| f.exported).collect();
    assert_eq!(exported, [true, false, true]);
    assert_eq!(def.field_types().count(), 3);
}

#[test]
fn raw_identifiers_are_unrawed() {
    let def = record(syn::parse_quote! {
        pub struct Item {
            pub r#type: String,
        }
    });
    assert_eq!(def.fields[0].name(None), "type");
}

#[test]
fn tags_collect_per_namespace() {
    let def = record(syn::parse_quote! {
        pub struct User {
            #[tag(csv = "user_name,omitempty", json = "name")]
            pub name: String,
            pub age: u32,
        }
    });
    assert_eq!(
        def.fields[0].tags,
        [
            ("csv".to_string(), "user_name,omitempty".to_string()),
            ("json".to_string(), "name".to_string())
        ]
    );
    assert!(def.fields[1].tags.is_empty());
}

#[test]
fn duplicate_namespace_is_rejected() {
    let input: DeriveInput = syn::parse_quote! {
        pub struct User {
            #[tag(csv = "a", csv = "b")]
            pub name: String,
        }
    };
    let err = RecordDef::from_derive_input(&input).unwrap_err();
    assert!(err.to_string().contains("duplicate `csv` tag"));
}

#[test]
fn non_string_tag_is_rejected() {
    let input: DeriveInput = syn::parse_quote! {
        pub struct User {
            #[tag(csv = 1)]
            pub name: String,
        }
    };
    assert!(RecordDef::from_derive_input(&input).is_err());
}

#[test]
fn embed_marks_field() {
    let def = record(syn::parse_quote! {
        pub struct User {
            #[embed]
            pub address: Address,
            pub name: String,
        }
    });
    assert!(def.fields[0].embedded);
    assert!(!def.fields[1].embedded);
}

#[test]
fn embed_with_arguments_is_rejected() {
    let input: DeriveInput = syn::parse_quote! {
        pub struct User {
            #[embed(inline)]
            pub address: Address,
        }
    };
    assert!(RecordDef::from_derive_input(&input).is_err());
}

#[test]
fn record_capabilities() {
    let def = record(syn::parse_quote! {
        #[record(marshal, from_str, implements(Describe, crate::Named))]
        pub struct User {
            pub name: String,
        }
    });
    let caps = &def.capabilities;
    assert!(caps.marshal);
    assert!(!caps.unmarshal);
    assert!(!caps.display);
    assert!(caps.from_str);
    assert_eq!(caps.implements.len(), 2);
    assert!(caps.implements[1].segments.last().is_some_and(|s| s.ident == "Named"));
}

#[test]
fn value_capabilities() {
    let input: DeriveInput = syn::parse_quote! {
        #[value(display, from_str)]
        pub enum Level { Low, High }
    };
    let def = ValueDef::from_derive_input(&input).unwrap();
    assert_eq!(def.ident, "Level");
    assert!(def.capabilities.display);
    assert!(def.capabilities.from_str);
    assert!(!def.capabilities.marshal);
}

#[test]
fn rename_all_rules() {
    let def = record(syn::parse_quote! {
        #[record(rename_all = "camelCase")]
        pub struct User {
            pub first_name: String,
        }
    });
    assert_eq!(def.rename_all, Some(RenameRule::Camel));
    assert_eq!(def.fields[0].name(def.rename_all), "firstName");

    assert_eq!(RenameRule::Kebab.apply("first_name"), "first-name");
    assert_eq!(RenameRule::Pascal.apply("first_name"), "FirstName");
    assert_eq!(RenameRule::ScreamingSnake.apply("first_name"), "FIRST_NAME");
    assert_eq!(RenameRule::ScreamingKebab.apply("first_name"), "FIRST-NAME");
    assert_eq!(RenameRule::Snake.apply("first_name"), "first_name");
}

#[test]
fn unknown_rename_rule_is_rejected() {
    let input: DeriveInput = syn::parse_quote! {
        #[record(rename_all = "Title Case")]
        pub struct User {
            pub name: String,
        }
    };
    assert!(RecordDef::from_derive_input(&input).is_err());
}

#[test]
fn tuple_struct_is_rejected() {
    let input: DeriveInput = syn::parse_quote! {
        pub struct Pair(u8, u8);
    };
    assert!(RecordDef::from_derive_input(&input).is_err());
}

#[test]
fn enum_is_rejected() {
    let input: DeriveInput = syn::parse_quote! {
        pub enum Level { Low, High }
    };
    assert!(RecordDef::from_derive_input(&input).is_err());
}

#[test]
fn lifetimes_are_rejected() {
    let input: DeriveInput = syn::parse_quote! {
        pub struct View<'a> {
            pub name: &'a str,
        }
    };
    let err = RecordDef::from_derive_input(&input).unwrap_err();
    assert!(err.to_string().contains("lifetime parameters"));
}

#[test]
fn generics_are_kept() {
    let def = record(syn::parse_quote! {
        pub struct Wrapper<T> {
            pub inner: T,
        }
    });
    assert_eq!(def.generics.type_params().count(), 1);
}
