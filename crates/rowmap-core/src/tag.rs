// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field annotation parsing.
//!
//! An annotation is a comma separated list: the column name followed by
//! options.
//!
//! | Annotation | Effect |
//! |------------|--------|
//! | absent or `""` | column named after the field, implicit |
//! | `"name"` | column `name`, explicit |
//! | `"-"` | field ignored |
//! | `"name,omitempty"` | empty cells skipped on decode, zero values written empty |
//! | `"prefix_,inline"` | struct members promoted with `prefix_` prepended |
//! | `"a\\,b"` | column `a,b` |
//!
//! Unknown options are ignored.

/// Parsed field annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Column name.
    pub name:       String,
    /// The name was derived from the field name rather than written out.
    pub empty:      bool,
    /// `omitempty` option.
    pub omit_empty: bool,
    /// The field is excluded.
    pub ignore:     bool,
    /// `inline` option on a struct-typed field.
    pub inline:     bool,
    /// Prefix applied to inlined member names.
    pub prefix:     String
}

impl Tag {
    /// Parses the raw annotation of a field.
    ///
    /// `inlinable` reports whether the field type, after pointers, is a
    /// record; `inline` is honored only then.
    ///
    /// ```rust
    /// use rowmap_core::Tag;
    ///
    /// let tag = Tag::parse(Some("addr_,inline"), "Address", true);
    /// assert!(tag.inline);
    /// assert_eq!(tag.prefix, "addr_");
    ///
    /// let tag = Tag::parse(None, "Name", false);
    /// assert_eq!(tag.name, "Name");
    /// assert!(tag.empty);
    /// ```
    #[must_use]
    pub fn parse(raw: Option<&str>, field_name: &str, inlinable: bool) -> Self {
        let segments = split_escaped(raw.unwrap_or_default());
        let mut parts = segments.into_iter();
        let first = parts.next().unwrap_or_default();

        let mut tag = Self::default();
        if first == "-" {
            tag.ignore = true;
            return tag;
        }

        if first.is_empty() {
            tag.name = field_name.to_owned();
            tag.empty = true;
        } else {
            tag.name = first.clone();
        }

        for option in parts {
            match option.as_str() {
                "omitempty" => tag.omit_empty = true,
                "inline" if inlinable => {
                    tag.inline = true;
                    tag.prefix = first.clone();
                }
                _ => {}
            }
        }
        tag
    }
}

/// Splits on commas, treating `\,` as a literal comma.
fn split_escaped(raw: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                current.push(',');
                chars.next();
            }
            ',' => segments.push(std::mem::take(&mut current)),
            other => current.push(other)
        }
    }
    segments.push(current);
    segments
}
