// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generic and self-referential records.

use rowmap::{Record, Reflect, header};

#[derive(Record, Default)]
pub struct Wrapper<T> {
    pub inner: Option<T>,
    pub label: String,
}

#[derive(Record, Default)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

fn names<T: Reflect>() -> usize {
    rowmap::fields::<T>("csv").len()
}

fn main() {
    assert_eq!(header::<Wrapper<u8>>("csv").unwrap(), ["inner", "label"]);
    assert_eq!(names::<Wrapper<String>>(), 2);
    assert_eq!(names::<Node>(), 2);
}
