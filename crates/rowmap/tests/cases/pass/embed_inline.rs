// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Embedded promotion and inline prefixes.

use rowmap::{Record, header};

#[derive(Record, Default)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

#[derive(Record, Default)]
pub struct Meta {
    pub id: u64,
}

#[derive(Record, Default)]
pub struct Customer {
    #[embed]
    pub meta: Meta,
    #[tag(csv = "home_,inline")]
    pub home: Address,
    #[tag(csv = ",inline")]
    pub work: Option<Address>,
}

fn main() {
    let columns = header::<Customer>("csv").unwrap();
    assert_eq!(columns, ["id", "home_city", "home_zip", "city", "zip"]);
}
