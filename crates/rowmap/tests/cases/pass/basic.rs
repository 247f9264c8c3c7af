// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Plain record with tags, visibility and pointer fields.

use rowmap::{Decoder, Encoder, Record, rows};

#[derive(Record, Debug, Default, PartialEq)]
pub struct User {
    #[tag(csv = "user_name")]
    pub name: String,
    #[tag(csv = "age,omitempty")]
    pub age: Option<u32>,
    pub score: f64,
    #[tag(csv = "-")]
    pub session: String,
    cache: u64,
}

fn main() {
    let mut decoder =
        Decoder::new(rows([["user_name", "age", "score"], ["ann", "", "1.5"]])).unwrap();
    let users: Vec<User> = decoder.decode_all().unwrap();
    assert_eq!(users[0].name, "ann");
    assert_eq!(users[0].age, None);
    assert_eq!(users[0].cache, 0);

    let mut encoder = Encoder::new(Vec::new());
    encoder.encode_all(&users).unwrap();
    assert_eq!(encoder.into_inner()[0], ["user_name", "age", "score"]);
}
