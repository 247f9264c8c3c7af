// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Interface declarations with registered codecs.

use rowmap::{Encoder, Record, Value};

pub trait Describe {
    fn describe(&self) -> String;
}

#[derive(Value, Default)]
#[value(implements(Describe))]
pub struct Color(u8, u8, u8);

impl Describe for Color {
    fn describe(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Record, Default)]
pub struct Paint {
    pub color: Color,
}

fn main() {
    let mut encoder = Encoder::new(Vec::new());
    encoder
        .register_interface_encoder::<dyn Describe, _, std::convert::Infallible>(|value| {
            Ok(value.describe().into_bytes())
        })
        .unwrap();
    encoder.encode(&Paint { color: Color(255, 0, 16) }).unwrap();
    assert_eq!(encoder.into_inner()[1], ["#ff0010"]);
}
