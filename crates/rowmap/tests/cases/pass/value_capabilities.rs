// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Opaque values with text and byte capabilities.

use std::{fmt, str::FromStr};

use rowmap::{BoxError, Marshaler, Record, Unmarshaler, Value};

#[derive(Value, Debug, Default, Clone, Copy, PartialEq)]
#[value(display, from_str)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::High => "high",
        })
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            other => Err(format!("unknown level {other}")),
        }
    }
}

#[derive(Value, Debug, Default)]
#[value(marshal, unmarshal)]
pub struct Flag(bool);

impl Marshaler for Flag {
    fn marshal_field(&self) -> Result<Vec<u8>, BoxError> {
        Ok(if self.0 { b"Y".to_vec() } else { b"N".to_vec() })
    }
}

impl Unmarshaler for Flag {
    fn unmarshal_field(&mut self, data: &[u8]) -> Result<(), BoxError> {
        self.0 = data == b"Y";
        Ok(())
    }
}

#[derive(Record, Default)]
pub struct Alert {
    pub level: Level,
    pub flag: Flag,
}

fn main() {
    let _ = rowmap::header::<Alert>("csv").unwrap();
}
