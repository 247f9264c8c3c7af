// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record sources and sinks.
//!
//! Decoders pull rows from a [`Reader`] and encoders push rows into a
//! [`Writer`]. Any CSV (or other delimited) library can be adapted by
//! implementing these two traits; in-memory implementations are provided for
//! `VecDeque<Vec<String>>` and `Vec<Vec<String>>`.

use std::{collections::VecDeque, convert::Infallible};

use crate::error::BoxError;

/// Source of records.
pub trait Reader {
    /// Failure reported by the source.
    type Error: Into<BoxError>;

    /// Returns the next record, or `None` at end of stream.
    fn read_record(&mut self) -> Result<Option<Vec<String>>, Self::Error>;
}

/// Sink for records.
pub trait Writer {
    /// Failure reported by the sink.
    type Error: Into<BoxError>;

    /// Writes one record.
    fn write_record(&mut self, record: &[String]) -> Result<(), Self::Error>;
}

impl Reader for VecDeque<Vec<String>> {
    type Error = Infallible;

    fn read_record(&mut self) -> Result<Option<Vec<String>>, Self::Error> {
        Ok(self.pop_front())
    }
}

impl<R: Reader + ?Sized> Reader for &mut R {
    type Error = R::Error;

    fn read_record(&mut self) -> Result<Option<Vec<String>>, Self::Error> {
        (**self).read_record()
    }
}

impl Writer for Vec<Vec<String>> {
    type Error = Infallible;

    fn write_record(&mut self, record: &[String]) -> Result<(), Self::Error> {
        self.push(record.to_vec());
        Ok(())
    }
}

impl<W: Writer + ?Sized> Writer for &mut W {
    type Error = W::Error;

    fn write_record(&mut self, record: &[String]) -> Result<(), Self::Error> {
        (**self).write_record(record)
    }
}

/// Builds an in-memory reader from string rows.
///
/// ```rust
/// use rowmap_core::{Reader, rows};
///
/// let mut reader = rows([["a", "b"], ["1", "2"]]);
/// assert_eq!(reader.read_record().unwrap(), Some(vec!["a".to_string(), "b".to_string()]));
/// ```
pub fn rows<I, R, S>(records: I) -> VecDeque<Vec<String>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: Into<String>
{
    records
        .into_iter()
        .map(|record| record.into_iter().map(Into::into).collect())
        .collect()
}
