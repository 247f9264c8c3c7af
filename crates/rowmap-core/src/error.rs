// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for decoding and encoding records.
//!
//! Every failure in the crate is an [`Error`]. Field-level failures raised by
//! a decoder or encoder are wrapped in [`Error::Column`] so the offending
//! column can be reported; [`Error::root`] strips that context again.
//!
//! # Categories
//!
//! | Variant | Scope | Retry |
//! |---------|-------|-------|
//! | [`Error::UnsupportedType`] | field type has no codec | never |
//! | [`Error::UnmarshalType`] | one cell could not be parsed | next record |
//! | [`Error::InvalidDecodeTarget`], [`Error::InvalidEncodeSource`] | caller bug | never |
//! | [`Error::FieldCount`] | record width differs from header | next record |
//! | [`Error::Marshaler`], [`Error::Custom`] | user code failed | depends |
//! | [`Error::Joined`] | fail-slow aggregation | next record |

use thiserror::Error;

/// Boxed error returned by user supplied codecs and collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All failures produced while resolving, decoding or encoding records.
#[derive(Debug, Error)]
pub enum Error {
    /// A field type matches no registered function, capability or built-in
    /// codec.
    #[error("unsupported type: {type_name}")]
    UnsupportedType {
        /// Name of the offending type.
        type_name: &'static str
    },

    /// A cell value could not be converted into the target type.
    #[error("cannot unmarshal {value:?} into value of type {type_name}")]
    UnmarshalType {
        /// Raw cell value.
        value:     String,
        /// Name of the target type.
        type_name: &'static str
    },

    /// The decode destination is not a record.
    #[error("invalid decode target {type_name}: {reason}")]
    InvalidDecodeTarget {
        /// Name of the destination type.
        type_name: &'static str,
        /// Why the destination was rejected.
        reason:    &'static str
    },

    /// The encode source is not a record or is nil.
    #[error("invalid encode source {type_name}: {reason}")]
    InvalidEncodeSource {
        /// Name of the source type.
        type_name: &'static str,
        /// Why the source was rejected.
        reason:    &'static str
    },

    /// Record width disagrees with the header width.
    #[error("wrong number of fields in record: expected {expected}, got {actual}")]
    FieldCount {
        /// Header width.
        expected: usize,
        /// Record width.
        actual:   usize
    },

    /// A marshal or unmarshal capability of the type itself failed.
    #[error("{method} failed for type {type_name}: {source}")]
    Marshaler {
        /// Type that implements the capability.
        type_name: &'static str,
        /// Capability that failed, e.g. `marshal` or `from_str`.
        method:    &'static str,
        /// Error returned by the implementation.
        #[source]
        source:    BoxError
    },

    /// A registered custom codec failed.
    #[error("custom codec failed for type {type_name}: {source}")]
    Custom {
        /// Type the codec was invoked for.
        type_name: &'static str,
        /// Error returned by the codec.
        #[source]
        source:    BoxError
    },

    /// A byte-sequence cell is not valid standard base64.
    #[error("invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A type-erased accessor received a value of the wrong type.
    #[error("value is not of type {type_name}")]
    Mismatch {
        /// Expected type.
        type_name: &'static str
    },

    /// A custom codec was registered twice for the same key.
    #[error("codec for {type_name} is already registered")]
    DuplicateRegistration {
        /// Registration key.
        type_name: &'static str
    },

    /// Resolved fields have no matching header column.
    #[error("header is missing columns: {}", columns.join(", "))]
    MissingColumns {
        /// Names of the missing columns, in resolved order.
        columns: Vec<String>
    },

    /// The reader produced no header row.
    #[error("input contains no header row")]
    EmptyInput,

    /// Field-level error annotated with its column.
    #[error("column {column:?}: {source}")]
    Column {
        /// Column name.
        column: String,
        /// Underlying field error.
        #[source]
        source: Box<Error>
    },

    /// All field errors of one record collected in fail-slow mode.
    #[error("{} fields failed to decode: {}", .0.len(), join_messages(.0))]
    Joined(Vec<Error>),

    /// The reader collaborator failed.
    #[error("failed to read record: {0}")]
    Read(#[source] BoxError),

    /// The writer collaborator failed.
    #[error("failed to write record: {0}")]
    Write(#[source] BoxError)
}

impl Error {
    /// Wraps a field error with the column it belongs to.
    pub(crate) fn column(column: impl Into<String>, source: Error) -> Self {
        Self::Column {
            column: column.into(),
            source: Box::new(source)
        }
    }

    /// Returns the innermost error, skipping column context.
    ///
    /// ```rust
    /// use rowmap_core::Error;
    ///
    /// let err = Error::FieldCount { expected: 2, actual: 1 };
    /// assert!(matches!(err.root(), Error::FieldCount { .. }));
    /// ```
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Self::Column {
                source, ..
            } => source.root(),
            other => other
        }
    }

    /// Column the error is attached to, if any.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::Column {
                column, ..
            } => Some(column),
            _ => None
        }
    }

    /// Check if the record had the wrong number of fields.
    #[must_use]
    pub fn is_field_count(&self) -> bool {
        matches!(self.root(), Self::FieldCount { .. })
    }

    /// Errors collected in fail-slow mode, or a single-element view of self.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        match self {
            Self::Joined(errors) => errors,
            other => std::slice::from_ref(other)
        }
    }
}

fn join_messages(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
