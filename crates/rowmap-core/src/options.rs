// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Decoder and encoder settings.

/// Tag namespace used when none is configured.
pub const DEFAULT_TAG: &str = "csv";

/// Settings for a [`Decoder`](crate::Decoder).
///
/// ```rust
/// use rowmap_core::DecoderOptions;
///
/// let options = DecoderOptions::new()
///     .with_tag("db")
///     .with_fail_slow(true);
/// assert_eq!(options.tag, "db");
/// assert!(!options.disallow_missing_columns);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Tag namespace read from field annotations.
    pub tag:                      String,
    /// Decode every field of a record and report all failures together.
    pub fail_slow:                bool,
    /// Fail binding when a resolved field has no header column.
    pub disallow_missing_columns: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            tag:                      DEFAULT_TAG.to_owned(),
            fail_slow:                false,
            disallow_missing_columns: false
        }
    }
}

impl DecoderOptions {
    /// Default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tag namespace.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Enables or disables fail-slow mode.
    #[must_use]
    pub const fn with_fail_slow(mut self, fail_slow: bool) -> Self {
        self.fail_slow = fail_slow;
        self
    }

    /// Enables or disables the missing column check.
    #[must_use]
    pub const fn with_disallow_missing_columns(mut self, disallow: bool) -> Self {
        self.disallow_missing_columns = disallow;
        self
    }
}

/// Settings for an [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Tag namespace read from field annotations.
    pub tag:         String,
    /// Write the header row before the first encoded record.
    pub auto_header: bool
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            tag:         DEFAULT_TAG.to_owned(),
            auto_header: true
        }
    }
}

impl EncoderOptions {
    /// Default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tag namespace.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Enables or disables the automatic header row.
    #[must_use]
    pub const fn with_auto_header(mut self, auto_header: bool) -> Self {
        self.auto_header = auto_header;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let decoder = DecoderOptions::default();
        assert_eq!(decoder.tag, DEFAULT_TAG);
        assert!(!decoder.fail_slow);

        let encoder = EncoderOptions::default();
        assert_eq!(encoder.tag, DEFAULT_TAG);
        assert!(encoder.auto_header);
    }

    #[test]
    fn setters_chain() {
        let options = EncoderOptions::new().with_tag("x").with_auto_header(false);
        assert_eq!(options, EncoderOptions {
            tag:         "x".into(),
            auto_header: false
        });
    }
}
