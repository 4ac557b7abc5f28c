//! Declared encodings for string values.
//!
//! A [`crate::TaintString`] stores its content in one canonical form and
//! carries a declared [`Encoding`] tag. Byte materialization happens only on
//! demand ([`Encoding::encode`]); the taint engine itself never reads raw
//! bytes, so switching encodings preserves the per-code-point label
//! assignment by construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TaintError, TaintResult};

/// Supported string encodings.
///
/// The taint layer only cares that code-point counts are stable across
/// conversions; the fixed-width encodings (`Latin1`, `Ascii`) additionally
/// constrain which code points are representable at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// UTF-8, the canonical in-memory form
    Utf8,
    /// UTF-16, little-endian code units
    Utf16,
    /// UTF-32, little-endian code units
    Utf32,
    /// ISO-8859-1, one byte per code point, U+0000..=U+00FF
    Latin1,
    /// US-ASCII, one byte per code point, U+0000..=U+007F
    Ascii,
}

impl Encoding {
    /// Size of one code unit in bytes.
    #[inline]
    pub fn code_unit_size(self) -> usize {
        match self {
            Encoding::Utf8 | Encoding::Latin1 | Encoding::Ascii => 1,
            Encoding::Utf16 => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// Human-readable encoding name.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16 => "UTF-16",
            Encoding::Utf32 => "UTF-32",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Ascii => "US-ASCII",
        }
    }

    /// Whether every code point of `s` is representable in this encoding.
    pub fn can_encode(self, s: &str) -> bool {
        match self {
            Encoding::Utf8 | Encoding::Utf16 | Encoding::Utf32 => true,
            Encoding::Latin1 => s.chars().all(|c| (c as u32) <= 0xFF),
            Encoding::Ascii => s.is_ascii(),
        }
    }

    /// Materialize `s` into bytes of this encoding.
    ///
    /// Fails with [`TaintError::UnsupportedEncoding`] if a code point is not
    /// representable; no replacement characters are substituted, since a
    /// lossy conversion could not keep the code-point-to-label mapping 1:1.
    pub fn encode(self, s: &str) -> TaintResult<Vec<u8>> {
        if !self.can_encode(s) {
            return Err(TaintError::UnsupportedEncoding(self));
        }
        let bytes = match self {
            Encoding::Utf8 => s.as_bytes().to_vec(),
            Encoding::Utf16 => {
                let mut out = Vec::with_capacity(s.len() * 2);
                for unit in s.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out
            }
            Encoding::Utf32 => {
                let mut out = Vec::with_capacity(s.len() * 4);
                for c in s.chars() {
                    out.extend_from_slice(&(c as u32).to_le_bytes());
                }
                out
            }
            Encoding::Latin1 | Encoding::Ascii => s.chars().map(|c| c as u8).collect(),
        };
        Ok(bytes)
    }

    /// All supported encodings, for exhaustive conversion tests.
    pub fn all() -> [Encoding; 5] {
        [
            Encoding::Utf8,
            Encoding::Utf16,
            Encoding::Utf32,
            Encoding::Latin1,
            Encoding::Ascii,
        ]
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Utf8
    }
}
