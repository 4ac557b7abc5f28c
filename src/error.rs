//! Error types for taint operations.

use thiserror::Error;

use crate::encoding::Encoding;

/// Result type alias for taint operations
pub type TaintResult<T> = Result<T, TaintError>;

/// Top-level error type.
///
/// Every variant is a caller-facing contract violation. Nothing here is
/// transient: no operation retries, and no error is recovered internally.
/// Errors are raised before any partial mutation is visible.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaintError {
    /// A range argument falls outside the string, or `from > to`.
    ///
    /// Only the tainted mutation paths validate ranges; removing taint from
    /// an untainted range is a no-op that never reaches this check.
    #[error("taint range {from}..{to} out of bounds for length {len}")]
    OutOfRange {
        /// Inclusive start of the requested range (code points)
        from: usize,
        /// Exclusive end of the requested range (code points)
        to: usize,
        /// Code-point length of the target string
        len: usize,
    },

    /// Two string values with different declared encodings were combined.
    #[error("cannot mix encodings: {left} and {right}")]
    EncodingMismatch {
        /// Encoding of the left/accumulating operand
        left: Encoding,
        /// Encoding of the right/appended operand
        right: Encoding,
    },

    /// The string contains a code point the target encoding cannot represent.
    #[error("string is not representable in {0}")]
    UnsupportedEncoding(Encoding),
}

impl TaintError {
    /// Create an out-of-range error for a `[from, to)` region of a string
    /// with `len` code points.
    #[inline]
    pub fn out_of_range(from: usize, to: usize, len: usize) -> Self {
        Self::OutOfRange { from, to, len }
    }
}
