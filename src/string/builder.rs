//! Incremental construction of tainted string values.
//!
//! The builder accumulates content fragments and keeps per-code-point taint
//! bookkeeping alongside, so the built value's label array equals the
//! transform-engine concatenation of every appended fragment's taint. The
//! common all-untainted case allocates no label array at all: the array is
//! created on the first tainted append and back-filled with empty slots for
//! everything appended before it.

use tracing::debug;

use crate::encoding::Encoding;
use crate::error::{TaintError, TaintResult};
use crate::string::value::{Contents, TaintString};
use crate::taint::array;
use std::sync::Arc;

/// Builds a [`TaintString`] from appended fragments, propagating taint.
#[derive(Debug, Clone)]
pub struct TaintStringBuilder<L> {
    encoding: Encoding,
    content: String,
    /// `None` until the first tainted fragment arrives
    taint: Option<Vec<Option<L>>>,
    cp_len: usize,
}

impl<L: Clone> TaintStringBuilder<L> {
    /// Create an empty builder for the given encoding.
    pub fn new(encoding: Encoding) -> Self {
        TaintStringBuilder {
            encoding,
            content: String::new(),
            taint: None,
            cp_len: 0,
        }
    }

    /// Create an empty builder with a content capacity hint in bytes.
    pub fn with_capacity(encoding: Encoding, bytes: usize) -> Self {
        TaintStringBuilder {
            encoding,
            content: String::with_capacity(bytes),
            taint: None,
            cp_len: 0,
        }
    }

    /// Code points accumulated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.cp_len
    }

    /// Whether nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cp_len == 0
    }

    /// The builder's encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Append untainted text.
    pub fn append_str(&mut self, s: &str) {
        let added = s.chars().count();
        self.content.push_str(s);
        if let Some(taint) = &mut self.taint {
            taint.resize(self.cp_len + added, None);
        }
        self.cp_len += added;
    }

    /// Append a single untainted code point.
    pub fn append_char(&mut self, c: char) {
        self.content.push(c);
        if let Some(taint) = &mut self.taint {
            taint.push(None);
        }
        self.cp_len += 1;
    }

    /// Append a string value, carrying its taint over.
    ///
    /// Fails with [`TaintError::EncodingMismatch`] if the fragment's
    /// encoding differs from the builder's. Deferred concatenations are
    /// resolved, never content-materialized beyond the append itself.
    pub fn append(&mut self, fragment: &TaintString<L>) -> TaintResult<()> {
        if fragment.encoding() != self.encoding {
            return Err(TaintError::EncodingMismatch {
                left: self.encoding,
                right: fragment.encoding(),
            });
        }
        self.content.push_str(&fragment.as_str());
        let frag_taint = fragment.get_taint();
        match frag_taint
            .as_deref()
            .filter(|t| array::is_array_tainted(Some(*t)))
        {
            Some(slots) => {
                let taint = self.taint.get_or_insert_with(Vec::new);
                taint.resize(self.cp_len, None);
                taint.extend_from_slice(slots);
            }
            None => {
                if let Some(taint) = &mut self.taint {
                    taint.resize(self.cp_len + fragment.len(), None);
                }
            }
        }
        self.cp_len += fragment.len();
        Ok(())
    }

    /// Append the code points `[from, to)` of a string value, carrying the
    /// sub-range's taint over.
    pub fn append_substring(
        &mut self,
        fragment: &TaintString<L>,
        from: usize,
        to: usize,
    ) -> TaintResult<()> {
        let sub = fragment.substring_lazy(from, to)?;
        self.append(&sub)
    }

    /// Finish, producing an immutable value.
    ///
    /// The accumulated taint goes through the copy transform, so an
    /// all-empty label array demotes to a plain untainted value.
    pub fn build(self) -> TaintString<L> {
        debug!(cp_len = self.cp_len, tainted = self.taint.is_some(), "building string");
        let contents = Contents::new(Arc::from(self.content));
        let taint = array::copy(self.taint.as_deref());
        TaintString::from_parts(contents, taint, self.encoding)
    }
}
