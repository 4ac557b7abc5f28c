//! The in-place-mutable string variant.
//!
//! Unlike [`TaintString`], a [`MutableTaintString`] owns its content and
//! label array outright and mutates the array in place: no copy-on-write,
//! no structural sharing, and no demotion back to an array-free state: once
//! allocated, the array stays for the lifetime of the value, even when every
//! slot has been cleared. Range semantics and error ordering are identical
//! to the immutable path; the differences are confined to allocation
//! strategy.
//!
//! Not safe for concurrent access. Rust's `&mut` receiver enforces the
//! exclusive-access requirement that the immutable variant does not need.

use crate::encoding::Encoding;
use crate::error::{TaintError, TaintResult};
use crate::string::value::{Contents, TaintString};
use crate::taint::array;
use std::sync::Arc;

/// A mutable string value with an in-place label array.
#[derive(Debug, Clone)]
pub struct MutableTaintString<L> {
    content: String,
    encoding: Encoding,
    cp_len: usize,
    /// Allocated on the first taint addition, then mutated in place and
    /// never dropped, even when fully cleared.
    taint: Option<Box<[Option<L>]>>,
}

impl<L> MutableTaintString<L> {
    /// Create an untainted mutable value from text.
    pub fn new(content: impl Into<String>, encoding: Encoding) -> Self {
        let content = content.into();
        let cp_len = content.chars().count();
        MutableTaintString {
            content,
            encoding,
            cp_len,
            taint: None,
        }
    }

    pub(crate) fn from_resolved(
        content: String,
        cp_len: usize,
        taint: Option<Vec<Option<L>>>,
        encoding: Encoding,
    ) -> Self {
        MutableTaintString {
            content,
            encoding,
            cp_len,
            taint: taint.map(Vec::into_boxed_slice),
        }
    }

    /// Code-point length.
    #[inline]
    pub fn len(&self) -> usize {
        self.cp_len
    }

    /// Whether this value has zero code points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cp_len == 0
    }

    /// The declared encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The content.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Whether this value carries at least one label. A retained but fully
    /// cleared array reads as untainted.
    #[inline]
    pub fn is_tainted(&self) -> bool {
        array::is_array_tainted(self.taint.as_deref())
    }

    /// The label array, if one has ever been allocated. May be fully
    /// cleared; use [`MutableTaintString::is_tainted`] for the semantic
    /// check.
    #[inline]
    pub fn get_taint(&self) -> Option<&[Option<L>]> {
        self.taint.as_deref()
    }
}

impl<L: Clone> MutableTaintString<L> {
    /// Attach `label` to every code point, in place. A full overwrite, not
    /// a merge.
    pub fn add_taint(&mut self, label: L) {
        self.slots().fill_with(|| Some(label.clone()));
    }

    /// Attach `label` to the code points `[from, to)`, in place.
    ///
    /// Fails with [`TaintError::OutOfRange`] before any slot is written.
    pub fn add_taint_in_range(&mut self, label: L, from: usize, to: usize) -> TaintResult<()> {
        if from > to || to > self.cp_len {
            return Err(TaintError::out_of_range(from, to, self.cp_len));
        }
        for slot in &mut self.slots()[from..to] {
            *slot = Some(label.clone());
        }
        Ok(())
    }

    /// Clear any labels on the code points `[from, to)`, in place.
    ///
    /// Same ordering as the immutable path: an untainted target range is a
    /// no-op with no validation; only the tainted path validates. The
    /// array is retained even when this clears the last label.
    pub fn remove_taint(&mut self, from: usize, to: usize) -> TaintResult<()> {
        if !array::is_sub_range_tainted(self.taint.as_deref(), from, to) {
            return Ok(());
        }
        if from > to || to > self.cp_len {
            return Err(TaintError::out_of_range(from, to, self.cp_len));
        }
        // is_sub_range_tainted returned true, so the array exists
        if let Some(taint) = self.taint.as_deref_mut() {
            for slot in &mut taint[from..to] {
                *slot = None;
            }
        }
        Ok(())
    }

    /// Copy this value into the immutable variant.
    ///
    /// The array is copied through the transform engine, so a fully
    /// cleared array demotes to a plain value at the boundary.
    pub fn freeze(&self) -> TaintString<L> {
        let contents = Contents::new(Arc::from(self.content.as_str()));
        let taint = array::copy(self.taint.as_deref());
        TaintString::from_parts(contents, taint, self.encoding)
    }

    fn slots(&mut self) -> &mut [Option<L>] {
        let cp_len = self.cp_len;
        self.taint
            .get_or_insert_with(|| vec![None; cp_len].into_boxed_slice())
    }
}
