//! Caller-facing taint operations on [`TaintString`].
//!
//! Each operation dispatches over the value's representation (plain,
//! tainted, deferred concat) and goes through the array engine in
//! [`super::array`] for anything that touches label slots. The immutable
//! discipline: every mutating-looking operation allocates a new value and
//! leaves its input untouched; the only fast paths that return the input's
//! state unchanged are the two documented no-ops (removing taint from an
//! untainted range, and the zero-allocation answers for untainted values).

use crate::error::{TaintError, TaintResult};
use crate::string::value::TaintString;
use crate::taint::{array, resolver};
use std::sync::Arc;

impl<L> TaintString<L> {
    /// Whether this value carries at least one taint label.
    ///
    /// Never materializes a deferred concatenation; the check
    /// short-circuits on the first tainted leaf.
    #[inline]
    pub fn is_tainted(&self) -> bool {
        resolver::is_value_tainted(self)
    }
}

impl<L: Clone> TaintString<L> {
    /// The label array of this value, or `None` if untainted.
    ///
    /// Deferred concatenations resolve their effective taint on demand
    /// without materializing content. A directly attached all-`None` array
    /// (the tolerated transient form) is returned as-is.
    pub fn get_taint(&self) -> Option<Arc<[Option<L>]>> {
        resolver::resolve_taint(self)
    }

    /// The label at code point `index`.
    ///
    /// An untainted value answers `None` for any index, without bounds
    /// checking; only a tainted value validates the index.
    pub fn taint_at(&self, index: usize) -> TaintResult<Option<L>> {
        match self.get_taint() {
            None => Ok(None),
            Some(taint) => {
                if index >= taint.len() {
                    return Err(TaintError::out_of_range(index, index + 1, taint.len()));
                }
                Ok(taint[index].clone())
            }
        }
    }

    /// Attach `label` to every code point, producing a new value over the
    /// same content.
    ///
    /// This is a full overwrite, not a merge: any previously attached
    /// labels are replaced. Tainting an empty string produces a new value
    /// that still reads as untainted (its label array has no slots).
    pub fn add_taint(&self, label: L) -> Self {
        let len = self.len();
        self.overwrite_range(label, 0, len, len)
    }

    /// Attach `label` to the code points `[from, to)`, producing a new
    /// value over the same content.
    ///
    /// Fails with [`TaintError::OutOfRange`] if `from > to` or
    /// `to > self.len()`, before anything is allocated. A zero-width range
    /// succeeds and changes no slot. If the receiver was already tainted,
    /// its array is cloned first and the range overwritten in the clone;
    /// a range covering the whole string skips the clone and starts fresh,
    /// since every slot is overwritten anyway.
    pub fn add_taint_in_range(&self, label: L, from: usize, to: usize) -> TaintResult<Self> {
        let len = self.len();
        if from > to || to > len {
            return Err(TaintError::out_of_range(from, to, len));
        }
        Ok(self.overwrite_range(label, from, to, len))
    }

    /// Range must already be validated. `len == self.len()`.
    fn overwrite_range(&self, label: L, from: usize, to: usize, len: usize) -> Self {
        let covers = to - from == len;
        let mut slots: Vec<Option<L>> = if covers {
            vec![None; len]
        } else {
            match self.get_taint() {
                Some(taint) if array::is_array_tainted(Some(&taint)) => taint.to_vec(),
                _ => vec![None; len],
            }
        };
        for slot in &mut slots[from..to] {
            *slot = Some(label.clone());
        }
        Self::from_parts(self.contents(), Some(slots), self.encoding())
    }

    /// Remove any labels on the code points `[from, to)`.
    ///
    /// If the target range carries no label this is a referential no-op:
    /// the original value is returned unchanged and the range is not
    /// validated. Only the tainted path validates, then clones and clears;
    /// a result with no label left demotes back to a plain value.
    pub fn remove_taint(&self, from: usize, to: usize) -> TaintResult<Self> {
        let Some(taint) = self.get_taint() else {
            return Ok(self.clone());
        };
        if !array::is_sub_range_tainted(Some(&taint), from, to) {
            return Ok(self.clone());
        }

        let len = self.len();
        if from > to || to > len {
            return Err(TaintError::out_of_range(from, to, len));
        }
        let mut slots = taint.to_vec();
        for slot in &mut slots[from..to] {
            *slot = None;
        }
        let remaining = array::is_array_tainted(Some(&slots)).then_some(slots);
        Ok(Self::from_parts(self.contents(), remaining, self.encoding()))
    }
}
