//! Pure predicates and transforms over label arrays.
//!
//! A label array has one slot per code point of its owning string; a slot is
//! either `Some(label)` or `None`. The array as a whole is optional:
//! `None` is the canonical "definitely untainted" representation and avoids
//! any allocation, so every transform here returns `None` whenever the
//! result carries no label at all.
//!
//! # Range policy
//!
//! The predicates and transforms in this module *clamp* out-of-range bounds
//! to the array instead of failing: they sit in guard position, where the
//! caller may not have validated inputs yet (removing taint from an
//! untainted range must succeed for any range). Range *validation* is the
//! job of the mutation operators in [`super::ops`], which reject bad ranges
//! with [`crate::TaintError::OutOfRange`] before touching any array.

/// Checks whether `taint` holds at least one label in `[from, to)`.
///
/// Absent arrays are never tainted. Bounds are clamped to the array, and an
/// inverted range is treated as empty; this predicate is total.
pub fn is_sub_range_tainted<L>(taint: Option<&[Option<L>]>, from: usize, to: usize) -> bool {
    let Some(taint) = taint else {
        return false;
    };
    let from = from.min(taint.len());
    let to = to.min(taint.len());
    if from >= to {
        return false;
    }
    taint[from..to].iter().any(Option::is_some)
}

/// Checks whether `taint` holds at least one label anywhere.
///
/// An array that exists but has every slot cleared reads as untainted; the
/// distinction matters only for allocation, never for propagation.
#[inline]
pub fn is_array_tainted<L>(taint: Option<&[Option<L>]>) -> bool {
    match taint {
        Some(t) => is_sub_range_tainted(taint, 0, t.len()),
        None => false,
    }
}

/// Shallow-copies `taint` into a fresh array.
///
/// Returns `None` if the input is absent or carries no actual label, so a
/// zeroed array is demoted back to the cheap representation on copy.
pub fn copy<L: Clone>(taint: Option<&[Option<L>]>) -> Option<Vec<Option<L>>> {
    if is_array_tainted(taint) {
        taint.map(<[Option<L>]>::to_vec)
    } else {
        None
    }
}

/// Extracts the `[from, to)` slice of `taint` as a fresh array.
///
/// Returns `None` if the (clamped) sub-range carries no label. Used for
/// substring taint derivation, where an untainted slice of a tainted string
/// must come out as a plain untainted value.
pub fn sub_array<L: Clone>(
    taint: Option<&[Option<L>]>,
    from: usize,
    to: usize,
) -> Option<Vec<Option<L>>> {
    if !is_sub_range_tainted(taint, from, to) {
        return None;
    }
    taint.map(|t| {
        let from = from.min(t.len());
        let to = to.min(t.len());
        t[from..to].to_vec()
    })
}

/// Concatenates two label arrays into one of length `len_a + len_b`.
///
/// This is the single place where concatenation semantics are defined; the
/// eager concat path, the lazy-concat resolver and the builder all go
/// through it. The four cases:
///
/// - both sides untainted: `None`, no allocation;
/// - only `a` tainted: `a`'s slots followed by `len_b` empty slots;
/// - only `b` tainted: `len_a` empty slots followed by `b`'s slots;
/// - both tainted: `a`'s slots followed by `b`'s slots.
///
/// A present-but-zeroed side counts as untainted, keeping the result
/// canonical.
pub fn concat<L: Clone>(
    a: Option<&[Option<L>]>,
    len_a: usize,
    b: Option<&[Option<L>]>,
    len_b: usize,
) -> Option<Vec<Option<L>>> {
    let a = a.filter(|t| is_array_tainted(Some(*t)));
    let b = b.filter(|t| is_array_tainted(Some(*t)));
    if let Some(t) = a {
        debug_assert_eq!(t.len(), len_a);
    }
    if let Some(t) = b {
        debug_assert_eq!(t.len(), len_b);
    }

    match (a, b) {
        (None, None) => None,
        (Some(a), None) => {
            let mut taint = Vec::with_capacity(len_a + len_b);
            taint.extend_from_slice(a);
            taint.resize(len_a + len_b, None);
            Some(taint)
        }
        (None, Some(b)) => {
            let mut taint = Vec::with_capacity(len_a + len_b);
            taint.resize(len_a, None);
            taint.extend_from_slice(b);
            Some(taint)
        }
        (Some(a), Some(b)) => {
            let mut taint = Vec::with_capacity(len_a + len_b);
            taint.extend_from_slice(a);
            taint.extend_from_slice(b);
            Some(taint)
        }
    }
}
