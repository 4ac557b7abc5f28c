//! On-demand taint resolution over deferred-concatenation trees.
//!
//! A concat node has no label array of its own; its effective taint is the
//! ordered concatenation of its children's taint. Builders can produce
//! arbitrarily deep skewed trees, so both the taint predicate and the
//! resolver walk with an explicit stack rather than recursion. Neither ever
//! materializes the combined text; they operate on lengths and child label
//! arrays only.

use std::iter;
use std::sync::Arc;
use tracing::trace;

use crate::string::value::{Repr, TaintString};
use crate::taint::array;

/// Whether `value` carries at least one label anywhere.
///
/// Short-circuits on the first tainted leaf. A plain value is never
/// tainted; a tainted value defers to the array predicate (so a zeroed
/// array reads as untainted); a concat node is tainted iff either child is.
pub fn is_value_tainted<L>(value: &TaintString<L>) -> bool {
    let mut stack: Vec<&TaintString<L>> = vec![value];
    while let Some(cur) = stack.pop() {
        match &cur.repr {
            Repr::Plain(_) => {}
            Repr::Tainted(_, taint) => {
                if array::is_array_tainted(Some(taint)) {
                    return true;
                }
            }
            Repr::Concat(node) => {
                stack.push(node.right.as_ref());
                stack.push(node.left.as_ref());
            }
        }
    }
    false
}

/// Compute the effective label array of `value`.
///
/// Non-concat values yield their own array (or absence) directly; note that
/// a directly attached all-`None` array is returned as-is, matching the
/// transient representation tolerated by the data model. For concat trees
/// the result is `None` unless some leaf is genuinely tainted, in which
/// case one array of the tree's total code-point length is assembled from
/// the leaves in order.
pub fn resolve_taint<L: Clone>(value: &TaintString<L>) -> Option<Arc<[Option<L>]>> {
    match &value.repr {
        Repr::Plain(_) => None,
        Repr::Tainted(_, taint) => Some(Arc::clone(taint)),
        Repr::Concat(node) => {
            if !is_value_tainted(value) {
                return None;
            }
            let mut slots: Vec<Option<L>> = Vec::with_capacity(node.cp_len);
            let mut leaves = 0usize;
            let mut stack: Vec<&TaintString<L>> = vec![value];
            while let Some(cur) = stack.pop() {
                match &cur.repr {
                    Repr::Plain(c) => {
                        leaves += 1;
                        slots.extend(iter::repeat_with(|| None).take(c.cp_len));
                    }
                    Repr::Tainted(_, taint) => {
                        leaves += 1;
                        slots.extend(taint.iter().cloned());
                    }
                    Repr::Concat(n) => {
                        stack.push(n.right.as_ref());
                        stack.push(n.left.as_ref());
                    }
                }
            }
            debug_assert_eq!(slots.len(), node.cp_len);
            trace!(leaves, cp_len = node.cp_len, "resolved lazy concat taint");
            Some(slots.into())
        }
    }
}
