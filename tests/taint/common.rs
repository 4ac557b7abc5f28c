//! Shared helpers for the taint integration tests.

#![allow(dead_code)]

use taint_string::{Encoding, TaintString};

pub const DEFAULT_ENCODING: Encoding = Encoding::Utf8;

pub fn from<L: Clone>(s: &str) -> TaintString<L> {
    TaintString::new(s, DEFAULT_ENCODING)
}

pub fn taint<L: Clone>(s: &str, label: L) -> TaintString<L> {
    from::<L>(s).add_taint(label)
}

pub fn taint_in_range<L: Clone>(s: &str, label: L, from_cp: usize, to_cp: usize) -> TaintString<L> {
    from::<L>(s)
        .add_taint_in_range(label, from_cp, to_cp)
        .expect("range should be valid")
}

/// Slots of a value's label array, or an empty vec for untainted values.
pub fn labels<L: Clone>(v: &TaintString<L>) -> Vec<Option<L>> {
    v.get_taint().map(|t| t.to_vec()).unwrap_or_default()
}
