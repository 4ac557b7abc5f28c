//! Taint removal and demotion back to plain values.

use crate::common::{from, labels, taint, taint_in_range};
use taint_string::{TaintError, TaintString};

#[test]
fn remove_from_untainted_is_a_referential_noop() {
    let v: TaintString<&str> = from("foo");
    let removed = v.remove_taint(0, 3).unwrap();
    assert!(v.ptr_eq(&removed));
}

#[test]
fn remove_from_untainted_skips_range_validation() {
    // the no-op path returns before any bounds check
    let v: TaintString<&str> = from("foo");
    let removed = v.remove_taint(0, 10).unwrap();
    assert!(v.ptr_eq(&removed));
    let removed = v.remove_taint(7, 2).unwrap();
    assert!(v.ptr_eq(&removed));
}

#[test]
fn remove_from_untainted_sub_range_is_a_noop() {
    let v = taint_in_range("barfoo", "x", 0, 3);
    let removed = v.remove_taint(3, 6).unwrap();
    assert!(v.ptr_eq(&removed));
}

#[test]
fn remove_whole_taint_demotes_to_plain() {
    let v = taint("foo", "bar");
    let removed = v.remove_taint(0, 3).unwrap();
    assert!(!removed.is_tainted());
    assert!(removed.get_taint().is_none());
    assert_eq!(removed.to_string(), "foo");
}

#[test]
fn remove_is_immutable() {
    let v = taint("foo", "bar");
    let _removed = v.remove_taint(0, 3).unwrap();
    assert!(v.is_tainted());
    assert_eq!(labels(&v), vec![Some("bar"), Some("bar"), Some("bar")]);
}

#[test]
fn partial_remove_keeps_other_labels() {
    let v = taint("foobar", "x");
    let removed = v.remove_taint(0, 3).unwrap();
    assert!(removed.is_tainted());
    assert_eq!(
        labels(&removed),
        vec![None, None, None, Some("x"), Some("x"), Some("x")]
    );
}

#[test]
fn remove_middle_splits_taint() {
    let v = taint("abcde", "x");
    let removed = v.remove_taint(1, 4).unwrap();
    assert_eq!(
        labels(&removed),
        vec![Some("x"), None, None, None, Some("x")]
    );
}

#[test]
fn removing_last_label_piecewise_demotes() {
    let v = taint("abcd", "x");
    let partial = v.remove_taint(0, 2).unwrap();
    assert!(partial.is_tainted());
    let cleared = partial.remove_taint(2, 4).unwrap();
    assert!(!cleared.is_tainted());
    assert!(cleared.get_taint().is_none());
}

#[test]
fn tainted_path_validates_the_range() {
    let v = taint("foo", "bar");
    let err = v.remove_taint(0, 10).unwrap_err();
    assert!(matches!(err, TaintError::OutOfRange { .. }));
    let err = v.remove_taint(2, 1).unwrap_err();
    assert!(matches!(err, TaintError::OutOfRange { .. }));
}

#[test]
fn zero_width_remove_on_tainted_is_a_noop() {
    let v = taint("foo", "bar");
    let removed = v.remove_taint(1, 1).unwrap();
    assert!(v.ptr_eq(&removed));
}

#[test]
fn remove_from_lazy_concat_resolves_first() {
    let a = taint("foo", "x");
    let b: TaintString<&str> = from("bar");
    let lazy = a.concat_lazy(&b).unwrap();

    let removed = lazy.remove_taint(0, 3).unwrap();
    assert!(!removed.is_tainted());
    assert_eq!(removed.to_string(), "foobar");
    assert!(!removed.is_lazy());
}
