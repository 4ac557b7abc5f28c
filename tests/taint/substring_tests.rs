//! Taint propagation through substring extraction.

use crate::common::{from, labels, taint, taint_in_range};
use taint_string::{TaintError, TaintString};

#[test]
fn substring_of_untainted_is_untainted() {
    let v: TaintString<&str> = from("foobar");
    let sub = v.substring(0, 3).unwrap();
    assert!(!sub.is_tainted());
    assert_eq!(sub.to_string(), "foo");
}

#[test]
fn substring_of_tainted_keeps_its_slice_of_labels() {
    let v = taint("foobar", "x");
    let sub = v.substring(3, 6).unwrap();
    assert_eq!(sub.to_string(), "bar");
    assert_eq!(labels(&sub), vec![Some("x"), Some("x"), Some("x")]);
}

#[test]
fn untainted_slice_of_tainted_string_is_plain() {
    let v = taint_in_range("foobar", "x", 0, 3);
    let sub = v.substring(3, 6).unwrap();
    assert!(!sub.is_tainted());
    assert!(sub.get_taint().is_none());
}

#[test]
fn partially_tainted_slice() {
    let v = taint_in_range("foobar", "x", 2, 4);
    let sub = v.substring(1, 5).unwrap();
    assert_eq!(labels(&sub), vec![None, Some("x"), Some("x"), None]);
}

#[test]
fn empty_substring_has_no_taint() {
    let v = taint("foobar", "x");
    let sub = v.substring(2, 2).unwrap();
    assert!(sub.is_empty());
    assert!(!sub.is_tainted());
    assert!(sub.get_taint().is_none());
}

#[test]
fn out_of_bounds_substring_is_rejected() {
    let v = taint("foo", "x");
    let err = v.substring(0, 4).unwrap_err();
    assert!(matches!(err, TaintError::OutOfRange { .. }));
    assert!(v.substring(2, 1).is_err());
}

#[test]
fn substring_does_not_modify_the_parent() {
    let v = taint("foobar", "x");
    let _sub = v.substring(0, 2).unwrap();
    assert_eq!(labels(&v).len(), 6);
}

#[test]
fn lazy_substring_matches_eager() {
    let v = taint_in_range("foobar", "x", 1, 5);
    let eager = v.substring(2, 6).unwrap();
    let lazy = v.substring_lazy(2, 6).unwrap();
    assert_eq!(eager.to_string(), lazy.to_string());
    assert_eq!(labels(&eager), labels(&lazy));
}

#[test]
fn substring_of_lazy_concat_spans_the_seam() {
    let a = taint("foo", "x");
    let b = taint("bar", "y");
    let lazy = a.concat_lazy(&b).unwrap();

    let sub = lazy.substring(2, 4).unwrap();
    assert_eq!(sub.to_string(), "ob");
    assert_eq!(labels(&sub), vec![Some("x"), Some("y")]);
}

#[test]
fn substring_indices_are_code_points() {
    let v = taint("fööbar", "x");
    let sub = v.substring(1, 3).unwrap();
    assert_eq!(sub.to_string(), "öö");
    assert_eq!(labels(&sub), vec![Some("x"), Some("x")]);
}

#[test]
fn chained_substrings_compose() {
    let v = taint_in_range("abcdefgh", "x", 2, 6);
    let outer = v.substring(1, 7).unwrap();
    let inner = outer.substring(2, 4).unwrap();
    assert_eq!(inner.to_string(), "de");
    assert_eq!(labels(&inner), vec![Some("x"), Some("x")]);
}
