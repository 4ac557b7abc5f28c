//! Whole-string taint addition.

use crate::common::{from, labels, taint};
use taint_string::TaintString;

#[test]
fn untainted_should_be_untainted() {
    let v: TaintString<&str> = from("foo");
    assert!(!v.is_tainted());
}

#[test]
fn tainted_should_be_tainted() {
    let untainted: TaintString<&str> = from("foo");
    let tainted = untainted.add_taint("bar");
    assert!(!untainted.is_tainted(), "taint state is immutable");
    assert!(tainted.is_tainted());
    assert!(!untainted.ptr_eq(&tainted), "tainting creates a new value");
}

#[test]
fn taint_array_length_matches_code_points() {
    let tainted = taint("foo", "bar");
    assert_eq!(tainted.get_taint().unwrap().len(), tainted.len());

    let multibyte = taint("föö", "bar");
    assert_eq!(multibyte.get_taint().unwrap().len(), 3);
}

#[test]
fn taint_labels_persist() {
    let tainted = taint("foo", "bar");
    assert_eq!(
        labels(&tainted),
        vec![Some("bar"), Some("bar"), Some("bar")]
    );
}

#[test]
fn untainted_has_no_label_array() {
    let v: TaintString<&str> = from("foo");
    assert!(v.get_taint().is_none());
}

#[test]
fn empty_string_cannot_be_tainted() {
    let empty: TaintString<&str> = from("");
    let tainted = empty.add_taint("bar");
    assert!(!tainted.is_tainted());
    assert!(!empty.ptr_eq(&tainted), "tainting always creates a new value");
}

#[test]
fn double_taint_overwrites() {
    let v: TaintString<&str> = from("foo");
    let first = v.add_taint("a");
    let second = first.add_taint("b");

    assert!(!v.is_tainted());
    assert!(first.is_tainted());
    assert!(second.is_tainted());
    assert_eq!(labels(&second), vec![Some("b"), Some("b"), Some("b")]);
    assert_eq!(labels(&first), vec![Some("a"), Some("a"), Some("a")]);
}

#[test]
fn labels_are_shared_across_values() {
    // labels are opaque and cloned by value; a shared Arc label stays shared
    use std::sync::Arc;
    let label = Arc::new(String::from("origin"));
    let a = taint("foo", Arc::clone(&label));
    let b = taint("bar", Arc::clone(&label));

    let la = a.taint_at(0).unwrap().unwrap();
    let lb = b.taint_at(0).unwrap().unwrap();
    assert!(Arc::ptr_eq(&la, &lb));
}

#[test]
fn round_trip_property() {
    for text in ["a", "foo", "0123456789", "föö bär"] {
        let v = taint(text, 42);
        let taint_arr = v.get_taint().unwrap();
        assert_eq!(taint_arr.len(), v.len());
        assert!(taint_arr.iter().all(|slot| *slot == Some(42)));
    }
}
