//! Provenance (taint) tracking for immutable, multi-encoding strings.
//!
//! This crate attaches opaque, caller-supplied labels to ranges of code
//! points in a string value and propagates them through string-producing
//! operations (concatenation, eager or deferred, substring extraction,
//! encoding conversion, builder appends) without materializing derived
//! strings just to answer a taint query.
//!
//! # Architecture
//!
//! - **String values** ([`string`]): [`TaintString`], an immutable value
//!   with three representations (plain, tainted, deferred concat) behind
//!   shared buffers; [`MutableTaintString`], the in-place variant; and
//!   [`TaintStringBuilder`] for incremental construction.
//! - **Taint engine** ([`taint`]): pure label-array predicates and
//!   transforms, the lazy-concat resolver, and the caller-facing operators.
//! - **Encodings** ([`encoding`]): declared encodings and on-demand byte
//!   materialization. The taint layer never reads raw bytes, so switching
//!   encodings preserves the per-code-point label assignment.
//!
//! # Representation invariants
//!
//! A label array always has exactly one slot per code point of its owning
//! value. "No taint at all" is represented by the *absence* of the array,
//! never by an array of empty slots, wherever achievable: the common
//! untainted case allocates nothing and every query on it short-circuits.
//! All operations on immutable values are copy-on-write: inputs are never
//! modified, so shared sub-trees stay safe for concurrent readers without
//! locking.
//!
//! # Example
//!
//! ```
//! use taint_string::TaintString;
//!
//! let v: TaintString<&str> = TaintString::from("foo");
//! let tainted = v.add_taint("user-input");
//! assert!(tainted.is_tainted());
//! assert!(!v.is_tainted());
//!
//! // taint propagates through lazy concatenation without materializing
//! let combined = tainted.concat_lazy(&TaintString::from("bar")).unwrap();
//! let taint = combined.get_taint().unwrap();
//! assert_eq!(taint.len(), 6);
//! assert_eq!(taint[0], Some("user-input"));
//! assert_eq!(taint[3], None);
//!
//! // clearing the last label demotes back to a plain value
//! let cleared = combined.remove_taint(0, 3).unwrap();
//! assert!(!cleared.is_tainted());
//! ```

pub mod encoding;
pub mod error;
pub mod string;
pub mod taint;

pub use encoding::Encoding;
pub use error::{TaintError, TaintResult};
pub use string::{MutableTaintString, TaintString, TaintStringBuilder};
