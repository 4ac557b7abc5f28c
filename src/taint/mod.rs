//! The taint propagation engine.
//!
//! Three layers, lowest first:
//!
//! 1. **Array engine** ([`array`]): pure predicates and transforms over
//!    label arrays: "is anything labeled in this range", copy, sub-range
//!    extraction, two-way concatenation. The absent array is the canonical
//!    untainted representation and every transform preserves it.
//! 2. **Resolver** ([`resolver`]): computes the effective label array of a
//!    deferred-concatenation tree on demand, iteratively, without
//!    materializing the combined content.
//! 3. **Operators** ([`ops`]): the caller-facing contract on
//!    [`crate::TaintString`] (query, add whole or ranged, remove, fetch),
//!    dispatching over the value's representation.
//!
//! Concatenation semantics are defined exactly once, in
//! [`array::concat`]; the eager concat path, the resolver and the builder
//! all delegate to it.

pub mod array;
pub mod ops;
pub mod resolver;

pub use resolver::{is_value_tainted, resolve_taint};
