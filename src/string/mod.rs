//! String value types: the immutable [`value::TaintString`], the in-place
//! [`mutable::MutableTaintString`], and the accumulating
//! [`builder::TaintStringBuilder`].

pub mod builder;
pub mod mutable;
pub mod value;

pub use builder::TaintStringBuilder;
pub use mutable::MutableTaintString;
pub use value::TaintString;
