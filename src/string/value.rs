//! The immutable string value type.
//!
//! A [`TaintString`] is an immutable sequence of code points under a declared
//! [`Encoding`], with optional per-code-point taint labels. All heavy state
//! lives behind `Arc`s, so cloning is cheap and concurrent readers of shared
//! values need no locking.
//!
//! Three representations, dispatched by exhaustive `match` everywhere:
//!
//! - `Plain`: content only, no taint attached. The cheapest case.
//! - `Tainted`: content plus a label array of the same code-point length.
//! - `Concat`: a deferred concatenation of two child values. Content is not
//!   materialized until something actually needs the combined text; taint
//!   queries resolve over the tree without materializing.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::fmt;
use std::mem;
use std::sync::Arc;

use crate::encoding::Encoding;
use crate::error::{TaintError, TaintResult};
use crate::string::mutable::MutableTaintString;
use crate::taint::{array, resolver};

static EMPTY_TEXT: Lazy<Arc<str>> = Lazy::new(|| Arc::from(""));

/// Shared string content: a UTF-8 buffer plus the byte sub-range this value
/// occupies. Substrings share the buffer and narrow the range.
#[derive(Debug, Clone)]
pub(crate) struct Contents {
    pub(crate) text: Arc<str>,
    /// Byte offset of the first code point, on a char boundary
    pub(crate) start: usize,
    /// Byte offset one past the last code point, on a char boundary
    pub(crate) end: usize,
    /// Cached code-point length of `text[start..end]`
    pub(crate) cp_len: usize,
}

impl Contents {
    pub(crate) fn new(text: Arc<str>) -> Self {
        let end = text.len();
        let cp_len = text.chars().count();
        Contents {
            text,
            start: 0,
            end,
            cp_len,
        }
    }

    pub(crate) fn empty() -> Self {
        Contents {
            text: Arc::clone(&EMPTY_TEXT),
            start: 0,
            end: 0,
            cp_len: 0,
        }
    }

    #[inline]
    pub(crate) fn as_str(&self) -> &str {
        &self.text[self.start..self.end]
    }

    /// Byte offsets of the code-point range `[from, to)` within `as_str()`.
    /// The range must already be validated against `cp_len`.
    pub(crate) fn byte_range(&self, from: usize, to: usize) -> (usize, usize) {
        let s = self.as_str();
        let mut start = s.len();
        let mut end = s.len();
        for (cp, (byte, _)) in s.char_indices().enumerate() {
            if cp == from {
                start = byte;
            }
            if cp == to {
                end = byte;
                break;
            }
        }
        if from == to {
            end = start;
        }
        (self.start + start, self.start + end)
    }
}

/// A deferred concatenation node. Children may be any variant, including
/// further `Concat` nodes; the tree is acyclic by construction.
#[derive(Debug, Clone)]
pub(crate) struct ConcatNode<L> {
    pub(crate) left: Arc<TaintString<L>>,
    pub(crate) right: Arc<TaintString<L>>,
    /// Sum of the children's code-point lengths
    pub(crate) cp_len: usize,
}

#[derive(Debug, Clone)]
pub(crate) enum Repr<L> {
    Plain(Contents),
    Tainted(Contents, Arc<[Option<L>]>),
    Concat(ConcatNode<L>),
}

/// An immutable string value with optional per-code-point taint.
///
/// `L` is the caller's opaque label type; the engine never inspects labels
/// beyond presence. Values are cheap to clone and safe to share across
/// threads when `L` is `Send + Sync`.
///
/// Equality compares content and encoding only; taint is provenance
/// metadata, not part of the value.
#[derive(Debug, Clone)]
pub struct TaintString<L> {
    pub(crate) repr: Repr<L>,
    pub(crate) encoding: Encoding,
}

impl<L> TaintString<L> {
    /// Create an untainted value from text under the given encoding.
    pub fn new(text: impl Into<Arc<str>>, encoding: Encoding) -> Self {
        TaintString {
            repr: Repr::Plain(Contents::new(text.into())),
            encoding,
        }
    }

    /// The empty string under the given encoding.
    pub fn empty(encoding: Encoding) -> Self {
        TaintString {
            repr: Repr::Plain(Contents::empty()),
            encoding,
        }
    }

    /// Code-point length of this value. Independent of byte encoding width.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Plain(c) => c.cp_len,
            Repr::Tainted(c, _) => c.cp_len,
            Repr::Concat(n) => n.cp_len,
        }
    }

    /// Whether this value has zero code points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The declared encoding of this value.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Whether this value is a deferred concatenation whose combined content
    /// has not been materialized.
    #[inline]
    pub fn is_lazy(&self) -> bool {
        matches!(self.repr, Repr::Concat(_))
    }

    /// Structural-sharing witness: true iff `self` and `other` share the
    /// exact same underlying state. Used to observe the referential no-op
    /// guarantees (e.g. removing taint from an untainted range).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        if self.encoding != other.encoding {
            return false;
        }
        match (&self.repr, &other.repr) {
            (Repr::Plain(a), Repr::Plain(b)) => {
                Arc::ptr_eq(&a.text, &b.text) && a.start == b.start && a.end == b.end
            }
            (Repr::Tainted(a, ta), Repr::Tainted(b, tb)) => {
                Arc::ptr_eq(&a.text, &b.text)
                    && a.start == b.start
                    && a.end == b.end
                    && Arc::ptr_eq(ta, tb)
            }
            (Repr::Concat(a), Repr::Concat(b)) => {
                Arc::ptr_eq(&a.left, &b.left) && Arc::ptr_eq(&a.right, &b.right)
            }
            _ => false,
        }
    }

    /// The content of this value. Borrows for plain and tainted values;
    /// materializes the combined text for deferred concatenations without
    /// modifying the tree.
    pub fn as_str(&self) -> Cow<'_, str> {
        match &self.repr {
            Repr::Plain(c) | Repr::Tainted(c, _) => Cow::Borrowed(c.as_str()),
            Repr::Concat(_) => {
                let mut out = String::new();
                let mut stack: Vec<&TaintString<L>> = vec![self];
                while let Some(cur) = stack.pop() {
                    match &cur.repr {
                        Repr::Plain(c) | Repr::Tainted(c, _) => out.push_str(c.as_str()),
                        Repr::Concat(n) => {
                            stack.push(n.right.as_ref());
                            stack.push(n.left.as_ref());
                        }
                    }
                }
                Cow::Owned(out)
            }
        }
    }

    /// Materialize the content of this value into a single shared buffer.
    /// For concat trees this flattens the tree; for other variants it
    /// reuses the existing buffer.
    pub(crate) fn contents(&self) -> Contents {
        match &self.repr {
            Repr::Plain(c) | Repr::Tainted(c, _) => c.clone(),
            Repr::Concat(n) => {
                let text: Arc<str> = Arc::from(self.as_str().into_owned());
                let end = text.len();
                Contents {
                    text,
                    start: 0,
                    end,
                    cp_len: n.cp_len,
                }
            }
        }
    }

    /// Byte materialization under the declared encoding.
    pub fn to_bytes(&self) -> TaintResult<Vec<u8>> {
        self.encoding.encode(&self.as_str())
    }
}

impl<L: Clone> TaintString<L> {
    pub(crate) fn from_parts(
        contents: Contents,
        taint: Option<Vec<Option<L>>>,
        encoding: Encoding,
    ) -> Self {
        debug_assert!(taint.as_ref().map_or(true, |t| t.len() == contents.cp_len));
        let repr = match taint {
            Some(taint) => Repr::Tainted(contents, taint.into()),
            None => Repr::Plain(contents),
        };
        TaintString { repr, encoding }
    }

    /// Eagerly concatenate `self` and `other`, combining content and taint.
    ///
    /// Fails with [`TaintError::EncodingMismatch`] if the encodings differ.
    /// An empty operand is a fast path: the other side is returned
    /// unchanged, taint included.
    pub fn concat(&self, other: &Self) -> TaintResult<Self> {
        self.check_encoding(other)?;
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }

        let (a, b) = (self.as_str(), other.as_str());
        let mut text = String::with_capacity(a.len() + b.len());
        text.push_str(&a);
        text.push_str(&b);
        let contents = Contents::new(Arc::from(text));

        let taint_a = resolver::resolve_taint(self);
        let taint_b = resolver::resolve_taint(other);
        let taint = array::concat(
            taint_a.as_deref(),
            self.len(),
            taint_b.as_deref(),
            other.len(),
        );
        Ok(Self::from_parts(contents, taint, self.encoding))
    }

    /// Concatenate `self` and `other` lazily: the result is a tree node
    /// referencing both operands, with no combined buffer. Taint queries on
    /// the result resolve over the tree on demand.
    pub fn concat_lazy(&self, other: &Self) -> TaintResult<Self> {
        self.check_encoding(other)?;
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        Ok(TaintString {
            repr: Repr::Concat(ConcatNode {
                cp_len: self.len() + other.len(),
                left: Arc::new(self.clone()),
                right: Arc::new(other.clone()),
            }),
            encoding: self.encoding,
        })
    }

    /// Extract the code points `[from, to)` into a compacted new value,
    /// deriving taint for the sub-range. An untainted slice of a tainted
    /// string comes out plain.
    pub fn substring(&self, from: usize, to: usize) -> TaintResult<Self> {
        let (contents, taint) = self.substring_inner(from, to)?;
        let text: Arc<str> = Arc::from(&contents.text[contents.start..contents.end]);
        Ok(Self::from_parts(Contents::new(text), taint, self.encoding))
    }

    /// Like [`TaintString::substring`], but shares the parent's buffer
    /// instead of copying, keeping it alive for the life of the result.
    pub fn substring_lazy(&self, from: usize, to: usize) -> TaintResult<Self> {
        let (contents, taint) = self.substring_inner(from, to)?;
        Ok(Self::from_parts(contents, taint, self.encoding))
    }

    fn substring_inner(
        &self,
        from: usize,
        to: usize,
    ) -> TaintResult<(Contents, Option<Vec<Option<L>>>)> {
        let len = self.len();
        if from > to || to > len {
            return Err(TaintError::out_of_range(from, to, len));
        }
        let contents = self.contents();
        let (start, end) = contents.byte_range(from, to);
        let narrowed = Contents {
            text: contents.text,
            start,
            end,
            cp_len: to - from,
        };
        let taint = resolver::resolve_taint(self);
        let sub = array::sub_array(taint.as_deref(), from, to);
        Ok((narrowed, sub))
    }

    /// Re-declare this value under a different encoding.
    ///
    /// The per-code-point label assignment is encoding-independent, so the
    /// taint carries over unchanged. Fails with
    /// [`TaintError::UnsupportedEncoding`] if the content is not
    /// representable in `target`.
    pub fn switch_encoding(&self, target: Encoding) -> TaintResult<Self> {
        if target == self.encoding {
            return Ok(self.clone());
        }
        if !target.can_encode(&self.as_str()) {
            return Err(TaintError::UnsupportedEncoding(target));
        }
        Ok(TaintString {
            repr: self.repr.clone(),
            encoding: target,
        })
    }

    /// Flatten a concat tree into an eager value with resolved taint.
    /// Callers that build deep trees use this to bound later resolution
    /// cost; no automatic flattening happens otherwise.
    pub fn flatten(&self) -> Self {
        match &self.repr {
            Repr::Plain(_) | Repr::Tainted(_, _) => self.clone(),
            Repr::Concat(_) => {
                let taint = resolver::resolve_taint(self).map(|t| t.to_vec());
                Self::from_parts(self.contents(), taint, self.encoding)
            }
        }
    }

    /// Copy this value into the in-place-mutable variant.
    pub fn to_mutable(&self) -> MutableTaintString<L> {
        MutableTaintString::from_resolved(
            self.as_str().into_owned(),
            self.len(),
            resolver::resolve_taint(self).map(|t| t.to_vec()),
            self.encoding,
        )
    }

    fn check_encoding(&self, other: &Self) -> TaintResult<()> {
        if self.encoding != other.encoding {
            return Err(TaintError::EncodingMismatch {
                left: self.encoding,
                right: other.encoding,
            });
        }
        Ok(())
    }
}

impl<L> PartialEq for TaintString<L> {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding && self.as_str() == other.as_str()
    }
}

impl<L> fmt::Display for TaintString<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl<L> From<&str> for TaintString<L> {
    fn from(s: &str) -> Self {
        TaintString::new(s, Encoding::default())
    }
}

impl<L> From<String> for TaintString<L> {
    fn from(s: String) -> Self {
        TaintString::new(s, Encoding::default())
    }
}

// Deep skewed concat trees would overflow the stack in the automatic drop
// glue (each node recursing into its children). Detach children onto an
// explicit worklist instead, unwrapping each Arc only when this was its
// last reference.
impl<L> Drop for TaintString<L> {
    fn drop(&mut self) {
        if !matches!(self.repr, Repr::Concat(_)) {
            return;
        }
        let mut stack: Vec<Arc<TaintString<L>>> = Vec::new();
        detach_children(&mut self.repr, &mut stack);
        while let Some(child) = stack.pop() {
            if let Some(mut child) = Arc::into_inner(child) {
                detach_children(&mut child.repr, &mut stack);
            }
        }
    }
}

fn detach_children<L>(repr: &mut Repr<L>, stack: &mut Vec<Arc<TaintString<L>>>) {
    if matches!(repr, Repr::Concat(_)) {
        if let Repr::Concat(node) = mem::replace(repr, Repr::Plain(Contents::empty())) {
            stack.push(node.left);
            stack.push(node.right);
        }
    }
}
