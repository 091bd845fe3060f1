//! Tagged value encoding shared with generated code.
//!
//! Every word crossing the runtime boundary is one of two variants,
//! distinguished by its low bit:
//!
//! - **Scalar**: low bit 1, the integer is the word shifted right by one
//!   (arithmetic shift, so negative integers survive).
//! - **Reference**: low bit 0, the word is the address of an array header
//!   inside the heap.
//!
//! Generated code only ever sees raw words. Inside the runtime a word is
//! decoded into [`Value`], whose references are indices into the heap rather
//! than addresses; see [`crate::heap::Heap::decode`].

/// A machine word as seen by generated code.
pub type Word = i64;

// References are addresses stored in a `Word`, so the two must agree in width.
const _: () = assert!(core::mem::size_of::<Word>() == core::mem::size_of::<usize>());

/// Low bit set on every scalar word.
pub const SCALAR_TAG: Word = 1;

/// Smallest integer a scalar word can carry.
pub const MIN_SCALAR: i64 = i64::MIN >> 1;

/// Largest integer a scalar word can carry.
pub const MAX_SCALAR: i64 = i64::MAX >> 1;

/// Position of an array's header word within the heap, counted in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArrayRef(usize);

impl ArrayRef {
    pub(crate) fn new(header: usize) -> Self {
        ArrayRef(header)
    }

    /// Word index of the header.
    pub fn header(self) -> usize {
        self.0
    }

    /// Word index of slot `index`.
    pub(crate) fn slot(self, index: usize) -> usize {
        self.0 + 1 + index
    }
}

/// A decoded tagged word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Scalar(i64),
    Reference(ArrayRef),
}

impl Value {
    pub fn as_scalar(self) -> Option<i64> {
        match self {
            Value::Scalar(n) => Some(n),
            Value::Reference(_) => None,
        }
    }

    pub fn as_reference(self) -> Option<ArrayRef> {
        match self {
            Value::Reference(array) => Some(array),
            Value::Scalar(_) => None,
        }
    }
}

/// Whether `word` carries the scalar tag.
#[inline]
pub const fn is_scalar(word: Word) -> bool {
    word & SCALAR_TAG == SCALAR_TAG
}

/// Encode an integer as a scalar word.
///
/// Integers outside `MIN_SCALAR..=MAX_SCALAR` lose their top bit.
#[inline]
pub const fn encode_scalar(n: i64) -> Word {
    (n << 1) | SCALAR_TAG
}

/// Recover the integer carried by a word, ignoring its tag bit.
#[inline]
pub const fn decode_scalar(word: Word) -> i64 {
    word >> 1
}
