//! Fixed-capacity bump heap holding every L1 array.
//!
//! An array is laid out as a header word holding its element count (a plain
//! integer, not tag-encoded) followed by that many tagged slots. Arrays are
//! never freed or moved, so the raw addresses handed to generated code stay
//! valid for as long as the heap lives.
//!
//! Generated code reads and writes slots through those raw addresses, so the
//! heap keeps its storage behind a raw pointer and never hands out long-lived
//! Rust references into it.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{ArrayRef, SCALAR_TAG, Value, Word, decode_scalar, encode_scalar, is_scalar};

/// Heap capacity used when nothing else is configured (8 MB worth of words).
pub const DEFAULT_HEAP_WORDS: usize = 8_388_608;

const WORD_BYTES: usize = core::mem::size_of::<Word>();

pub struct Heap {
    base: NonNull<Word>,
    capacity: usize,
    /// Next free word; everything below it has been handed out.
    next: usize,
}

// The heap exclusively owns its allocation.
unsafe impl Send for Heap {}

impl Heap {
    /// Reserve a zeroed heap of `capacity` words.
    pub fn with_capacity(capacity: usize) -> RuntimeResult<Self> {
        let base = if capacity == 0 {
            NonNull::dangling()
        } else {
            let layout = Self::layout(capacity)?;
            let ptr = unsafe { std::alloc::alloc_zeroed(layout) } as *mut Word;
            NonNull::new(ptr).ok_or(RuntimeError::HostAllocation { words: capacity })?
        };

        Ok(Heap {
            base,
            capacity,
            next: 0,
        })
    }

    fn layout(capacity: usize) -> RuntimeResult<Layout> {
        Layout::array::<Word>(capacity).map_err(|_| RuntimeError::HostAllocation { words: capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Words handed out so far, headers included.
    pub fn words_consumed(&self) -> usize {
        self.next
    }

    /// Bump-allocate an array of `count` slots, each set to `fill`.
    ///
    /// The reservation must leave the cursor strictly below the capacity, so
    /// the final heap word is never handed out. A failed reservation leaves
    /// the heap untouched.
    pub fn allocate(&mut self, count: i64, fill: Word) -> RuntimeResult<ArrayRef> {
        let len = usize::try_from(count).map_err(|_| RuntimeError::NegativeSize { count })?;

        let exhausted = RuntimeError::HeapExhausted {
            requested: len.saturating_add(1),
            consumed: self.next,
            capacity: self.capacity,
        };
        let end = len
            .checked_add(1)
            .and_then(|words| self.next.checked_add(words))
            .filter(|&end| end < self.capacity)
            .ok_or(exhausted)?;

        let header = self.next;
        // SAFETY: `header..end` lies within the allocation and no other
        // Rust reference into it is live.
        let words = unsafe {
            core::slice::from_raw_parts_mut(self.base.as_ptr().add(header), end - header)
        };
        words[0] = count;
        words[1..].fill(fill);
        self.next = end;

        tracing::debug!(count, header, consumed = self.next, "allocated array");
        Ok(ArrayRef::new(header))
    }

    fn read(&self, index: usize) -> Word {
        debug_assert!(index < self.next);
        // SAFETY: callers only pass indices below `next`, which is within the allocation.
        unsafe { self.base.as_ptr().add(index).read() }
    }

    fn write(&mut self, index: usize, word: Word) {
        debug_assert!(index < self.next);
        // SAFETY: as for `read`.
        unsafe { self.base.as_ptr().add(index).write(word) }
    }

    /// Element count stored in an array's header.
    pub fn array_len(&self, array: ArrayRef) -> i64 {
        self.read(array.header())
    }

    /// Slot `index` of `array`, if it lies inside both the array and the
    /// allocated part of the heap.
    ///
    /// The header may have been overwritten by generated code, so the
    /// allocated region is checked as well.
    pub fn slot(&self, array: ArrayRef, index: usize) -> Option<Word> {
        self.slot_index(array, index).map(|at| self.read(at))
    }

    /// Overwrite slot `index` of `array`. Returns false when out of range.
    pub fn set_slot(&mut self, array: ArrayRef, index: usize, word: Word) -> bool {
        match self.slot_index(array, index) {
            Some(at) => {
                self.write(at, word);
                true
            }
            None => false,
        }
    }

    fn slot_index(&self, array: ArrayRef, index: usize) -> Option<usize> {
        let len = usize::try_from(self.array_len(array)).ok()?;
        if index >= len {
            return None;
        }
        Some(array.slot(index)).filter(|&at| at < self.next)
    }

    /// Raw address of an array's header, as handed to generated code.
    pub fn address_of(&self, array: ArrayRef) -> Word {
        self.base.as_ptr().wrapping_add(array.header()) as usize as Word
    }

    /// Raw word for a decoded value.
    pub fn encode(&self, value: Value) -> Word {
        match value {
            Value::Scalar(n) => encode_scalar(n),
            Value::Reference(array) => self.address_of(array),
        }
    }

    /// Decode a raw word.
    ///
    /// A reference must be word aligned and point into the allocated part of
    /// this heap; anything else is a [`RuntimeError::DanglingReference`].
    pub fn decode(&self, word: Word) -> RuntimeResult<Value> {
        if is_scalar(word) {
            return Ok(Value::Scalar(decode_scalar(word)));
        }
        self.locate(word)
            .map(Value::Reference)
            .ok_or(RuntimeError::DanglingReference { word })
    }

    fn locate(&self, word: Word) -> Option<ArrayRef> {
        debug_assert_eq!(word & SCALAR_TAG, 0);
        let offset = (word as usize).checked_sub(self.base.as_ptr() as usize)?;
        if offset % WORD_BYTES != 0 {
            return None;
        }
        Some(offset / WORD_BYTES)
            .filter(|&index| index < self.next)
            .map(ArrayRef::new)
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(layout) = Self::layout(self.capacity) {
            unsafe { std::alloc::dealloc(self.base.as_ptr() as *mut u8, layout) };
        }
    }
}

impl core::fmt::Debug for Heap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Heap")
            .field("base", &self.base)
            .field("capacity", &self.capacity)
            .field("words_consumed", &self.next)
            .finish()
    }
}
