//! Depth-limited rendering of tagged values.
//!
//! Scalars print as decimal integers. An array prints as `{s:<count>`
//! followed by `, <slot>` for each slot and a closing `}`. Once the
//! recursion reaches the depth limit the printer emits `...` instead of
//! descending, which also bounds output for cyclic structures.

use std::io::Write;

use crate::error::{RuntimeError, RuntimeResult};
use crate::heap::Heap;
use crate::value::{Value, Word};

/// Depth at which nested arrays are cut off.
pub const DEFAULT_PRINT_DEPTH: usize = 4;

/// Largest accepted depth limit. Rendering recurses once per level, so the
/// limit must stay well inside the stack of the thread doing the printing.
pub const MAX_PRINT_DEPTH: usize = 1024;

pub struct Printer<'h> {
    heap: &'h Heap,
    max_depth: usize,
}

impl<'h> Printer<'h> {
    /// `max_depth` is clamped to [`MAX_PRINT_DEPTH`].
    pub fn new(heap: &'h Heap, max_depth: usize) -> Self {
        Printer {
            heap,
            max_depth: max_depth.min(MAX_PRINT_DEPTH),
        }
    }

    /// Render `word` without a trailing newline.
    pub fn write_value<W: Write + ?Sized>(&self, out: &mut W, word: Word) -> RuntimeResult<()> {
        self.render(out, word, 0)
    }

    /// Render `word` into a string, mostly for tests and tooling.
    pub fn render_to_string(&self, word: Word) -> RuntimeResult<String> {
        let mut buf = Vec::new();
        self.write_value(&mut buf, word)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn render<W: Write + ?Sized>(&self, out: &mut W, word: Word, depth: usize) -> RuntimeResult<()> {
        if depth >= self.max_depth {
            write!(out, "...")?;
            return Ok(());
        }

        match self.heap.decode(word)? {
            Value::Scalar(n) => write!(out, "{n}")?,
            Value::Reference(array) => {
                let len = self.heap.array_len(array);
                write!(out, "{{s:{len}")?;
                for index in 0..usize::try_from(len).unwrap_or(0) {
                    let Some(slot) = self.heap.slot(array, index) else {
                        // Header claims more slots than the heap holds.
                        return Err(RuntimeError::DanglingReference { word });
                    };
                    write!(out, ", ")?;
                    self.render(out, slot, depth + 1)?;
                }
                write!(out, "}}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::encode_scalar;
    use insta::assert_snapshot;

    fn render(heap: &Heap, word: Word) -> String {
        Printer::new(heap, DEFAULT_PRINT_DEPTH)
            .render_to_string(word)
            .unwrap()
    }

    #[test]
    fn scalars() {
        let heap = Heap::with_capacity(4).unwrap();
        assert_snapshot!(render(&heap, encode_scalar(5)), @"5");
        assert_snapshot!(render(&heap, encode_scalar(-17)), @"-17");
        assert_snapshot!(render(&heap, encode_scalar(0)), @"0");
    }

    #[test]
    fn flat_array() {
        let mut heap = Heap::with_capacity(16).unwrap();
        let array = heap.allocate(2, encode_scalar(0)).unwrap();
        heap.set_slot(array, 0, encode_scalar(3));
        heap.set_slot(array, 1, encode_scalar(4));
        let word = heap.address_of(array);
        assert_snapshot!(render(&heap, word), @"{s:2, 3, 4}");
    }

    #[test]
    fn empty_array() {
        let mut heap = Heap::with_capacity(16).unwrap();
        let array = heap.allocate(0, encode_scalar(0)).unwrap();
        assert_snapshot!(render(&heap, heap.address_of(array)), @"{s:0}");
    }

    #[test]
    fn nested_arrays() {
        let mut heap = Heap::with_capacity(32).unwrap();
        let inner = heap.allocate(2, encode_scalar(7)).unwrap();
        let outer = heap.allocate(2, encode_scalar(1)).unwrap();
        heap.set_slot(outer, 1, heap.address_of(inner));
        assert_snapshot!(render(&heap, heap.address_of(outer)), @"{s:2, 1, {s:2, 7, 7}}");
    }

    #[test]
    fn cuts_off_at_depth_four() {
        let mut heap = Heap::with_capacity(64).unwrap();
        // Five levels of single-element arrays around a scalar.
        let mut word = encode_scalar(9);
        for _ in 0..5 {
            let array = heap.allocate(1, word).unwrap();
            word = heap.address_of(array);
        }
        assert_snapshot!(render(&heap, word), @"{s:1, {s:1, {s:1, {s:1, ...}}}}");
    }

    #[test]
    fn exactly_at_depth_limit() {
        let mut heap = Heap::with_capacity(64).unwrap();
        // Four levels: the scalar sits at depth 4 and is elided.
        let mut word = encode_scalar(9);
        for _ in 0..4 {
            let array = heap.allocate(1, word).unwrap();
            word = heap.address_of(array);
        }
        assert_snapshot!(render(&heap, word), @"{s:1, {s:1, {s:1, {s:1, ...}}}}");

        // Three levels print in full.
        let mut word = encode_scalar(9);
        for _ in 0..3 {
            let array = heap.allocate(1, word).unwrap();
            word = heap.address_of(array);
        }
        assert_snapshot!(render(&heap, word), @"{s:1, {s:1, {s:1, 9}}}");
    }

    #[test]
    fn cycle_terminates() {
        let mut heap = Heap::with_capacity(16).unwrap();
        let array = heap.allocate(1, encode_scalar(0)).unwrap();
        let word = heap.address_of(array);
        heap.set_slot(array, 0, word);
        assert_snapshot!(render(&heap, word), @"{s:1, {s:1, {s:1, {s:1, ...}}}}");
    }

    #[test]
    fn custom_depth() {
        let mut heap = Heap::with_capacity(16).unwrap();
        let inner = heap.allocate(1, encode_scalar(2)).unwrap();
        let outer = heap.allocate(1, heap.address_of(inner)).unwrap();
        let word = heap.address_of(outer);

        let shallow = Printer::new(&heap, 1).render_to_string(word).unwrap();
        assert_eq!(shallow, "{s:1, ...}");
        let none = Printer::new(&heap, 0).render_to_string(word).unwrap();
        assert_eq!(none, "...");
    }

    #[test]
    fn oversized_depth_is_clamped() {
        let mut heap = Heap::with_capacity(16).unwrap();
        let array = heap.allocate(1, encode_scalar(0)).unwrap();
        let word = heap.address_of(array);
        heap.set_slot(array, 0, word);

        let text = Printer::new(&heap, usize::MAX).render_to_string(word).unwrap();
        assert_eq!(text.matches("{s:1").count(), MAX_PRINT_DEPTH);
        assert!(text.ends_with(&format!("...{}", "}".repeat(MAX_PRINT_DEPTH))));
    }

    #[test]
    fn dangling_reference_is_an_error() {
        let heap = Heap::with_capacity(16).unwrap();
        let err = Printer::new(&heap, DEFAULT_PRINT_DEPTH)
            .render_to_string(0x1000)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::DanglingReference { word: 0x1000 }));
    }

    #[test]
    fn corrupted_header_is_an_error() {
        let mut heap = Heap::with_capacity(16).unwrap();
        let array = heap.allocate(1, encode_scalar(0)).unwrap();
        let ptr = heap.address_of(array) as usize as *mut Word;
        // Generated code scribbles over the header.
        unsafe { ptr.write(50) };
        let result = Printer::new(&heap, DEFAULT_PRINT_DEPTH).render_to_string(heap.address_of(array));
        assert!(matches!(result, Err(RuntimeError::DanglingReference { .. })));
    }
}
