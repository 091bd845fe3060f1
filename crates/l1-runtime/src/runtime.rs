//! The runtime context behind the C ABI.
//!
//! A [`Runtime`] owns one heap and the stream that program output and
//! diagnostics are written to. Operations return [`RuntimeResult`]; deciding
//! whether an error terminates the process is left to the caller.

use std::io::Write;

use crate::config::RuntimeConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::heap::Heap;
use crate::printer::Printer;
use crate::trap;
use crate::value::{Word, decode_scalar, is_scalar};

pub struct Runtime<W: Write> {
    heap: Heap,
    out: W,
    print_depth: usize,
}

impl<W: Write> Runtime<W> {
    pub fn with_output(config: &RuntimeConfig, out: W) -> RuntimeResult<Self> {
        Ok(Runtime {
            heap: Heap::with_capacity(config.heap_words)?,
            out,
            print_depth: config.print_depth,
        })
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Allocate an array for generated code.
    ///
    /// `size` should be a scalar word. An untagged size is reported on the
    /// output stream and then shifted like a scalar all the same.
    pub fn alloc(&mut self, size: Word, fill: Word) -> RuntimeResult<Word> {
        if !is_scalar(size) {
            tracing::warn!(size, "allocation size is not an encoded integer");
            writeln!(
                self.out,
                "allocate called with size input that was not an encoded integer, {size}"
            )?;
        }

        let array = self.heap.allocate(decode_scalar(size), fill)?;
        Ok(self.heap.address_of(array))
    }

    /// Print `value` followed by a newline.
    pub fn print(&mut self, value: Word) -> RuntimeResult<()> {
        Printer::new(&self.heap, self.print_depth).write_value(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// The error describing an out-of-range access on `array`.
    pub fn bounds_violation(&self, array: Word, index: Word) -> RuntimeError {
        trap::bounds_violation(&self.heap, array, index)
    }

    /// Write the diagnostic for `error` to this runtime's output and return
    /// the exit code the process should use.
    pub fn report(&mut self, error: &RuntimeError) -> i32 {
        trap::report(&mut self.out, error)
    }

    pub fn flush(&mut self) -> RuntimeResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for Runtime<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("heap", &self.heap)
            .field("print_depth", &self.print_depth)
            .finish_non_exhaustive()
    }
}
