//! Fatal traps.
//!
//! Nothing inside generated code can recover from a runtime error, so every
//! [`RuntimeError`] that reaches the C ABI ends up here: the diagnostic is
//! written to stdout and the process exits with the error's code.

use std::io::Write;

use crate::error::RuntimeError;
use crate::heap::Heap;
use crate::value::{Word, decode_scalar};

/// Build the error for an out-of-range access reported by generated code.
///
/// `index` is only decoded for the message; generated code has already
/// decided the access is out of range. The length comes straight from the
/// header word `array` points at.
pub fn bounds_violation(heap: &Heap, array: Word, index: Word) -> RuntimeError {
    let index = decode_scalar(index);
    match heap.decode(array) {
        Ok(value) => match value.as_reference() {
            Some(array) => RuntimeError::BoundsViolation {
                index,
                len: heap.array_len(array),
            },
            None => RuntimeError::DanglingReference { word: array },
        },
        Err(err) => err,
    }
}

/// Write the diagnostic for `error` and flush. Returns the exit code to use.
pub fn report<W: Write + ?Sized>(out: &mut W, error: &RuntimeError) -> i32 {
    let code = error.exit_code();
    tracing::error!(%error, code, "terminating program");
    // Nothing is left to report a failed write to.
    let _ = writeln!(out, "{error}");
    let _ = out.flush();
    code
}

/// Report `error` on stdout and terminate the process.
pub fn abort(error: RuntimeError) -> ! {
    let code = report(&mut std::io::stdout().lock(), &error);
    std::process::exit(code)
}
