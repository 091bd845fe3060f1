//! C ABI called by generated code.
//!
//! Generated code cannot pass a context pointer, so the entry points share a
//! single process-wide [`Runtime`]. It is normally installed by
//! [`crate::entry::run`]; if generated code calls in first, a runtime is
//! built from the environment on demand.
//!
//! Any error that reaches this layer is fatal: it is reported on the
//! runtime's output and the process exits.

use std::convert::Infallible;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::config::RuntimeConfig;
use crate::error::RuntimeResult;
use crate::runtime::Runtime;
use crate::trap;
use crate::value::Word;

/// Output stream of the process-wide runtime.
pub type Output = Box<dyn Write + Send>;

pub type GlobalRuntime = Runtime<Output>;

/// Returned by `l1_print`.
pub const PRINT_OK: Word = 1;

static RUNTIME: Mutex<Option<GlobalRuntime>> = Mutex::new(None);

/// A runtime writing to stdout, as used by generated programs.
pub fn stdout_runtime(config: &RuntimeConfig) -> RuntimeResult<GlobalRuntime> {
    Runtime::with_output(config, Box::new(std::io::stdout()) as Output)
}

/// Make `runtime` the one the C ABI uses, returning the previous one.
pub fn install(runtime: GlobalRuntime) -> Option<GlobalRuntime> {
    RUNTIME
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(runtime)
}

/// Remove the process-wide runtime.
pub fn uninstall() -> Option<GlobalRuntime> {
    RUNTIME.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// Run `f` against the process-wide runtime, terminating the process if it
/// fails.
pub fn with_runtime<T>(f: impl FnOnce(&mut GlobalRuntime) -> RuntimeResult<T>) -> T {
    let mut slot = RUNTIME.lock().unwrap_or_else(PoisonError::into_inner);
    let runtime = slot.get_or_insert_with(|| {
        RuntimeConfig::from_env()
            .and_then(|config| stdout_runtime(&config))
            .unwrap_or_else(|err| trap::abort(err))
    });

    match f(&mut *runtime) {
        Ok(value) => value,
        Err(err) => {
            let code = runtime.report(&err);
            std::process::exit(code)
        }
    }
}

/// Allocate an array of `size` slots (a scalar word) filled with `fill`.
#[unsafe(no_mangle)]
pub extern "C" fn l1_alloc(size: Word, fill: Word) -> Word {
    with_runtime(|runtime| runtime.alloc(size, fill))
}

/// Print a value followed by a newline.
#[unsafe(no_mangle)]
pub extern "C" fn l1_print(value: Word) -> Word {
    with_runtime(|runtime| runtime.print(value));
    PRINT_OK
}

/// Report an out-of-range `index` (a scalar word) into `array` and exit.
///
/// The pointer is only compared against the heap bounds before its header
/// is read, so a stray pointer is reported rather than dereferenced.
#[unsafe(no_mangle)]
pub extern "C" fn l1_arrayerr(array: *const Word, index: Word) -> ! {
    match with_runtime::<Infallible>(|runtime| {
        Err(runtime.bounds_violation(array as usize as Word, index))
    }) {}
}
