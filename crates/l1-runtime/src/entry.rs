//! Process entry.
//!
//! A generated program is linked against this library's staticlib built with
//! the `c-main` feature, which supplies `main`: it reserves the heap and then
//! calls the program's `very_first_fn`. Rust hosts (the probe binary, tests)
//! call [`run`] with their own program instead.

use crate::config::RuntimeConfig;
use crate::{ffi, logging, trap};

/// Set up the heap described by `config`, run `program`, and exit.
///
/// Errors raised while the program runs terminate the process from inside
/// the runtime call that raised them; if `program` returns, output is flushed
/// and the process exits with status 0.
pub fn run(config: RuntimeConfig, program: impl FnOnce()) -> ! {
    logging::init();

    let runtime = ffi::stdout_runtime(&config).unwrap_or_else(|err| trap::abort(err));
    tracing::info!(
        heap_words = config.heap_words,
        print_depth = config.print_depth,
        "heap ready"
    );
    ffi::install(runtime);

    program();

    ffi::with_runtime(|runtime| runtime.flush());
    std::process::exit(0)
}

#[cfg(feature = "c-main")]
mod c_main {
    use core::ffi::{c_char, c_int};

    use crate::config::RuntimeConfig;
    use crate::trap;

    unsafe extern "C" {
        /// Entry point of the generated program.
        fn very_first_fn();
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn main(_argc: c_int, _argv: *const *const c_char) -> c_int {
        let config = RuntimeConfig::from_env().unwrap_or_else(|err| trap::abort(err));
        super::run(config, || unsafe { very_first_fn() })
    }
}
