//! L1 runtime library.
//!
//! Provides the native functions required by L1's compiled output:
//! - Heap allocation (`l1_alloc`) from a fixed-capacity bump heap
//! - Value printing (`l1_print`) with a nesting cutoff
//! - The out-of-bounds trap (`l1_arrayerr`)
//! - With the `c-main` feature, the `main` that sets up the heap and calls
//!   the generated `very_first_fn`
//!
//! Values crossing the boundary are tagged words; see [`value`].

pub mod config;
pub mod entry;
pub mod error;
pub mod ffi;
pub mod heap;
pub mod logging;
pub mod printer;
pub mod runtime;
pub mod trap;
pub mod value;

pub use config::RuntimeConfig;
pub use error::{RuntimeError, RuntimeResult};
pub use ffi::{l1_alloc, l1_arrayerr, l1_print};
pub use heap::Heap;
pub use printer::Printer;
pub use runtime::Runtime;
pub use value::{ArrayRef, Value, Word, decode_scalar, encode_scalar, is_scalar};
