//! Error types for the L1 runtime

use derive_more::{Display, From};

use crate::value::Word;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Exit code for every fatal condition except the bounds trap.
pub const FAILURE_EXIT: i32 = -1;

/// Exit code used by the bounds trap.
pub const BOUNDS_EXIT: i32 = 0;

/// Every condition that ends an L1 program early.
///
/// The display text is the diagnostic line written to standard output when
/// the program is terminated, so generated-program test suites can match it.
#[derive(Display, Debug, From)]
pub enum RuntimeError {
    #[display("malloc failed")]
    HostAllocation { words: usize },

    #[display("allocate called with size of {count}")]
    NegativeSize { count: i64 },

    #[display("out of memory")]
    HeapExhausted {
        requested: usize,
        consumed: usize,
        capacity: usize,
    },

    #[display("attempted to use position {index} in an array that only has {len} positions")]
    BoundsViolation { index: i64, len: i64 },

    #[display("value {word:#x} does not refer to an array in the heap")]
    DanglingReference { word: Word },

    #[display("invalid value {value:?} for {var}")]
    InvalidConfig { var: &'static str, value: String },

    #[display("output error: {_0}")]
    #[from]
    Io(std::io::Error),
}

impl RuntimeError {
    /// Process exit code for this error.
    ///
    /// The bounds trap exits with 0 while everything else fails with -1;
    /// existing L1 test suites depend on that split.
    pub fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::BoundsViolation { .. } => BOUNDS_EXIT,
            _ => FAILURE_EXIT,
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Io(e) => Some(e),
            _ => None,
        }
    }
}
