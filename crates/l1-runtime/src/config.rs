//! Runtime configuration.
//!
//! Generated programs take no arguments meant for the runtime, so overrides
//! come from the environment:
//!
//! - `L1_HEAP_WORDS`: heap capacity in words
//! - `L1_PRINT_DEPTH`: nesting depth at which printing is cut off, at most
//!   [`MAX_PRINT_DEPTH`]

use std::str::FromStr;

use crate::error::{RuntimeError, RuntimeResult};
use crate::heap::DEFAULT_HEAP_WORDS;
use crate::printer::{DEFAULT_PRINT_DEPTH, MAX_PRINT_DEPTH};

pub const HEAP_WORDS_ENV: &str = "L1_HEAP_WORDS";
pub const PRINT_DEPTH_ENV: &str = "L1_PRINT_DEPTH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Heap capacity in words, fixed for the life of the program.
    pub heap_words: usize,
    /// Depth at which the printer emits `...`.
    pub print_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            heap_words: DEFAULT_HEAP_WORDS,
            print_depth: DEFAULT_PRINT_DEPTH,
        }
    }
}

impl RuntimeConfig {
    /// Defaults with any environment overrides applied.
    pub fn from_env() -> RuntimeResult<Self> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> RuntimeResult<Self> {
        if let Some(words) = parse_var(&lookup, HEAP_WORDS_ENV)? {
            self.heap_words = words;
        }
        if let Some(depth) = parse_var::<usize>(&lookup, PRINT_DEPTH_ENV)? {
            if depth > MAX_PRINT_DEPTH {
                return Err(RuntimeError::InvalidConfig {
                    var: PRINT_DEPTH_ENV,
                    value: depth.to_string(),
                });
            }
            self.print_depth = depth;
        }
        Ok(self)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> RuntimeResult<Option<T>> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| RuntimeError::InvalidConfig { var, value })
}
