//! L1 runtime probe.
//!
//! Plays the part of a compiled L1 program: every command issues the same
//! calls through the runtime's C ABI that generated code would, under the
//! same entry point, so the process output and exit status match what a real
//! program would produce.
//!
//! # Usage
//!
//! ```bash
//! l1-probe array 3 4              # {s:2, 3, 4}
//! l1-probe --heap-words 64 alloc --count 10 --repeat 10   # out of memory
//! l1-probe bounds --len 3 --index 7
//! ```

mod cli;
mod program;

use clap::Parser;
use cli::Cli;
use l1_runtime::{RuntimeConfig, entry, trap};

fn main() {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env().unwrap_or_else(|err| trap::abort(err));
    if let Some(words) = cli.heap_words {
        config.heap_words = words;
    }
    if let Some(depth) = cli.print_depth {
        config.print_depth = depth;
    }

    entry::run(config, || program::run(cli.command))
}
