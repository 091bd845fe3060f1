//! Command-line interface for the L1 runtime probe.

use clap::{Parser, Subcommand};
use l1_runtime::printer::MAX_PRINT_DEPTH;

#[derive(Parser)]
#[command(name = "l1-probe")]
#[command(about = "Drive the L1 runtime the way a compiled program would", long_about = None)]
pub struct Cli {
    /// Heap capacity in words (overrides L1_HEAP_WORDS)
    #[arg(long, global = true)]
    pub heap_words: Option<usize>,

    /// Depth at which printing is cut off (overrides L1_PRINT_DEPTH)
    #[arg(long, global = true, value_parser = parse_print_depth)]
    pub print_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a single integer
    Scalar {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Allocate an array holding the given integers and print it
    Array {
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },
    /// Print single-element arrays nested LEVELS deep around 0
    Nested { levels: usize },
    /// Print a one-element array whose slot refers to itself
    Cycle,
    /// Allocate REPEAT arrays of COUNT zeros and print the last one
    Alloc {
        #[arg(long)]
        count: i64,
        #[arg(long, default_value_t = 1)]
        repeat: usize,
    },
    /// Call the allocator with SIZE passed through unencoded
    RawAlloc {
        #[arg(allow_negative_numbers = true)]
        size: i64,
    },
    /// Index an array of LEN zeros at INDEX, tripping the bounds trap
    Bounds {
        #[arg(long)]
        len: i64,
        #[arg(long, allow_negative_numbers = true)]
        index: i64,
    },
}

fn parse_print_depth(arg: &str) -> Result<usize, String> {
    let depth: usize = arg.parse().map_err(|err| format!("{err}"))?;
    if depth > MAX_PRINT_DEPTH {
        return Err(format!("must be at most {MAX_PRINT_DEPTH}"));
    }
    Ok(depth)
}
