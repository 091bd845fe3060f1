//! Runtime call sequences standing in for generated code.
//!
//! Arrays are built the way compiled L1 code builds them: allocate with a
//! fill value, then store into slots through the returned address.

use l1_runtime::{Word, encode_scalar, l1_alloc, l1_arrayerr, l1_print};

use crate::cli::Command;

pub fn run(command: Command) {
    match command {
        Command::Scalar { value } => {
            l1_print(encode_scalar(value));
        }
        Command::Array { values } => {
            let array = new_array(values.len() as i64, encode_scalar(0));
            for (i, value) in values.into_iter().enumerate() {
                store(array, i, encode_scalar(value));
            }
            l1_print(array);
        }
        Command::Nested { levels } => {
            let mut value = encode_scalar(0);
            for _ in 0..levels {
                value = new_array(1, value);
            }
            l1_print(value);
        }
        Command::Cycle => {
            let array = new_array(1, encode_scalar(0));
            store(array, 0, array);
            l1_print(array);
        }
        Command::Alloc { count, repeat } => {
            let mut last = None;
            for _ in 0..repeat {
                last = Some(new_array(count, encode_scalar(0)));
            }
            if let Some(array) = last {
                l1_print(array);
            }
        }
        Command::RawAlloc { size } => {
            let array = l1_alloc(size, encode_scalar(0));
            l1_print(array);
        }
        Command::Bounds { len, index } => {
            let array = new_array(len, encode_scalar(0));
            tracing::debug!(len, index, "indexing out of range");
            l1_arrayerr(array as usize as *const Word, encode_scalar(index));
        }
    }
}

fn new_array(len: i64, fill: Word) -> Word {
    l1_alloc(encode_scalar(len), fill)
}

/// Store into slot `index`, as generated code does after its own range check.
fn store(array: Word, index: usize, value: Word) {
    let slots = (array as usize as *mut Word).wrapping_add(1);
    // SAFETY: `array` came from `l1_alloc` with more than `index` slots.
    unsafe { slots.add(index).write(value) }
}
