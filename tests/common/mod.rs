//! Common test utilities for e2e tests.

use std::process::{Command, Output};

/// Run `l1-probe` with `args` and a clean runtime environment.
pub fn run_probe(args: &[&str]) -> Output {
    run_probe_with_env(args, &[])
}

/// Run `l1-probe` with `args` and extra environment variables.
pub fn run_probe_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_l1-probe"));
    command
        .args(args)
        .env_remove("L1_HEAP_WORDS")
        .env_remove("L1_PRINT_DEPTH")
        .env_remove("L1_LOG");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("Failed to execute l1-probe")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Exit status of the failure paths: `exit(-1)` surfaces as 255.
#[allow(dead_code)]
pub fn assert_failed(output: &Output) {
    assert!(
        !output.status.success(),
        "expected failure, got {:?}\nstdout: {}",
        output.status,
        stdout(output)
    );
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));
}

#[allow(dead_code)]
pub fn assert_succeeded(output: &Output) {
    assert!(
        output.status.success(),
        "l1-probe exited with non-zero status: {:?}\nstdout: {}\nstderr: {}",
        output.status,
        stdout(output),
        String::from_utf8_lossy(&output.stderr)
    );
}
