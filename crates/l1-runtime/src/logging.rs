//! Opt-in diagnostics for the runtime itself.
//!
//! Program output and runtime diagnostics both go to stdout, so tracing is
//! silent unless `L1_LOG` holds a filter (e.g. `L1_LOG=l1_runtime=debug`),
//! in which case events are written to stderr.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "L1_LOG";

/// Install the stderr subscriber if `L1_LOG` is set. Safe to call repeatedly.
pub fn init() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
