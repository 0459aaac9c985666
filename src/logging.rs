//! Logging initialization built on `tracing`.
//!
//! The library itself only emits spans/events; subscribers are installed by
//! the binary (`init_logging`) or by the test suite (`init_test_logging`).

use crate::error::Result;
use tracing_subscriber::EnvFilter;

/// Initialize stderr logging for the CLI.
///
/// Verbosity: `-q` = errors only, default = warn, `-v` = info, `-vv` = debug,
/// `-vvv` = trace. `RUST_LOG` overrides all of these when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("doctester={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Initialize logging for tests, capturing output per test.
///
/// Safe to call from every test; subsequent calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doctester=debug")),
        )
        .with_test_writer()
        .try_init();
}
