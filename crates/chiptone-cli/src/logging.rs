//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for
//! command output so `--json` stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `-v` is given.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter directive for a `-v` count. Explicit verbosity wins over
/// `RUST_LOG`; without it the environment is honored.
pub fn filter_directive(verbosity: u8, env: Option<&str>) -> String {
    match verbosity {
        0 => env
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Installs the global stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(verbosity, env.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
