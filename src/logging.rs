//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the conversation. `RUST_LOG`
//! takes precedence over the built-in filters.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const QUIET_FILTER: &str = "product_assistant=warn,product_assistant_core=warn,warn";
const VERBOSE_FILTER: &str = "product_assistant=debug,product_assistant_core=debug,warn";

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        QUIET_FILTER
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
