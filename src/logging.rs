//! Logging setup for Holocron
//!
//! CLI commands log to stderr; the TUI redirects everything to a log file
//! beside the working directory so nothing scribbles over the terminal
//! while ratatui owns it. Verbosity is controlled with `RUST_LOG`.

use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

/// Log file used while the TUI owns the terminal
pub const LOG_FILE: &str = "holocron.log";

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "holocron=debug" } else { "holocron=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize stderr logging for one-shot commands
pub fn init(verbose: bool) {
    fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize file logging for the interactive browser.
/// Falls back to no logging at all if the file cannot be opened.
pub fn init_file(verbose: bool) {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE);

    if let Ok(file) = file {
        fmt()
            .with_env_filter(env_filter(verbose))
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }
}
