// src/logging.rs

//! Logging setup for `holdgate` using `tracing` + `tracing-subscriber`.
//!
//! The log level comes from the `HOLDGATE_LOG` environment variable
//! (e.g. "info", "debug") and defaults to `info`. Logs go to STDERR so an
//! embedding application can keep stdout for its own output.

use anyhow::Result;
use tracing_subscriber::fmt;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup. Embedding applications that install their
/// own subscriber should skip this.
pub fn init_logging() -> Result<()> {
    let level = std::env::var("HOLDGATE_LOG")
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(tracing::Level::INFO);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
