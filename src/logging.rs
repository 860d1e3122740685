//! Logging setup
//!
//! Installs a `tracing` subscriber. The filter comes from `RUST_LOG`,
//! falling back to `info` with debug output for this crate.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,route_pause=debug";

/// Log file prefix for `init_file_logging`
pub const LOG_FILE_PREFIX: &str = "route-pause.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()?;
    Ok(())
}

/// Log to stderr and to a daily rolling JSON file in `dir`
///
/// Keep the returned guard alive; dropping it flushes and stops the writer.
pub fn init_file_logging(dir: impl AsRef<Path>) -> anyhow::Result<WorkerGuard> {
    let appender = tracing_appender::rolling::daily(dir.as_ref(), LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(fmt::layer().json().with_writer(writer))
        .try_init()?;

    Ok(guard)
}
