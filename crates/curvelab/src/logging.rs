//! Tracing setup.
//!
//! The interactive UI owns the terminal, so it only logs when a log file is
//! given. Headless subcommands log to stderr and keep stdout for output.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Where log events go.
#[derive(Debug)]
pub enum LogTarget<'a> {
    /// Discard everything.
    Off,
    /// Standard error.
    Stderr,
    /// Append to a file.
    File(&'a Path),
}

/// Builds the filter: `RUST_LOG` when set, otherwise the `-v` level.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error when the log file cannot be opened.
pub fn init(target: LogTarget<'_>, level: LogLevel) -> std::io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(level));
    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    // A subscriber may already be installed (tests); keep it.
    if let Err(err) = installed {
        tracing::debug!(%err, "global subscriber already set");
    }
    Ok(())
}

fn open_log(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
