//! Command-line interface for `curvelab`.
//!
//! # Examples
//!
//! ```bash
//! # Interactive visualizer, starting on the motion tab
//! curvelab --page motion
//!
//! # Log to a file while the TUI owns the terminal
//! curvelab -vv --log-file curvelab.log
//!
//! # Print one plain-text frame after 40 animation ticks
//! curvelab snapshot --page motion --ticks 40
//!
//! # Dump the transform figure as JSON
//! curvelab sample --page transform
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::pages::Page;

/// Curved motion visualizer.
///
/// Explore how translation and stretching change parabolas, ellipses and
/// hyperbolas, and watch a point move along a parametric path with its
/// velocity and acceleration vectors.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "curvelab",
    author,
    version,
    about = "Terminal visualizer for conic transformations and parametric motion"
)]
pub struct Cli {
    /// Path to a TOML config file
    ///
    /// Defaults to `curvelab/config.toml` in the platform config directory
    #[arg(long, short = 'c', env = "CURVELAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Tab to open first
    #[arg(long, short = 'p', value_enum)]
    pub page: Option<Page>,

    /// Force color output off
    ///
    /// Respects the `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Force color output on (overrides `NO_COLOR`)
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Run in the main terminal buffer
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Input polling rate in frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Initial animation time step in seconds
    #[arg(long, allow_negative_numbers = true)]
    pub dt: Option<f64>,

    /// Write logs to this file
    ///
    /// The interactive UI is silent otherwise
    #[arg(long, env = "CURVELAB_LOG")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Headless subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print one rendered frame as text
    Snapshot(SnapshotArgs),

    /// Print the figure data of a page as JSON
    Sample(SampleArgs),
}

/// Arguments for `snapshot`.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Page to render
    #[arg(long, short = 'p', value_enum)]
    pub page: Option<Page>,

    /// Animation ticks to run first (motion page)
    #[arg(long, short = 't', default_value_t = 0)]
    pub ticks: u32,

    /// Frame width in columns
    #[arg(long, default_value_t = 100)]
    pub width: u16,

    /// Frame height in rows
    #[arg(long, default_value_t = 32)]
    pub height: u16,
}

/// Arguments for `sample`.
#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    /// Page whose figure to export
    #[arg(long, short = 'p', value_enum)]
    pub page: Option<Page>,

    /// Animation ticks to run first (motion page)
    #[arg(long, short = 't', default_value_t = 0)]
    pub ticks: u32,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Whether a headless subcommand was requested.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.command.is_some()
    }

    /// Log level implied by `-v`.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Warnings and errors.
    Warn,
    /// Lifecycle events.
    Info,
    /// Renders and state changes.
    Debug,
    /// Every tick.
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
