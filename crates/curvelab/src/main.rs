#![forbid(unsafe_code)]

//! # curvelab
//!
//! ```bash
//! cargo run -p curvelab
//! cargo run -p curvelab -- snapshot --page motion --ticks 40
//! ```

use anyhow::Context;
use tracing::info;

use curvelab::app::App;
use curvelab::cli::{Cli, Command};
use curvelab::config::Config;
use curvelab::export;
use curvelab::logging::{self, LogTarget};
use curvelab::program::{Program, ProgramOptions};
use curvelab::theme::{ColorMode, Theme};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let target = match (&cli.command, &cli.log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (Some(_), None) => LogTarget::Stderr,
        (None, None) => LogTarget::Off,
    };
    logging::init(target, cli.log_level()).context("failed to open log file")?;

    let config = Config::resolve(&cli).context("invalid configuration")?;

    match &cli.command {
        Some(Command::Snapshot(args)) => {
            // Piped output stays plain unless color is forced.
            let theme = match config.ui.color {
                ColorMode::Always => Theme::colored(),
                ColorMode::Auto | ColorMode::Never => Theme::plain(),
            };
            let frame = export::snapshot(&config, args, theme).context("snapshot failed")?;
            println!("{frame}");
        }
        Some(Command::Sample(args)) => {
            let json = export::sample_json(&config, args).context("sample failed")?;
            println!("{json}");
        }
        None => {
            let app = App::new(&config, Theme::from_mode(config.ui.color));
            let options = ProgramOptions {
                alt_screen: config.ui.alt_screen,
                fps: config.ui.fps,
            };
            Program::new(app).with_options(options).run()?;
            info!("visualizer closed");
        }
    }

    Ok(())
}
