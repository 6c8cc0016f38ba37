//! Headless rendering for the `snapshot` and `sample` subcommands.
//!
//! Both drive the same [`App`] through a [`Simulator`], so what they print
//! is exactly what the interactive UI would show after the same input.

use conics::{Point, Vector};
use serde::Serialize;
use tracing::debug;

use crate::app::App;
use crate::cli::{SampleArgs, SnapshotArgs};
use crate::config::Config;
use crate::key::Key;
use crate::pages::Page;
use crate::plot::Figure;
use crate::program::{Msg, Simulator};
use crate::theme::Theme;

/// Errors from headless export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A render failed.
    #[error("{title}: {message}")]
    Render {
        /// Banner title.
        title: &'static str,
        /// Error message.
        message: String,
    },

    /// The page does not draw a figure.
    #[error("the {0:?} page has no figure to sample")]
    NoFigure(Page),

    /// JSON encoding failed.
    #[error("failed to encode sample: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinematics at the sampled instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionSample {
    /// Animation time.
    pub t: f64,
    /// Length of the velocity.
    pub speed: f64,
    /// The panel readout.
    pub readout: String,
    /// Point position.
    pub position: Point,
    /// Unscaled velocity.
    pub velocity: Vector,
    /// Unscaled acceleration.
    pub acceleration: Vector,
}

/// JSON document printed by `sample`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Sampled page.
    pub page: Page,
    /// The figure as drawn.
    pub figure: Figure,
    /// Present for the motion page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionSample>,
}

fn simulate(
    config: &Config,
    page: Page,
    ticks: u32,
    theme: Theme,
) -> Result<Simulator<App>, ExportError> {
    let mut app = App::new(config, theme);
    app.set_page(page);
    let mut sim = Simulator::new(app);
    sim.init();
    check(&sim)?;

    if ticks > 0 {
        if page == Page::Motion {
            // Starting advances once; the remaining ticks follow.
            sim.press(Key::Char('s'));
            for _ in 1..ticks {
                if !sim.fire_tick() {
                    break;
                }
            }
            check(&sim)?;
        } else {
            debug!(?page, ticks, "ticks only apply to the motion page");
        }
    }
    Ok(sim)
}

fn check(sim: &Simulator<App>) -> Result<(), ExportError> {
    match sim.model().banner() {
        Some(banner) => Err(ExportError::Render {
            title: banner.title,
            message: banner.message.clone(),
        }),
        None => Ok(()),
    }
}

/// Renders one frame.
///
/// # Errors
///
/// Fails when the configured values cannot be rendered.
pub fn snapshot(config: &Config, args: &SnapshotArgs, theme: Theme) -> Result<String, ExportError> {
    let page = args.page.unwrap_or(config.ui.page);
    let mut sim = simulate(config, page, args.ticks, theme)?;
    sim.send(Msg::Resize {
        width: args.width,
        height: args.height,
    });
    let frame = sim.view();
    debug!(?page, width = args.width, height = args.height, "snapshot rendered");
    Ok(frame)
}

/// Collects the figure data of a plotting page.
///
/// # Errors
///
/// Fails for the help page or when the configured values cannot be rendered.
pub fn sample(config: &Config, page: Page, ticks: u32) -> Result<Sample, ExportError> {
    let sim = simulate(config, page, ticks, Theme::plain())?;
    let app = sim.model();
    match page {
        Page::Transform => {
            let figure = app.transform().figure().cloned().ok_or(ExportError::NoFigure(page))?;
            Ok(Sample {
                page,
                figure,
                motion: None,
            })
        }
        Page::Motion => {
            let motion = app.motion();
            let figure = motion.figure().cloned().ok_or(ExportError::NoFigure(page))?;
            let k = motion.kinematics().ok_or(ExportError::NoFigure(page))?;
            Ok(Sample {
                page,
                figure,
                motion: Some(MotionSample {
                    t: motion.t(),
                    speed: k.speed(),
                    readout: motion.readout(),
                    position: k.position,
                    velocity: k.velocity,
                    acceleration: k.acceleration,
                }),
            })
        }
        Page::Help => Err(ExportError::NoFigure(page)),
    }
}

/// Encodes a sample for `sample`.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if encoding fails.
pub fn sample_json(config: &Config, args: &SampleArgs) -> Result<String, ExportError> {
    let page = args.page.unwrap_or(config.ui.page);
    let sample = sample(config, page, args.ticks)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&sample)?
    } else {
        serde_json::to_string(&sample)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_args(page: Page, ticks: u32) -> SnapshotArgs {
        SnapshotArgs {
            page: Some(page),
            ticks,
            width: 100,
            height: 32,
        }
    }

    #[test]
    fn snapshot_is_plain_and_sized() {
        let frame = snapshot(&Config::default(), &snapshot_args(Page::Transform, 0), Theme::plain())
            .unwrap();
        assert!(!frame.contains('\x1b'));
        assert_eq!(frame.lines().count(), 32);
        assert!(frame.contains("Curve Transformations (Translation + Stretching)"));
        assert!(frame.contains("Status: Rendered."));
    }

    #[test]
    fn snapshot_after_ticks_shows_time() {
        let frame = snapshot(&Config::default(), &snapshot_args(Page::Motion, 10), Theme::plain())
            .unwrap();
        assert!(frame.contains("t=0.30"), "{frame}");
        assert!(frame.contains("Animating..."));
    }

    #[test]
    fn sample_transform_limits_follow_range() {
        let mut config = Config::default();
        config.transform.range_min = -8.0;
        config.transform.range_max = 8.0;
        let sample = sample(&config, Page::Transform, 0).unwrap();
        assert_eq!(sample.figure.x_limits.min(), -8.0);
        assert_eq!(sample.figure.y_limits.max(), 8.0);
        assert!(sample.motion.is_none());
    }

    #[test]
    fn sample_motion_reports_kinematics() {
        let sample = sample(&Config::default(), Page::Motion, 0).unwrap();
        let motion = sample.motion.unwrap();
        assert_eq!(motion.t, 0.0);
        assert_eq!(motion.readout, "t=0.00   speed=2.000");
        assert_eq!(motion.position, Point::new(3.0, 0.0));
    }

    #[test]
    fn help_has_no_sample() {
        let err = sample(&Config::default(), Page::Help, 0).unwrap_err();
        assert!(matches!(err, ExportError::NoFigure(Page::Help)));
    }

    #[test]
    fn json_omits_motion_for_transform() {
        let args = SampleArgs {
            page: Some(Page::Transform),
            ticks: 0,
            pretty: false,
        };
        let json: serde_json::Value =
            serde_json::from_str(&sample_json(&Config::default(), &args).unwrap()).unwrap();
        assert_eq!(json["page"], "transform");
        assert!(json.get("motion").is_none());
        assert_eq!(json["figure"]["series"][1]["label"], "transformed");
    }
}
