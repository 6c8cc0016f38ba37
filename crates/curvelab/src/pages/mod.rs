//! The three tabs of the visualizer.
//!
//! Plotting pages share a layout: a control panel on the left and the
//! figure on the right. A page handles its own keys and reports what
//! happened as an [`Outcome`].

pub mod help;
pub mod motion;
pub mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use help::HelpPage;
pub use motion::MotionPage;
pub use transform::TransformPage;

use crate::error::RenderError;
use crate::plot::{Figure, render_figure};
use crate::program::Cmd;
use crate::theme::{Ink, Theme, layout, pad_to};

/// A tab.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Curve translation and stretching.
    #[default]
    Transform,
    /// Parametric motion with velocity and acceleration.
    Motion,
    /// User guide.
    Help,
}

impl Page {
    /// Tab order.
    pub const ALL: [Self; 3] = [Self::Transform, Self::Motion, Self::Help];

    /// Tab caption.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Transform => "1) Transform Curves",
            Self::Motion => "2) Parametric Motion",
            Self::Help => "Help",
        }
    }

    /// The tab to the right, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Transform => Self::Motion,
            Self::Motion => Self::Help,
            Self::Help => Self::Transform,
        }
    }

    /// The tab to the left, wrapping around.
    pub const fn prev(self) -> Self {
        match self {
            Self::Transform => Self::Help,
            Self::Motion => Self::Transform,
            Self::Help => Self::Motion,
        }
    }
}

/// Status line of a plotting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing drawn yet.
    #[default]
    Ready,
    /// Last render succeeded.
    Rendered,
    /// Last render failed.
    Error,
    /// The motion clock is running.
    Animating,
    /// The motion clock was stopped.
    Stopped,
}

impl Status {
    const fn ink(self) -> Ink {
        match self {
            Self::Error => Ink::Error,
            Self::Rendered | Self::Animating => Ink::Ok,
            Self::Ready | Self::Stopped => Ink::Text,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ready => "Ready.",
            Self::Rendered => "Rendered.",
            Self::Error => "Error.",
            Self::Animating => "Animating...",
            Self::Stopped => "Stopped.",
        })
    }
}

/// A failed render, shown to the user until the next key press.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    /// Dialog title.
    pub title: &'static str,
    /// The error message.
    pub message: String,
}

impl Banner {
    /// Wraps a render error under a title.
    pub fn new(title: &'static str, error: &RenderError) -> Self {
        Self {
            title,
            message: error.to_string(),
        }
    }
}

/// What a page did with an input.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The key means nothing to this page.
    Ignored,
    /// State changed; nothing else to do.
    Handled,
    /// State changed and the program must run a command.
    Command(Cmd),
    /// A render failed.
    Failed(Banner),
}

impl Outcome {
    /// Maps a render result to an outcome.
    pub fn from_render(result: Result<(), RenderError>, title: &'static str) -> Self {
        match result {
            Ok(()) => Self::Handled,
            Err(err) => Self::Failed(Banner::new(title, &err)),
        }
    }
}

/// Moves a focus index by one, wrapping around `len` entries.
pub(crate) const fn cycle_focus(focus: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (focus + 1) % len
    } else {
        (focus + len - 1) % len
    }
}

/// A muted section heading inside a panel.
pub(crate) fn section(title: &str, theme: &Theme) -> String {
    pad_to(&theme.paint(title, Ink::Muted), layout::PANEL_WIDTH)
}

/// The status row of a panel.
pub(crate) fn status_row(status: Status, theme: &Theme) -> String {
    pad_to(
        &format!("Status: {}", theme.strong(&status.to_string(), status.ink())),
        layout::PANEL_WIDTH,
    )
}

/// Joins a control panel and a figure side by side into `height` lines.
pub(crate) fn split_view(
    panel: Vec<String>,
    figure: Option<&Figure>,
    width: usize,
    height: usize,
    theme: &Theme,
) -> Vec<String> {
    let plot_width = width.saturating_sub(layout::PANEL_WIDTH + 1);
    let plot = match figure {
        Some(figure) => render_figure(figure, plot_width, height, theme),
        None => {
            let mut lines = vec![pad_to(&theme.paint("(no figure yet)", Ink::Muted), plot_width)];
            lines.resize_with(height, || " ".repeat(plot_width));
            lines
        }
    };

    let mut panel = panel.into_iter();
    plot.into_iter()
        .take(height)
        .map(|right| {
            let left = panel
                .next()
                .unwrap_or_else(|| " ".repeat(layout::PANEL_WIDTH));
            format!("{} {right}", pad_to(&left, layout::PANEL_WIDTH))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::visible_width;

    #[test]
    fn page_cycle() {
        for page in Page::ALL {
            assert_eq!(page.next().prev(), page);
        }
        assert_eq!(Page::Help.next(), Page::Transform);
    }

    #[test]
    fn status_text() {
        assert_eq!(Status::Ready.to_string(), "Ready.");
        assert_eq!(Status::Animating.to_string(), "Animating...");
        assert_eq!(Status::Stopped.to_string(), "Stopped.");
    }

    #[test]
    fn focus_wraps() {
        assert_eq!(cycle_focus(0, 3, false), 2);
        assert_eq!(cycle_focus(2, 3, true), 0);
        assert_eq!(cycle_focus(0, 0, true), 0);
    }

    #[test]
    fn outcome_from_render() {
        assert_eq!(Outcome::from_render(Ok(()), "T"), Outcome::Handled);
        let err = RenderError::NotANumber {
            field: "h",
            input: "?".into(),
        };
        let Outcome::Failed(banner) = Outcome::from_render(Err(err), "T") else {
            panic!("expected failure");
        };
        assert_eq!(banner.title, "T");
        assert!(banner.message.contains("h must be a number"));
    }

    #[test]
    fn split_view_without_figure() {
        let lines = split_view(vec!["panel".into()], None, 80, 5, &Theme::plain());
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("panel"));
        assert!(lines[0].contains("(no figure yet)"));
        assert!(lines.iter().all(|l| visible_width(l) == 80));
    }
}
