//! Semantic colors and text styling.
//!
//! Everything that reaches the terminal is painted through a [`Theme`] so
//! that `--no-color` and headless export produce plain text.

use crossterm::style::{Color, Stylize};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

// ============================================================================
// Layout Constants
// ============================================================================

/// Layout sizes shared by the pages.
pub mod layout {
    /// Width of the control panel on the plotting pages.
    pub const PANEL_WIDTH: usize = 34;
    /// Header height (title + tabs).
    pub const HEADER_HEIGHT: usize = 2;
    /// Footer height (key hints).
    pub const FOOTER_HEIGHT: usize = 1;
}

/// Semantic color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ink {
    /// Default foreground.
    Text,
    /// De-emphasized text, grid and reference curves.
    Muted,
    /// Titles, focus and the main curve.
    Accent,
    /// Success status.
    Ok,
    /// Errors.
    Error,
    /// The moving point.
    Marker,
    /// Velocity arrows.
    Velocity,
    /// Acceleration arrows.
    Acceleration,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color unless `NO_COLOR` is set.
    #[default]
    Auto,
    /// Always emit color.
    Always,
    /// Plain text.
    Never,
}

/// Resolved styling for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    /// A theme that emits ANSI colors.
    #[must_use]
    pub const fn colored() -> Self {
        Self { color: true }
    }

    /// A theme that emits plain text.
    #[must_use]
    pub const fn plain() -> Self {
        Self { color: false }
    }

    /// Resolves a [`ColorMode`] against the environment.
    #[must_use]
    pub fn from_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Always => Self::colored(),
            ColorMode::Never => Self::plain(),
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    Self::plain()
                } else {
                    Self::colored()
                }
            }
        }
    }

    /// Whether this theme emits escape codes.
    #[must_use]
    pub const fn uses_color(&self) -> bool {
        self.color
    }

    /// Terminal color for a token.
    #[must_use]
    pub const fn color(ink: Ink) -> Color {
        match ink {
            Ink::Text => Color::White,
            Ink::Muted => Color::DarkGrey,
            Ink::Accent => Color::Cyan,
            Ink::Ok => Color::Green,
            Ink::Error => Color::Red,
            Ink::Marker => Color::Yellow,
            Ink::Velocity => Color::Green,
            Ink::Acceleration => Color::Magenta,
        }
    }

    /// Paints `text` with a token.
    #[must_use]
    pub fn paint(&self, text: &str, ink: Ink) -> String {
        if self.color {
            text.with(Self::color(ink)).to_string()
        } else {
            text.to_string()
        }
    }

    /// Paints `text` bold with a token.
    #[must_use]
    pub fn strong(&self, text: &str, ink: Ink) -> String {
        if self.color {
            text.with(Self::color(ink)).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Paints `text` in reverse video (focus highlight).
    #[must_use]
    pub fn highlight(&self, text: &str) -> String {
        if self.color {
            text.with(Self::color(Ink::Accent)).reverse().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Display width of `text` ignoring ANSI escape sequences.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Removes CSI escape sequences.
#[must_use]
pub fn strip_ansi(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // Parameters run until a final byte in '@'..='~'.
                for next in chars.by_ref() {
                    if ('@'..='~').contains(&next) {
                        break;
                    }
                }
            }
            continue;
        }
        result.push(c);
    }
    result
}

/// Pads `text` with spaces to `width` display columns.
///
/// Text that is too wide is cut at `width` columns. Escape sequences are
/// kept, including those after the cut, so styling is still closed.
#[must_use]
pub fn pad_to(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    if visible == width {
        return text.to_string();
    }
    if visible < width {
        return format!("{text}{}", " ".repeat(width - visible));
    }

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut full = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            if let Some(open) = chars.next_if_eq(&'[') {
                out.push(open);
                for next in chars.by_ref() {
                    out.push(next);
                    if ('@'..='~').contains(&next) {
                        break;
                    }
                }
            }
            continue;
        }
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if full || used + w > width {
            full = true;
            continue;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}
