//! Input widgets for the control panels.
//!
//! A [`NumberField`] keeps the text the user typed. Arrow keys nudge the
//! value by a step and, for slider fields, clamp it to the slider range.
//! Typed text is only parsed when a page renders.

use crate::error::RenderError;
use crate::theme::{Ink, Theme, pad_to};

/// Width of the label column in a panel row.
const LABEL_WIDTH: usize = 12;

/// Width of the slider gauge.
const GAUGE_WIDTH: usize = 8;

/// Formats a value with up to three decimals and no trailing zeros.
///
/// ```rust
/// use curvelab::form::format_value;
///
/// assert_eq!(format_value(3.0), "3");
/// assert_eq!(format_value(0.25), "0.25");
/// assert_eq!(format_value(-0.0), "0");
/// ```
pub fn format_value(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

/// Inclusive slider bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    /// Lowest value reachable by nudging.
    pub min: f64,
    /// Highest value reachable by nudging.
    pub max: f64,
}

/// An editable numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    label: &'static str,
    text: String,
    step: f64,
    slider: Option<Slider>,
}

impl NumberField {
    /// A free-form entry field.
    pub fn entry(label: &'static str, value: f64, step: f64) -> Self {
        Self {
            label,
            text: format_value(value),
            step,
            slider: None,
        }
    }

    /// A field backed by a slider range.
    pub fn slider(label: &'static str, value: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            label,
            text: format_value(value),
            step,
            slider: Some(Slider { min, max }),
        }
    }

    /// Label shown in the panel and in error messages.
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Slider bounds, if any.
    pub const fn bounds(&self) -> Option<Slider> {
        self.slider
    }

    /// Parses the current text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotANumber`] when the text is not a finite
    /// number.
    pub fn value(&self) -> Result<f64, RenderError> {
        let trimmed = self.text.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(RenderError::NotANumber {
                field: self.label,
                input: self.text.clone(),
            }),
        }
    }

    /// Replaces the text with a formatted value.
    pub fn set_value(&mut self, value: f64) {
        self.text = format_value(value);
    }

    /// Moves the value by `steps` steps.
    ///
    /// Slider fields clamp to their range. Text that does not parse restarts
    /// from the slider minimum, or zero for entries. Returns true when the
    /// text changed.
    pub fn nudge(&mut self, steps: i32) -> bool {
        let current = self
            .value()
            .unwrap_or_else(|_| self.slider.map_or(0.0, |s| s.min));
        let mut next = current + self.step * f64::from(steps);
        if let Some(s) = self.slider {
            next = next.clamp(s.min, s.max);
        }
        // Snap away accumulated float noise.
        next = (next / self.step).round() * self.step;
        if let Some(s) = self.slider {
            next = next.clamp(s.min, s.max);
        }
        let before = std::mem::take(&mut self.text);
        self.set_value(next);
        before != self.text
    }

    /// Appends a character if it can be part of a number.
    pub fn push_char(&mut self, c: char) -> bool {
        if accepts(c) {
            self.text.push(c);
            true
        } else {
            false
        }
    }

    /// Deletes the last character.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// One panel row: label, text box and, for sliders, a position gauge.
    pub fn render(&self, focused: bool, theme: &Theme, width: usize) -> String {
        let text = if focused {
            format!("{}▏", self.text)
        } else {
            self.text.clone()
        };
        let gauge = self
            .slider
            .map(|s| gauge(self.value().ok(), s))
            .unwrap_or_default();
        let content = format!("{} {}", pad_to(&text, 8), theme.paint(&gauge, Ink::Muted));
        panel_row(self.label, &content, focused, theme, width)
    }
}

/// Whether `c` may appear in numeric text.
pub const fn accepts(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '-' | '+' | 'e' | 'E')
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn gauge(value: Option<f64>, slider: Slider) -> String {
    let Some(value) = value else {
        return format!("[{}]", "?".repeat(GAUGE_WIDTH));
    };
    let frac = ((value - slider.min) / (slider.max - slider.min)).clamp(0.0, 1.0);
    let pos = (frac * (GAUGE_WIDTH - 1) as f64).round() as usize;
    let bar: String = (0..GAUGE_WIDTH)
        .map(|i| if i == pos { '┃' } else { '─' })
        .collect();
    format!("[{bar}]")
}

/// Formats a labelled panel row, highlighting the label when focused.
pub fn panel_row(label: &str, content: &str, focused: bool, theme: &Theme, width: usize) -> String {
    let marker = if focused { "›" } else { " " };
    let label = pad_to(label, LABEL_WIDTH);
    let label = if focused {
        theme.highlight(&label)
    } else {
        theme.paint(&label, Ink::Text)
    };
    pad_to(&format!("{marker}{label} {content}"), width)
}

/// A panel row for an enumerated choice, cycled with left/right.
pub fn choice_row(label: &str, value: &str, focused: bool, theme: &Theme, width: usize) -> String {
    let content = if focused {
        format!("‹ {} ›", theme.paint(value, Ink::Accent))
    } else {
        format!("  {value}")
    };
    panel_row(label, &content, focused, theme, width)
}
