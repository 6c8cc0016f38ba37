//! Figures and their terminal rendering.
//!
//! A [`Figure`] is a plain description of what to draw: limits, curves,
//! point markers and vector arrows. Pages build figures; [`render_figure`]
//! turns one into text lines of a given size.

mod canvas;

pub use canvas::{Canvas, LineStyle, clip_segment};

use conics::{Point, SampleRange, Vector};
use serde::Serialize;

use crate::theme::{Ink, Theme, pad_to, visible_width};

/// Columns reserved left of the plot for y tick labels.
const Y_LABEL_WIDTH: usize = 6;

/// Space between legend entries.
const LEGEND_GAP: &str = "   ";

/// Glyph drawn for point markers.
pub const MARKER_GLYPH: char = '●';

/// A polyline with a legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Stroke.
    pub style: LineStyle,
    /// Color token.
    pub ink: Ink,
    /// Vertices in data coordinates.
    pub points: Vec<Point>,
}

/// A single highlighted point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Legend label.
    pub label: String,
    /// Color token.
    pub ink: Ink,
    /// Location in data coordinates.
    pub at: Point,
}

/// A vector drawn from an origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrow {
    /// Legend label.
    pub label: String,
    /// Color token.
    pub ink: Ink,
    /// Tail.
    pub origin: Point,
    /// Displacement from tail to tip, already scaled for display.
    pub vector: Vector,
}

/// Everything needed to draw one plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Title above the plot.
    pub title: String,
    /// Horizontal limits.
    pub x_limits: SampleRange,
    /// Vertical limits.
    pub y_limits: SampleRange,
    /// Curves, drawn in order.
    pub series: Vec<Series>,
    /// Markers, drawn above curves.
    pub markers: Vec<Marker>,
    /// Arrows, drawn above curves and below markers.
    pub arrows: Vec<Arrow>,
}

impl Figure {
    /// Creates an empty figure.
    pub fn new(title: impl Into<String>, x_limits: SampleRange, y_limits: SampleRange) -> Self {
        Self {
            title: title.into(),
            x_limits,
            y_limits,
            series: Vec::new(),
            markers: Vec::new(),
            arrows: Vec::new(),
        }
    }

    /// Adds a curve.
    #[must_use]
    pub fn line(
        mut self,
        label: impl Into<String>,
        style: LineStyle,
        ink: Ink,
        points: Vec<Point>,
    ) -> Self {
        self.series.push(Series {
            label: label.into(),
            style,
            ink,
            points,
        });
        self
    }

    /// Adds a marker.
    #[must_use]
    pub fn marker(mut self, label: impl Into<String>, ink: Ink, at: Point) -> Self {
        self.markers.push(Marker {
            label: label.into(),
            ink,
            at,
        });
        self
    }

    /// Adds an arrow.
    #[must_use]
    pub fn arrow(
        mut self,
        label: impl Into<String>,
        ink: Ink,
        origin: Point,
        vector: Vector,
    ) -> Self {
        self.arrows.push(Arrow {
            label: label.into(),
            ink,
            origin,
            vector,
        });
        self
    }

    /// Rasterizes the plot area onto a canvas of `cols × rows` cells.
    pub fn rasterize(&self, cols: usize, rows: usize) -> Canvas {
        let mut canvas = Canvas::new(cols, rows, self.x_limits, self.y_limits);
        canvas.grid();
        for series in &self.series {
            canvas.polyline(&series.points, series.ink, series.style);
        }
        for arrow in &self.arrows {
            canvas.arrow(arrow.origin, arrow.vector, arrow.ink);
        }
        for marker in &self.markers {
            canvas.marker(marker.at, MARKER_GLYPH, marker.ink);
        }
        canvas
    }

    /// Legend entries packed into lines no wider than `width`.
    fn legend(&self, theme: &Theme, width: usize) -> Vec<String> {
        let mut entries = Vec::new();
        for s in &self.series {
            let swatch = match s.style {
                LineStyle::Solid => "━━",
                LineStyle::Dashed => "╍╍",
            };
            entries.push(format!("{} {}", theme.paint(swatch, s.ink), s.label));
        }
        for m in &self.markers {
            entries.push(format!(
                "{} {}",
                theme.strong(&MARKER_GLYPH.to_string(), m.ink),
                m.label
            ));
        }
        for a in &self.arrows {
            entries.push(format!("{} {}", theme.paint("─▶", a.ink), a.label));
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        for entry in entries {
            if current.is_empty() {
                current = entry;
            } else if visible_width(&current) + LEGEND_GAP.len() + visible_width(&entry) <= width {
                current.push_str(LEGEND_GAP);
                current.push_str(&entry);
            } else {
                lines.push(std::mem::replace(&mut current, entry));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Formats an axis value with at most two decimals and no trailing zeros.
pub fn format_tick(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

/// Chooses the largest `cols × rows` plot that fits the space and keeps one
/// data unit the same length on both axes.
///
/// A cell is two dots wide and four tall, and dots are about square.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn fit_equal_aspect(
    x: SampleRange,
    y: SampleRange,
    max_cols: usize,
    max_rows: usize,
) -> (usize, usize) {
    let ratio = x.span() / y.span();
    let rows = max_rows.max(1);
    let cols = (2.0 * rows as f64 * ratio).round().max(1.0) as usize;
    if cols <= max_cols {
        return (cols, rows);
    }
    let cols = max_cols.max(1);
    let rows = (cols as f64 / (2.0 * ratio)).round().clamp(1.0, rows as f64) as usize;
    (cols, rows)
}

/// Renders `figure` into exactly `height` lines, each `width` columns wide.
///
/// Layout, top to bottom: title, plot with y labels, x labels, legend
/// (wrapped onto as many lines as it needs).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn render_figure(figure: &Figure, width: usize, height: usize, theme: &Theme) -> Vec<String> {
    let blank = || " ".repeat(width);
    let margin = " ".repeat(Y_LABEL_WIDTH + 1);
    let max_cols = width.saturating_sub(margin.len());
    let legend = figure.legend(theme, max_cols);
    let max_rows = height.saturating_sub(2 + legend.len());

    if max_cols < 8 || max_rows < 4 {
        let mut lines = vec![pad_to(&theme.paint("(plot area too small)", Ink::Muted), width)];
        lines.resize_with(height, blank);
        lines.truncate(height);
        return lines;
    }

    let (cols, rows) = fit_equal_aspect(figure.x_limits, figure.y_limits, max_cols, max_rows);
    let canvas = figure.rasterize(cols, rows);
    let indent = (max_cols - cols) / 2;
    let mut lines = Vec::with_capacity(height);

    lines.push(centered(&theme.strong(&figure.title, Ink::Accent), width));

    let zero_row = figure.y_limits.contains(0.0).then(|| {
        let frac = figure.y_limits.max() / figure.y_limits.span();
        (frac * (rows - 1) as f64).round() as usize
    });
    for (i, row) in canvas.render(theme).into_iter().enumerate() {
        let label = if i == 0 {
            format_tick(figure.y_limits.max())
        } else if i + 1 == rows {
            format_tick(figure.y_limits.min())
        } else if Some(i) == zero_row {
            "0".to_string()
        } else {
            String::new()
        };
        let label = format!("{label:>w$}", w = Y_LABEL_WIDTH);
        lines.push(pad_to(
            &format!(
                "{}{} {}",
                " ".repeat(indent),
                theme.paint(&label, Ink::Muted),
                row
            ),
            width,
        ));
    }

    let left = format_tick(figure.x_limits.min());
    let right = format_tick(figure.x_limits.max());
    let gap = cols.saturating_sub(left.len() + right.len() + 1);
    let x_axis = format!(
        "{}{margin}{left}{}x{}{right}",
        " ".repeat(indent),
        " ".repeat(gap / 2),
        " ".repeat(gap - gap / 2),
    );
    lines.push(pad_to(&theme.paint(&x_axis, Ink::Muted), width));
    for entry in legend {
        lines.push(pad_to(&format!("{margin}{entry}"), width));
    }

    lines.resize_with(height, blank);
    lines
}

fn centered(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    if visible >= width {
        return pad_to(text, width);
    }
    let left = (width - visible) / 2;
    pad_to(&format!("{}{text}", " ".repeat(left)), width)
}
