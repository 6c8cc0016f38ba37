//! Braille raster for line plots.
//!
//! Each terminal cell holds a 2×4 grid of braille dots, which makes a dot
//! roughly square on common terminal fonts. Shapes are clipped to the data
//! limits before rasterizing, so curves that run far off-screen (a
//! hyperbola's `cosh`) cost no more than visible ones.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use conics::{Point, SampleRange, Vector};

use crate::theme::{Ink, Theme};

/// First code point of the braille block.
const BRAILLE_BASE: u32 = 0x2800;

/// Bit for the dot at `[row][column]` within a cell.
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Dots drawn, then skipped, in a dashed line.
const DASH_LENGTH: usize = 3;

/// Arrow head side length in dots.
const HEAD_LENGTH: f64 = 3.5;

/// How a polyline is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Continuous.
    #[default]
    Solid,
    /// Alternating runs of dots and gaps.
    Dashed,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    bits: u8,
    ink: Option<Ink>,
    glyph: Option<(char, Ink)>,
    background: Option<char>,
}

/// A fixed-size braille drawing surface mapped onto data limits.
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    x: SampleRange,
    y: SampleRange,
}

impl Canvas {
    /// Creates an empty canvas of `cols × rows` cells showing `x × y`.
    pub fn new(cols: usize, rows: usize, x: SampleRange, y: SampleRange) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
            x,
            y,
        }
    }

    /// Width in cells.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Height in cells.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    const fn dot_width(&self) -> usize {
        self.cols * 2
    }

    const fn dot_height(&self) -> usize {
        self.rows * 4
    }

    /// Maps a data point to fractional dot coordinates (y grows downward).
    fn project(&self, p: Point) -> (f64, f64) {
        let fx = (p.x - self.x.min()) / self.x.span();
        let fy = (self.y.max() - p.y) / self.y.span();
        (
            fx * (self.dot_width() - 1) as f64,
            fy * (self.dot_height() - 1) as f64,
        )
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get_mut(row * self.cols + col)
    }

    /// Lights one dot. Dots outside the canvas are ignored.
    pub fn set_dot(&mut self, dx: i64, dy: i64, ink: Ink) {
        if dx < 0 || dy < 0 {
            return;
        }
        let (dx, dy) = (dx as usize, dy as usize);
        if let Some(cell) = self.cell_mut(dx / 2, dy / 4) {
            cell.bits |= DOT_BITS[dy % 4][dx % 2];
            cell.ink = Some(ink);
        }
    }

    fn raster(&mut self, from: (i64, i64), to: (i64, i64), ink: Ink, dash: Option<&mut usize>) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut dash = dash;

        loop {
            let visible = dash.as_deref_mut().is_none_or(|counter| {
                let on = (*counter / DASH_LENGTH) % 2 == 0;
                *counter += 1;
                on
            });
            if visible {
                self.set_dot(x0, y0, ink);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn to_dot(&self, p: Point) -> (i64, i64) {
        let (x, y) = self.project(p);
        (x.round() as i64, y.round() as i64)
    }

    /// Draws the part of segment `a → b` that lies inside the limits.
    pub fn line(&mut self, a: Point, b: Point, ink: Ink, dash: Option<&mut usize>) {
        if let Some((a, b)) = clip_segment(a, b, self.x, self.y) {
            let (from, to) = (self.to_dot(a), self.to_dot(b));
            self.raster(from, to, ink, dash);
        }
    }

    /// Draws consecutive segments through `points`.
    pub fn polyline(&mut self, points: &[Point], ink: Ink, style: LineStyle) {
        let mut counter = 0usize;
        for pair in points.windows(2) {
            let dash = match style {
                LineStyle::Solid => None,
                LineStyle::Dashed => Some(&mut counter),
            };
            self.line(pair[0], pair[1], ink, dash);
        }
    }

    /// Draws a vector from `origin` with a head at its tip.
    ///
    /// The head is only drawn when the tip is inside the limits.
    pub fn arrow(&mut self, origin: Point, vector: Vector, ink: Ink) {
        let tip = origin + vector;
        self.line(origin, tip, ink, None);

        if !(self.x.contains(tip.x) && self.y.contains(tip.y)) {
            return;
        }
        let (ox, oy) = self.project(origin);
        let (tx, ty) = self.project(tip);
        let (ux, uy) = (tx - ox, ty - oy);
        let len = ux.hypot(uy);
        if len < 1.0 {
            return;
        }
        let (ux, uy) = (ux / len, uy / len);
        let head = HEAD_LENGTH.min(len / 2.0);
        let tip_dot = (tx.round() as i64, ty.round() as i64);

        // Sides at ±150° from the shaft direction.
        let (cos, sin) = (-(3f64.sqrt()) / 2.0, 0.5);
        for s in [sin, -sin] {
            let hx = ux * cos - uy * s;
            let hy = ux * s + uy * cos;
            let end = (
                (tx + hx * head).round() as i64,
                (ty + hy * head).round() as i64,
            );
            self.raster(tip_dot, end, ink, None);
        }
    }

    /// Places a glyph on the cell containing `p`.
    pub fn marker(&mut self, p: Point, glyph: char, ink: Ink) {
        if !(p.is_finite() && self.x.contains(p.x) && self.y.contains(p.y)) {
            return;
        }
        let (dx, dy) = self.to_dot(p);
        if let Some(cell) = self.cell_mut(dx as usize / 2, dy as usize / 4) {
            cell.glyph = Some((glyph, ink));
        }
    }

    /// Draws the coordinate axes and integer grid points as background.
    ///
    /// Background glyphs only show in cells no shape has touched.
    pub fn grid(&mut self) {
        let axis_col = self
            .x
            .contains(0.0)
            .then(|| self.to_dot(Point::new(0.0, self.y.min())).0 as usize / 2);
        let axis_row = self
            .y
            .contains(0.0)
            .then(|| self.to_dot(Point::new(self.x.min(), 0.0)).1 as usize / 4);

        let cols_per_unit = self.cols as f64 / self.x.span();
        let rows_per_unit = self.rows as f64 / self.y.span();
        if cols_per_unit >= 3.0 && rows_per_unit >= 1.5 {
            let xs = integer_ticks(self.x);
            let ys = integer_ticks(self.y);
            for &gx in &xs {
                for &gy in &ys {
                    let (dx, dy) = self.to_dot(Point::new(gx, gy));
                    if let Some(cell) = self.cell_mut(dx as usize / 2, dy as usize / 4) {
                        cell.background = Some('·');
                    }
                }
            }
        }

        if let Some(row) = axis_row {
            for col in 0..self.cols {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.background = Some('─');
                }
            }
        }
        if let Some(col) = axis_col {
            for row in 0..self.rows {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.background = Some(if Some(row) == axis_row { '┼' } else { '│' });
                }
            }
        }
    }

    /// Renders the canvas, one string per cell row.
    pub fn render(&self, theme: &Theme) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| {
                let mut line = String::new();
                for cell in row {
                    if let Some((glyph, ink)) = cell.glyph {
                        line.push_str(&theme.strong(&glyph.to_string(), ink));
                    } else if cell.bits != 0 {
                        let c = char::from_u32(BRAILLE_BASE + u32::from(cell.bits)).unwrap_or(' ');
                        line.push_str(&theme.paint(&c.to_string(), cell.ink.unwrap_or(Ink::Text)));
                    } else if let Some(bg) = cell.background {
                        line.push_str(&theme.paint(&bg.to_string(), Ink::Muted));
                    } else {
                        line.push(' ');
                    }
                }
                line
            })
            .collect()
    }

    /// Number of lit dots (for tests and diagnostics).
    pub fn lit_dots(&self) -> u32 {
        self.cells.iter().map(|c| c.bits.count_ones()).sum()
    }
}

fn integer_ticks(range: SampleRange) -> Vec<f64> {
    let start = range.min().ceil() as i64;
    let end = range.max().floor() as i64;
    (start..=end).map(|v| v as f64).collect()
}

/// Clips segment `a → b` to the rectangle `x × y` (Liang–Barsky).
pub fn clip_segment(a: Point, b: Point, x: SampleRange, y: SampleRange) -> Option<(Point, Point)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }
    let d = b - a;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    let edges = [
        (-d.x, a.x - x.min()),
        (d.x, x.max() - a.x),
        (-d.y, a.y - y.min()),
        (d.y, y.max() - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}
