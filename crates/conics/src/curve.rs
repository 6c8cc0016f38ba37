//! Conic-section parametrizations under translation and stretching.
//!
//! | Curve | Parametrization |
//! |---|---|
//! | Parabola | `x = t`, `y = a(t-h)² + k` |
//! | Ellipse | `x = h + a cos θ`, `y = k + b sin θ` |
//! | Hyperbola | `x = h + branch·a cosh t`, `y = k + b sinh t` |
//!
//! Non-positive `a` or `b` flips or collapses the curve; that is a valid
//! geometric outcome, not an error.

use core::f64::consts::TAU;
use core::fmt;
use core::str::FromStr;

use crate::error::{ConicsError, Result};
use crate::geom::Point;
use crate::sampling::SampleRange;

/// Samples drawn across the view range for a parabola.
pub const PARABOLA_SAMPLES: usize = 600;

/// Samples drawn across `θ ∈ [0, 2π]` for an ellipse.
pub const ELLIPSE_SAMPLES: usize = 600;

/// Samples drawn across `t ∈ [0, HYPERBOLA_T_MAX]` for a hyperbola branch.
pub const HYPERBOLA_SAMPLES: usize = 500;

/// Upper bound of the hyperbola parameter; `cosh` grows fast past it.
pub const HYPERBOLA_T_MAX: f64 = 2.2;

/// Parabola `y = a(x - h)² + k`, parametrized by `x = t`.
#[inline]
pub fn parabola(t: f64, a: f64, h: f64, k: f64) -> Point {
    let d = t - h;
    Point::new(t, a * d * d + k)
}

/// Ellipse `(x-h)²/a² + (y-k)²/b² = 1` at angle `theta`.
///
/// ```rust
/// use conics::ellipse;
/// use std::f64::consts::FRAC_PI_2;
///
/// let top = ellipse(FRAC_PI_2, 3.0, 2.0, 0.0, 0.0);
/// assert!(top.x.abs() < 1e-12);
/// assert!((top.y - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn ellipse(theta: f64, a: f64, b: f64, h: f64, k: f64) -> Point {
    let (sin, cos) = theta.sin_cos();
    Point::new(h + a * cos, k + b * sin)
}

/// One branch of the hyperbola `(x-h)²/a² - (y-k)²/b² = 1`.
#[inline]
pub fn hyperbola(t: f64, a: f64, b: f64, h: f64, k: f64, branch: Branch) -> Point {
    Point::new(h + branch.sign() * a * t.cosh(), k + b * t.sinh())
}

/// The family of curve drawn on the transform page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CurveKind {
    /// `y = a(x-h)² + k`.
    Parabola,
    /// Axis-aligned ellipse.
    #[default]
    Ellipse,
    /// One branch of an axis-aligned hyperbola.
    Hyperbola,
}

impl CurveKind {
    /// All kinds in selector order.
    pub const ALL: [CurveKind; 3] = [Self::Parabola, Self::Ellipse, Self::Hyperbola];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parabola => "Parabola",
            Self::Ellipse => "Ellipse",
            Self::Hyperbola => "Hyperbola",
        }
    }

    /// The next kind in selector order, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Parabola => Self::Ellipse,
            Self::Ellipse => Self::Hyperbola,
            Self::Hyperbola => Self::Parabola,
        }
    }

    /// The previous kind in selector order, wrapping around.
    pub const fn prev(self) -> Self {
        match self {
            Self::Parabola => Self::Hyperbola,
            Self::Ellipse => Self::Parabola,
            Self::Hyperbola => Self::Ellipse,
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveKind {
    type Err = ConicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parabola" => Ok(Self::Parabola),
            "ellipse" => Ok(Self::Ellipse),
            "hyperbola" => Ok(Self::Hyperbola),
            _ => Err(ConicsError::UnknownKind {
                what: "curve",
                name: s.to_string(),
            }),
        }
    }
}

/// Which connected half of a hyperbola to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Branch {
    /// `x ≥ h + a`.
    #[default]
    Right,
    /// `x ≤ h - a`.
    Left,
}

impl Branch {
    /// `+1.0` for the right branch, `-1.0` for the left.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    /// The other branch.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }

    /// Selector label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Right => "Right (+)",
            Self::Left => "Left (-)",
        }
    }
}

impl TryFrom<i32> for Branch {
    type Error = ConicsError;

    fn try_from(sign: i32) -> Result<Self> {
        match sign {
            1 => Ok(Self::Right),
            -1 => Ok(Self::Left),
            other => Err(ConicsError::InvalidBranch(other)),
        }
    }
}

impl FromStr for Branch {
    type Err = ConicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" | "+" | "+1" | "1" => Ok(Self::Right),
            "left" | "-" | "-1" => Ok(Self::Left),
            _ => Err(ConicsError::UnknownKind {
                what: "branch",
                name: s.to_string(),
            }),
        }
    }
}

/// Shape coefficients and placement for one curve.
///
/// For a parabola only `a` is used; `b` and `branch` are ignored.
///
/// # Example
///
/// ```rust
/// use conics::{Branch, CurveKind, CurveParams};
///
/// let right = CurveParams::new(CurveKind::Hyperbola)
///     .with_axes(2.0, 1.0)
///     .with_center(2.0, 0.0)
///     .with_branch(Branch::Right);
///
/// // The vertex of the right branch sits at (h + a, k).
/// let vertex = right.point_at(0.0);
/// assert_eq!(vertex.x, 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveParams {
    /// Which conic to draw.
    pub kind: CurveKind,
    /// Horizontal stretch (or parabola steepness).
    pub a: f64,
    /// Vertical stretch.
    pub b: f64,
    /// Horizontal shift.
    pub h: f64,
    /// Vertical shift.
    pub k: f64,
    /// Hyperbola branch.
    pub branch: Branch,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self::new(CurveKind::default())
    }
}

impl CurveParams {
    /// Default coefficients (`a = 3`, `b = 2`, centered, right branch).
    pub const fn new(kind: CurveKind) -> Self {
        Self {
            kind,
            a: 3.0,
            b: 2.0,
            h: 0.0,
            k: 0.0,
            branch: Branch::Right,
        }
    }

    /// Sets the stretch coefficients.
    pub const fn with_axes(mut self, a: f64, b: f64) -> Self {
        self.a = a;
        self.b = b;
        self
    }

    /// Sets the translation.
    pub const fn with_center(mut self, h: f64, k: f64) -> Self {
        self.h = h;
        self.k = k;
        self
    }

    /// Sets the hyperbola branch.
    pub const fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = branch;
        self
    }

    /// The same shape without translation.
    pub const fn centered(self) -> Self {
        self.with_center(0.0, 0.0)
    }

    /// Evaluates the curve at one parameter value.
    pub fn point_at(&self, t: f64) -> Point {
        match self.kind {
            CurveKind::Parabola => parabola(t, self.a, self.h, self.k),
            CurveKind::Ellipse => ellipse(t, self.a, self.b, self.h, self.k),
            CurveKind::Hyperbola => hyperbola(t, self.a, self.b, self.h, self.k, self.branch),
        }
    }

    /// Evaluates the curve at every parameter value, preserving order.
    pub fn trace(&self, ts: &[f64]) -> Vec<Point> {
        ts.iter().map(|&t| self.point_at(t)).collect()
    }

    /// The parameter interval and sample count used to draw this curve.
    ///
    /// A parabola is parametrized by `x`, so it is sampled across the view
    /// range; the other curves have fixed parameter domains.
    pub fn parameter_domain(&self, view: SampleRange) -> (SampleRange, usize) {
        match self.kind {
            CurveKind::Parabola => (view, PARABOLA_SAMPLES),
            CurveKind::Ellipse => (full_turn(), ELLIPSE_SAMPLES),
            CurveKind::Hyperbola => (hyperbola_domain(), HYPERBOLA_SAMPLES),
        }
    }

    /// Samples the curve across its parameter domain.
    pub fn sample(&self, view: SampleRange) -> Vec<Point> {
        let (domain, n) = self.parameter_domain(view);
        self.trace(&domain.samples(n))
    }
}

const fn full_turn() -> SampleRange {
    SampleRange::from_bounds(0.0, TAU)
}

const fn hyperbola_domain() -> SampleRange {
    SampleRange::from_bounds(0.0, HYPERBOLA_T_MAX)
}
