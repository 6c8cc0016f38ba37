//! Parametric motion along an ellipse or a parabola-like path.
//!
//! Velocity and acceleration are the exact first and second time
//! derivatives of the position formula.
//!
//! With `θ = ωt`:
//!
//! | Path | Position | Velocity | Acceleration |
//! |---|---|---|---|
//! | Ellipse | `h + a cos θ`, `k + b sin θ` | `-aω sin θ`, `bω cos θ` | `-aω² cos θ`, `-bω² sin θ` |
//! | Parabola-like | `h + st`, `k + p(st)²` | `s`, `2ps²t` | `0`, `2ps²` |

use core::f64::consts::TAU;
use core::fmt;
use core::str::FromStr;

use crate::clock::Wrap;
use crate::curve::ellipse;
use crate::error::{ConicsError, Result};
use crate::geom::{Point, Vector};
use crate::sampling::SampleRange;

/// Samples drawn along a motion path.
pub const PATH_SAMPLES: usize = 800;

/// The parabola-like path is drawn, and its clock runs, over `[-bound, bound]`.
pub const PARABOLA_T_BOUND: f64 = 3.0;

/// Position on the parabola-like path `x = h + st`, `y = k + p(st)²`.
#[inline]
pub fn motion_parabola(t: f64, p: f64, speed: f64, h: f64, k: f64) -> Point {
    let u = speed * t;
    Point::new(h + u, k + p * u * u)
}

/// Shape of the track a point moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PathKind {
    /// Ellipse, or a circle when `a == b`.
    #[default]
    Ellipse,
    /// `y` grows with the square of `x`.
    Parabola,
}

impl PathKind {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ellipse => "Ellipse/Circle",
            Self::Parabola => "Parabola-like",
        }
    }

    /// The other path kind.
    pub const fn toggle(self) -> Self {
        match self {
            Self::Ellipse => Self::Parabola,
            Self::Parabola => Self::Ellipse,
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PathKind {
    type Err = ConicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ellipse" | "circle" | "ellipse/circle" => Ok(Self::Ellipse),
            "parabola" | "parabola-like" => Ok(Self::Parabola),
            _ => Err(ConicsError::UnknownKind {
                what: "path",
                name: s.to_string(),
            }),
        }
    }
}

/// Position, velocity and acceleration at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    /// Where the point is.
    pub position: Point,
    /// First derivative of position.
    pub velocity: Vector,
    /// Second derivative of position.
    pub acceleration: Vector,
}

impl Kinematics {
    /// Magnitude of the velocity.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// Coefficients of a motion path.
///
/// The ellipse uses `a`, `b` and `omega`; the parabola-like path uses `p`
/// and `speed`. Both share the center `(h, k)`.
///
/// # Example
///
/// ```rust
/// use conics::{MotionParams, PathKind};
///
/// let motion = MotionParams::new(PathKind::Parabola);
/// let k = motion.kinematics(1.0);
///
/// // Acceleration on the parabola-like path never changes.
/// assert_eq!(k.acceleration, motion.acceleration(-2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionParams {
    /// Path shape.
    pub kind: PathKind,
    /// Horizontal center.
    pub h: f64,
    /// Vertical center.
    pub k: f64,
    /// Horizontal radius.
    pub a: f64,
    /// Vertical radius.
    pub b: f64,
    /// Angular speed.
    pub omega: f64,
    /// Parabola curvature.
    pub p: f64,
    /// Rate at which `x` increases on the parabola-like path.
    pub speed: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::new(PathKind::default())
    }
}

impl MotionParams {
    /// Default coefficients (`a = 3`, `b = 2`, `ω = 1`, `p = 0.25`, `s = 1`).
    pub const fn new(kind: PathKind) -> Self {
        Self {
            kind,
            h: 0.0,
            k: 0.0,
            a: 3.0,
            b: 2.0,
            omega: 1.0,
            p: 0.25,
            speed: 1.0,
        }
    }

    /// Sets the center.
    pub const fn with_center(mut self, h: f64, k: f64) -> Self {
        self.h = h;
        self.k = k;
        self
    }

    /// Sets the ellipse radii and angular speed.
    pub const fn with_ellipse(mut self, a: f64, b: f64, omega: f64) -> Self {
        self.a = a;
        self.b = b;
        self.omega = omega;
        self
    }

    /// Sets the parabola curvature and speed.
    pub const fn with_parabola(mut self, p: f64, speed: f64) -> Self {
        self.p = p;
        self.speed = speed;
        self
    }

    /// Position at time `t`.
    pub fn position(&self, t: f64) -> Point {
        match self.kind {
            PathKind::Ellipse => ellipse(self.omega * t, self.a, self.b, self.h, self.k),
            PathKind::Parabola => motion_parabola(t, self.p, self.speed, self.h, self.k),
        }
    }

    /// Velocity at time `t`.
    pub fn velocity(&self, t: f64) -> Vector {
        match self.kind {
            PathKind::Ellipse => {
                let (sin, cos) = (self.omega * t).sin_cos();
                Vector::new(-self.a * self.omega * sin, self.b * self.omega * cos)
            }
            PathKind::Parabola => {
                Vector::new(self.speed, 2.0 * self.p * self.speed * self.speed * t)
            }
        }
    }

    /// Acceleration at time `t`.
    pub fn acceleration(&self, t: f64) -> Vector {
        match self.kind {
            PathKind::Ellipse => {
                let (sin, cos) = (self.omega * t).sin_cos();
                let w2 = self.omega * self.omega;
                Vector::new(-self.a * w2 * cos, -self.b * w2 * sin)
            }
            PathKind::Parabola => Vector::new(0.0, 2.0 * self.p * self.speed * self.speed),
        }
    }

    /// Position, velocity and acceleration at time `t`.
    pub fn kinematics(&self, t: f64) -> Kinematics {
        Kinematics {
            position: self.position(t),
            velocity: self.velocity(t),
            acceleration: self.acceleration(t),
        }
    }

    /// Time for one lap of the ellipse: `2π/|ω|`, or `2π` when `ω` is zero.
    pub fn period(&self) -> f64 {
        if self.omega == 0.0 {
            TAU
        } else {
            TAU / self.omega.abs()
        }
    }

    /// How the animation clock stays bounded on this path.
    pub fn wrap_rule(&self) -> Wrap {
        match self.kind {
            PathKind::Ellipse => Wrap::Period(self.period()),
            PathKind::Parabola => Wrap::Reset {
                bound: PARABOLA_T_BOUND,
                restart: -PARABOLA_T_BOUND,
            },
        }
    }

    /// The parameter interval the path is drawn over.
    pub const fn path_domain(&self) -> SampleRange {
        match self.kind {
            PathKind::Ellipse => SampleRange::from_bounds(0.0, TAU),
            PathKind::Parabola => SampleRange::from_bounds(-PARABOLA_T_BOUND, PARABOLA_T_BOUND),
        }
    }

    /// Samples the whole track.
    ///
    /// The ellipse is traced by angle, so its shape does not depend on `ω`.
    pub fn path(&self, samples: usize) -> Vec<Point> {
        let params = self.path_domain().samples(samples);
        match self.kind {
            PathKind::Ellipse => params
                .into_iter()
                .map(|theta| ellipse(theta, self.a, self.b, self.h, self.k))
                .collect(),
            PathKind::Parabola => params
                .into_iter()
                .map(|t| motion_parabola(t, self.p, self.speed, self.h, self.k))
                .collect(),
        }
    }
}
