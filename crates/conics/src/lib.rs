#![forbid(unsafe_code)]
// Allow these clippy lints for math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

//! # Conics
//!
//! Closed-form coordinate formulas for conic sections and parametric motion.
//!
//! Conics provides:
//! - **Curves**: parabola, ellipse and one hyperbola branch under
//!   translation `(h, k)` and stretching `(a, b)`
//! - **Motion**: position, velocity and acceleration along an ellipse or a
//!   parabola-like path, as exact analytic derivatives
//! - **Clock**: the wrapped scalar time that drives an animation
//!
//! ## Curve Example
//!
//! ```rust
//! use conics::{CurveKind, CurveParams};
//!
//! let ellipse = CurveParams::new(CurveKind::Ellipse).with_axes(3.0, 2.0);
//! let p = ellipse.point_at(0.0);
//! assert!((p.x - 3.0).abs() < 1e-12);
//! assert!(p.y.abs() < 1e-12);
//! ```
//!
//! ## Motion Example
//!
//! ```rust
//! use conics::{Clock, MotionParams, PathKind};
//!
//! let motion = MotionParams::new(PathKind::Ellipse);
//! let mut clock = Clock::new();
//! clock.start();
//!
//! for _ in 0..10 {
//!     clock.tick(0.03, motion.wrap_rule());
//! }
//!
//! let state = motion.kinematics(clock.t());
//! assert!(state.speed() > 0.0);
//! ```

mod clock;
mod curve;
mod error;
mod geom;
mod motion;
mod sampling;

pub use clock::{Clock, ClockState, DEFAULT_DT, Wrap, effective_dt, tick_interval};
pub use curve::{
    Branch, CurveKind, CurveParams, ELLIPSE_SAMPLES, HYPERBOLA_SAMPLES, HYPERBOLA_T_MAX,
    PARABOLA_SAMPLES, ellipse, hyperbola, parabola,
};
pub use error::{ConicsError, Result};
pub use geom::{Point, Vector};
pub use motion::{
    Kinematics, MotionParams, PARABOLA_T_BOUND, PATH_SAMPLES, PathKind, motion_parabola,
};
pub use sampling::{SampleRange, linspace};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clock::{Clock, ClockState, Wrap};
    pub use crate::curve::{Branch, CurveKind, CurveParams};
    pub use crate::geom::{Point, Vector};
    pub use crate::motion::{Kinematics, MotionParams, PathKind};
    pub use crate::sampling::SampleRange;
}
