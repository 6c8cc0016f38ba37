//! The scalar clock behind the motion animation.
//!
//! A [`Clock`] is either idle or running. Only running clocks advance; each
//! tick adds the step and then applies the path's [`Wrap`] rule so the time
//! value stays bounded forever.
//!
//! # Example
//!
//! ```rust
//! use conics::{Clock, Wrap};
//!
//! let mut clock = Clock::new();
//! assert_eq!(clock.tick(0.5, Wrap::Period(1.0)), None); // idle
//!
//! clock.start();
//! clock.tick(0.75, Wrap::Period(1.0));
//! let t = clock.tick(0.75, Wrap::Period(1.0)).unwrap();
//! assert!((t - 0.5).abs() < 1e-12);
//! ```

use std::time::Duration;

/// Step used when the configured step is not a positive number.
pub const DEFAULT_DT: f64 = 0.03;

/// Returns `dt` when it is a positive finite number, [`DEFAULT_DT`] otherwise.
#[inline]
pub fn effective_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        DEFAULT_DT
    }
}

/// Real time between two ticks: the effective step in whole milliseconds.
///
/// ```rust
/// use conics::tick_interval;
/// use std::time::Duration;
///
/// assert_eq!(tick_interval(0.03), Duration::from_millis(30));
/// assert_eq!(tick_interval(-1.0), Duration::from_millis(30));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn tick_interval(dt: f64) -> Duration {
    let millis = (1000.0 * effective_dt(dt)).floor().min(u64::MAX as f64) as u64;
    Duration::from_millis(millis.max(1))
}

/// How a running clock keeps its value bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wrap {
    /// Subtract one period once `t` exceeds it.
    Period(f64),
    /// Jump to `restart` once `t` exceeds `bound`.
    Reset {
        /// Upper bound of the clock.
        bound: f64,
        /// Value the clock restarts from.
        restart: f64,
    },
}

impl Wrap {
    /// Applies the rule to a freshly advanced time value.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Period(period) if period > 0.0 && period.is_finite() => {
                if t <= period {
                    return t;
                }
                let wrapped = t - period;
                if wrapped >= period {
                    wrapped.rem_euclid(period)
                } else {
                    wrapped
                }
            }
            Self::Period(_) => t,
            Self::Reset { bound, restart } => {
                if t > bound {
                    restart
                } else {
                    t
                }
            }
        }
    }
}

/// Whether the clock is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    /// Ticks are ignored.
    #[default]
    Idle,
    /// Ticks advance the time value.
    Running,
}

/// Wrapped animation time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    t: f64,
    state: ClockState,
}

impl Clock {
    /// An idle clock at `t = 0`.
    pub const fn new() -> Self {
        Self {
            t: 0.0,
            state: ClockState::Idle,
        }
    }

    /// Current time value.
    #[inline]
    pub const fn t(&self) -> f64 {
        self.t
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> ClockState {
        self.state
    }

    /// Whether the clock is running.
    #[inline]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running)
    }

    /// Idle → running. Returns false if the clock was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = ClockState::Running;
        true
    }

    /// Running → idle. Returns false if the clock was already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = ClockState::Idle;
        true
    }

    /// Advances a running clock by the effective step and wraps it.
    ///
    /// Returns the new time value, or `None` when idle.
    pub fn tick(&mut self, dt: f64, wrap: Wrap) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        self.t = wrap.apply(self.t + effective_dt(dt));
        Some(self.t)
    }

    /// Moves the clock back to `t = 0` without changing its state.
    pub fn reset(&mut self) {
        self.t = 0.0;
    }

    /// Places the clock at an explicit time value.
    pub fn set_t(&mut self, t: f64) {
        self.t = t;
    }
}
