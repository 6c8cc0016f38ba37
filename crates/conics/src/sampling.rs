//! Sampling grids for curve parameters.

use crate::error::{ConicsError, Result};

/// Returns `n` evenly spaced values from `min` to `max`, both inclusive.
///
/// `n == 0` yields an empty grid and `n == 1` yields `[min]`. The last value
/// is exactly `max`.
///
/// # Example
///
/// ```rust
/// use conics::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| min + step * i as f64).collect();
            values[n - 1] = max;
            values
        }
    }
}

/// A validated closed interval `[min, max]` with `min < max`.
///
/// Used both as the parameter domain of a curve and as the display limits
/// of a plot.
///
/// Deserialization goes through [`SampleRange::new`], so an empty or
/// non-finite range is rejected there too.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawRange")
)]
pub struct SampleRange {
    min: f64,
    max: f64,
}

/// Unchecked bounds as they appear in serialized data.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRange> for SampleRange {
    type Error = ConicsError;

    fn try_from(raw: RawRange) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl SampleRange {
    /// Creates a range, rejecting non-finite bounds and `min >= max`.
    ///
    /// # Errors
    ///
    /// Returns [`ConicsError::NonFinite`] or [`ConicsError::EmptyRange`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use conics::SampleRange;
    ///
    /// assert!(SampleRange::new(-6.0, 6.0).is_ok());
    /// assert!(SampleRange::new(5.0, 2.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() {
            return Err(ConicsError::NonFinite { name: "range min" });
        }
        if !max.is_finite() {
            return Err(ConicsError::NonFinite { name: "range max" });
        }
        if min >= max {
            return Err(ConicsError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Builds a range from constant bounds already known to be ordered.
    pub(crate) const fn from_bounds(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower bound.
    #[inline]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Width of the interval (always positive).
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// `n` evenly spaced samples across the interval.
    pub fn samples(&self, n: usize) -> Vec<f64> {
        linspace(self.min, self.max, n)
    }
}
