//! Error type for parameter validation.

/// Errors raised when a parameter set cannot describe a curve or grid.
///
/// Degenerate geometry (zero or negative `a`/`b`) is never an error; only
/// values that make sampling impossible are rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConicsError {
    /// The lower bound of a sampling range is not below the upper bound.
    #[error("range min must be less than range max (got {min} to {max})")]
    EmptyRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },

    /// A value that must be finite was NaN or infinite.
    #[error("{name} must be a finite number")]
    NonFinite {
        /// Name of the offending value.
        name: &'static str,
    },

    /// A hyperbola branch sign other than +1 or -1.
    #[error("hyperbola branch must be +1 or -1 (got {0})")]
    InvalidBranch(i32),

    /// An unknown curve or path name.
    #[error("unknown {what}: {name:?}")]
    UnknownKind {
        /// What kind of name was being parsed.
        what: &'static str,
        /// The rejected input.
        name: String,
    },
}

/// A specialized [`Result`] type for conics operations.
pub type Result<T> = std::result::Result<T, ConicsError>;
