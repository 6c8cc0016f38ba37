//! Errors raised while reading a page's inputs for a render.
//!
//! A [`RenderError`] never leaves the render boundary: the page keeps its
//! previous figure and the application shows the message to the user.

use conics::ConicsError;

/// Invalid numeric input for one render call.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A field does not hold a finite number.
    #[error("{field} must be a number (got {input:?})")]
    NotANumber {
        /// Field label.
        field: &'static str,
        /// The rejected text.
        input: String,
    },

    /// The parameters do not describe a drawable curve or view.
    #[error(transparent)]
    Params(#[from] ConicsError),
}
