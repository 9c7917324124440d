//! Crate-wide error type.

/// Failures reported by the fallible operations in this crate.
///
/// Every failure is detected before any computation starts, so an `Err`
/// never comes with partial output.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A malformed argument: empty collection, non-finite or out-of-range number.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Wrong number of samples, rows, or coordinates.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Input bytes in a format this crate does not read.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(&'static str),
}

impl Error {
    /// True for the argument-validation family (`InvalidInput` and `ShapeMismatch`).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::ShapeMismatch { .. })
    }
}

pub type Result<T> = core::result::Result<T, Error>;

/// Reject NaN and infinities with a caller-specific message.
#[inline]
pub(crate) fn finite(v: f64, msg: &'static str) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Error::InvalidInput(msg))
    }
}
