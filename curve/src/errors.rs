//! Error types for point decoding.

use thiserror::Error;

/// Reasons a 32-byte string fails to decode to a curve point.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecompressionError {
    /// The y-coordinate is not reduced: its 255-bit value is at least p.
    #[error("y-coordinate is not canonical")]
    NonCanonical,

    /// No x satisfies the curve equation for this y, or the sign bit asks for
    /// -0.
    #[error("encoding is not a point on the curve")]
    NotOnCurve,
}
