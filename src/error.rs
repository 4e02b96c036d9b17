//! Error types for zentransform

use std::fmt;

/// Error type for zentransform operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Dimensions are inconsistent with the block grid or with each other
    ShapeMismatch {
        /// Shape (height, width) or block count the operation required
        expected: (usize, usize),
        /// Shape (height, width) or block count that was supplied
        actual: (usize, usize),
        reason: &'static str,
    },
    /// A coefficient stream cannot be cut into whole 64-value blocks
    FormatError {
        /// Channel name ("Y", "Cb" or "Cr")
        channel: &'static str,
        len: usize,
    },
    /// A quantization table contains a zero divisor
    DegenerateQuantization {
        /// Natural (row-major) index of the offending entry
        position: usize,
    },
    /// Pixel buffer has the wrong length (bytes for RGB data, samples for a channel)
    InvalidPixelData { expected: usize, actual: usize },
    /// Zero width or height, or a pixel count that overflows `usize`
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch {
                expected,
                actual,
                reason,
            } => write!(
                f,
                "Shape mismatch: expected {:?}, got {:?} ({})",
                expected, actual, reason
            ),
            Error::FormatError { channel, len } => write!(
                f,
                "{} coefficient stream has {} values, not a multiple of 64",
                channel, len
            ),
            Error::DegenerateQuantization { position } => {
                write!(f, "Quantization table entry {} is zero", position)
            }
            Error::InvalidPixelData { expected, actual } => {
                write!(f, "Expected {} pixel data values, got {}", expected, actual)
            }
            Error::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Invalid dimensions {}x{}: must be non-zero and fit in memory",
                    width, height
                )
            }
        }
    }
}

impl std::error::Error for Error {}
