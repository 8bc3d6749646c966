//! This module defines the error types used by the `striker-vision` crate.

/// Error type for vision operations.
///
/// Absence (a marker that is not in the frame, a label that is not in the
/// grid) is never an error; it is reported as `None` by the lookup functions.
/// These variants cover invalid inputs only.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionError {
    /// Error for an invalid color range.
    /// This variant is returned when a lower bound exceeds its upper bound.
    InvalidColorRange(&'static str),
    /// Error for invalid grid or image dimensions.
    /// This variant is returned when a width or height is zero, rows are ragged, or sizes overflow.
    InvalidDimensions(&'static str),
    /// Error for out-of-bounds access.
    /// This variant is returned when attempting to access grid cells outside the valid range.
    OutOfBounds(&'static str),
    /// Error for a degenerate warp quadrilateral.
    /// This variant is returned when control points repeat or three of them are collinear.
    DegenerateQuad(&'static str),
}

impl core::fmt::Display for VisionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VisionError::InvalidColorRange(msg) => write!(f, "Invalid color range: {}", msg),
            VisionError::InvalidDimensions(msg) => write!(f, "Invalid dimensions: {}", msg),
            VisionError::OutOfBounds(msg) => write!(f, "Grid access out of bounds: {}", msg),
            VisionError::DegenerateQuad(msg) => write!(f, "Degenerate quadrilateral: {}", msg),
        }
    }
}

impl core::error::Error for VisionError {}
