//! Error handling for gcodesnap core types.
//!
//! Geometry data arrives from an external parser; these errors cover the
//! contract checks applied when that data enters the renderer. All error
//! types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Error raised while validating geometry data from the external parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Segment list length is not a whole number of line segments.
    /// Each segment is two 3D endpoints, so the flat list must be a
    /// multiple of 6 floats.
    #[error("segment list length {len} is not divisible by 6")]
    MalformedSegments {
        /// The offending flat list length.
        len: usize,
    },

    /// A bounding box axis has its minimum above its maximum.
    #[error("bounding box {axis} minimum exceeds maximum")]
    InvalidBounds {
        /// The axis name ("x", "y" or "z").
        axis: &'static str,
    },

    /// Sync offset must be non-negative.
    #[error("sync offset {offset} is negative")]
    NegativeSyncOffset {
        /// The rejected offset value.
        offset: f32,
    },
}

/// Result type using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
