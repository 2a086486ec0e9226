//! Error handling for the rendering layer.
//!
//! Lifecycle misuse and resource failures surface as typed errors so
//! callers can detect them; a missing bounding box is not an error and is
//! absorbed by the framing fallback.

use std::path::PathBuf;

use thiserror::Error;

use gcodesnap_core::ModelError;

use crate::renderer::RendererState;

/// Rendering error type
#[derive(Error, Debug)]
pub enum RenderError {
    /// Operation invoked in a lifecycle state that does not support it.
    #[error("{operation} is not valid in renderer state {state:?}")]
    Lifecycle {
        /// The operation that was attempted.
        operation: &'static str,
        /// The state the renderer was in.
        state: RendererState,
    },

    /// Configuration rejected at initialize.
    #[error("invalid renderer configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Context, shader or render-target creation failed. Fatal to this
    /// renderer instance; retrying will not help without a different
    /// configuration.
    #[error("failed to acquire rendering resources: {reason}")]
    ResourceAcquisition {
        /// The driver-reported reason.
        reason: String,
    },

    /// Frame capture requested without a matching rendered frame bound.
    #[error("frame capture mismatch: expected {expected} bytes, got {actual}")]
    CaptureMismatch {
        /// Bytes the configured output dimensions require.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Encoding or writing the thumbnail failed.
    #[error("failed to encode thumbnail to {destination}: {reason}")]
    Encode {
        /// The destination the encoder was writing to.
        destination: PathBuf,
        /// The underlying codec or I/O failure.
        reason: String,
    },

    /// Geometry data failed its contract checks.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type using RenderError
pub type Result<T> = std::result::Result<T, RenderError>;
