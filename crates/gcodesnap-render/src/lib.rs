//! # gcodesnap Render
//!
//! Off-screen 3D preview rendering of machine toolpaths.
//! This crate provides:
//! - Automatic camera framing around a toolpath's bounding volume (framing)
//! - Conversion of flat segment lists into GPU line batches (batch)
//! - Two GL backend variants behind one trait (backend)
//! - Frame-buffer readback and thumbnail encoding (capture)
//! - The renderer lifecycle state machine tying it together (renderer)

pub mod backend;
pub mod batch;
pub mod capture;
pub mod error;
pub mod framing;
pub mod renderer;
pub mod shaders;

pub use backend::{RenderBackend, RetainedBackend, StreamedBackend};
pub use batch::{bed_batch, part_batch, Topology, VertexBatch};
pub use capture::{capture_frame, flip_rows, FileEncoder, ThumbnailEncoder};
pub use error::{RenderError, Result};
pub use framing::{auto_frame, auto_scale, fixed_frame, CameraRig};
pub use renderer::{Renderer, RendererState};
