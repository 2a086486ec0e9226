//! # gcodesnap Core
//!
//! Core types for the gcodesnap toolpath thumbnail renderer.
//! Provides the geometry data model consumed from an external G-code
//! parser, the renderer configuration surface, and the error taxonomy
//! shared with the rendering layer.

pub mod config;
pub mod error;
pub mod model;

pub use config::{Color, PipelineKind, RendererConfig};
pub use error::{ModelError, Result};
pub use model::{BoundingBox, GeometryModel, PrintMode};
