//! Renderer configuration and behavior-defining constants.
//!
//! The constants here define the rendered output; changing any of them
//! changes every thumbnail and counts as a behavioral regression.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Divisor mapping bounding-box size to camera distance. Found by trial
/// and error to give a pleasing zoom factor.
pub const ZOOM_DIVISOR: f32 = 75.0;

/// Vertical field of view for auto-framed previews, degrees.
pub const AUTO_FOV_DEG: f32 = 45.0;

/// Vertical field of view for the fixed default angle, degrees.
pub const FIXED_FOV_DEG: f32 = 90.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 10_000.0;

/// Direction and relative distance of the camera from the framed object;
/// scaled by the computed fit before being added to the target.
pub const CAMERA_DISTANCE: Vec3 = Vec3::new(-100.0, -100.0, 75.0);

/// The bed lies in the XY plane; Z is vertical.
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Fixed-framing eye Y/Z; X follows the bed center.
pub const FIXED_EYE_Y: f32 = -100.0;
pub const FIXED_EYE_Z: f32 = 200.0;

pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 1024;
pub const DEFAULT_BED_WIDTH: f32 = 365.0;
pub const DEFAULT_BED_DEPTH: f32 = 350.0;

pub const DEFAULT_PART_COLOR: Color = Color::rgb(77.0 / 255.0, 120.0 / 255.0, 190.0 / 255.0);
pub const DEFAULT_BED_COLOR: Color = Color::rgb(70.0 / 255.0, 70.0 / 255.0, 70.0 / 255.0);
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);

/// Solid RGB color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Which GL pipeline style the backend should use.
///
/// `Auto` picks by context capability at initialize time: GLES-class
/// contexts get the streamed path, desktop GL gets the retained path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    #[default]
    Auto,
    Retained,
    Streamed,
}

/// Renderer configuration, supplied once at initialize and immutable for
/// the renderer's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Build surface width (X), machine units.
    pub bed_width: f32,
    /// Build surface depth (Y), machine units.
    pub bed_depth: f32,
    /// Output image width, pixels.
    pub width: u32,
    /// Output image height, pixels.
    pub height: u32,
    /// Render to an on-screen surface instead of an off-screen target.
    /// Only meaningful together with the interactive mode; the unattended
    /// path never sets this.
    pub show_window: bool,
    pub background_color: Color,
    pub bed_color: Color,
    pub part_color: Color,
    /// Overrides the computed fixed-framing eye when set.
    pub camera_position: Option<Vec3>,
    /// Fixed-framing euler rotation (radians, XYZ order); replaces the
    /// look-at orientation when set.
    pub camera_rotation: Option<Vec3>,
    pub pipeline: PipelineKind,
}

impl RendererConfig {
    pub fn new(bed_width: f32, bed_depth: f32) -> Self {
        Self {
            bed_width,
            bed_depth,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            show_window: false,
            background_color: DEFAULT_BACKGROUND_COLOR,
            bed_color: DEFAULT_BED_COLOR,
            part_color: DEFAULT_PART_COLOR,
            camera_position: None,
            camera_rotation: None,
            pipeline: PipelineKind::Auto,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_show_window(mut self, show_window: bool) -> Self {
        self.show_window = show_window;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_bed_color(mut self, color: Color) -> Self {
        self.bed_color = color;
        self
    }

    pub fn with_part_color(mut self, color: Color) -> Self {
        self.part_color = color;
        self
    }

    pub fn with_camera_position(mut self, position: Vec3) -> Self {
        self.camera_position = Some(position);
        self
    }

    pub fn with_camera_rotation(mut self, rotation: Vec3) -> Self {
        self.camera_rotation = Some(rotation);
        self
    }

    pub fn with_pipeline(mut self, pipeline: PipelineKind) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BED_WIDTH, DEFAULT_BED_DEPTH)
    }
}
