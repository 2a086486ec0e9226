//! Geometry data model consumed from the external motion-model parser.
//!
//! The parser hands over an opaque model: a flat list of line segments,
//! an optional bounding box and a print-mode tag. Everything here is
//! read-only once constructed; a new render call brings a new model.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Axis-aligned bounding box of a toolpath's spatial extent.
///
/// Immutable once produced by the parser. Accessor names match the
/// parser's own (`cx`/`dx` for center/extent per axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
    pub zmin: f32,
    pub zmax: f32,
}

impl BoundingBox {
    pub fn new(xmin: f32, xmax: f32, ymin: f32, ymax: f32, zmin: f32, zmax: f32) -> Result<Self> {
        if xmin > xmax {
            return Err(ModelError::InvalidBounds { axis: "x" });
        }
        if ymin > ymax {
            return Err(ModelError::InvalidBounds { axis: "y" });
        }
        if zmin > zmax {
            return Err(ModelError::InvalidBounds { axis: "z" });
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
        })
    }

    /// Center along X.
    pub fn cx(&self) -> f32 {
        (self.xmin + self.xmax) / 2.0
    }

    /// Center along Y.
    pub fn cy(&self) -> f32 {
        (self.ymin + self.ymax) / 2.0
    }

    /// Center along Z.
    pub fn cz(&self) -> f32 {
        (self.zmin + self.zmax) / 2.0
    }

    /// Extent along X.
    pub fn dx(&self) -> f32 {
        self.xmax - self.xmin
    }

    /// Extent along Y.
    pub fn dy(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Extent along Z.
    pub fn dz(&self) -> f32 {
        self.zmax - self.zmin
    }
}

/// Print layout strategy reported by the parser.
///
/// `Mirror` reflects the part across the bed; `Sync` prints two parts
/// simultaneously, spaced by the model's sync offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    #[default]
    Normal,
    Mirror,
    Sync,
}

/// One parsed toolpath, ready to render.
///
/// `segments` is a flat `x1,y1,z1,x2,y2,z2,...` list: each line segment
/// contributes two 3D endpoints, six floats total. The list is kept in
/// parser order and passed through to the GPU unmodified.
#[derive(Debug, Clone)]
pub struct GeometryModel {
    segments: Vec<f32>,
    bbox: Option<BoundingBox>,
    print_mode: PrintMode,
    sync_offset: f32,
}

impl GeometryModel {
    pub fn new(
        segments: Vec<f32>,
        bbox: Option<BoundingBox>,
        print_mode: PrintMode,
        sync_offset: f32,
    ) -> Result<Self> {
        if segments.len() % 6 != 0 {
            return Err(ModelError::MalformedSegments {
                len: segments.len(),
            });
        }
        if sync_offset < 0.0 {
            return Err(ModelError::NegativeSyncOffset {
                offset: sync_offset,
            });
        }
        Ok(Self {
            segments,
            bbox,
            print_mode,
            sync_offset,
        })
    }

    pub fn segments(&self) -> &[f32] {
        &self.segments
    }

    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    /// Spacing between twin parts; meaningful only when the print mode
    /// is not [`PrintMode::Normal`].
    pub fn sync_offset(&self) -> f32 {
        self.sync_offset
    }

    /// Number of line segments (six floats each).
    pub fn segment_count(&self) -> usize {
        self.segments.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
