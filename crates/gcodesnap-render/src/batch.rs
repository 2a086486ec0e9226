//! Vertex batch building.
//!
//! A batch is a flat run of 3-float vertices sharing one draw topology and
//! one solid color, submitted as a single draw call. The part batch passes
//! the parser's segment floats through untouched; the bed batch is two
//! triangles tiling the build surface, because quads are not a native
//! primitive on every pipeline.

use gcodesnap_core::{Color, GeometryModel};

/// Draw topology of a vertex batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Lines,
    Triangles,
}

/// An ordered run of `x,y,z` vertices with one topology and one color.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBatch {
    pub vertices: Vec<f32>,
    pub topology: Topology,
    pub color: Color,
}

impl VertexBatch {
    pub fn vertex_count(&self) -> i32 {
        (self.vertices.len() / 3) as i32
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Line batch for the part geometry. Segment order is preserved so that
/// identical input yields an identical upload.
pub fn part_batch(model: &GeometryModel, color: Color) -> VertexBatch {
    VertexBatch {
        vertices: model.segments().to_vec(),
        topology: Topology::Lines,
        color,
    }
}

/// Triangle batch for the bed quad: six vertices, two triangles sharing
/// the diagonal, tiling `[0,bed_width] x [0,bed_depth]` at z=0.
pub fn bed_batch(bed_width: f32, bed_depth: f32, color: Color) -> VertexBatch {
    let vertices = vec![
        0.0, 0.0, 0.0, //
        0.0, bed_depth, 0.0, //
        bed_width, bed_depth, 0.0, //
        bed_width, bed_depth, 0.0, //
        bed_width, 0.0, 0.0, //
        0.0, 0.0, 0.0,
    ];
    VertexBatch {
        vertices,
        topology: Topology::Triangles,
        color,
    }
}
