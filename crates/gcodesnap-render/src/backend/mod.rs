//! GL backend variants behind one polymorphic interface.
//!
//! Both pipeline styles implement [`RenderBackend`]; the lifecycle layer
//! picks one at initialize time by context capability. Shared plumbing
//! (shader compilation, the off-screen render target, pixel readback)
//! lives in this module root.

pub mod retained;
pub mod streamed;

pub use retained::RetainedBackend;
pub use streamed::StreamedBackend;

use glam::Mat4;
use glow::HasContext;

use gcodesnap_core::Color;

use crate::batch::{Topology, VertexBatch};
use crate::error::{RenderError, Result};

/// One GPU pipeline able to draw batches and read the frame back.
///
/// Exclusively owned by one renderer instance; all methods assume the
/// backing context is current on the calling thread.
pub trait RenderBackend {
    /// Clear color and depth buffers to the given background.
    fn begin_frame(&mut self, background: Color);

    /// Draw the batches with the composed camera transform, in order.
    fn draw(&mut self, camera: &Mat4, batches: &[VertexBatch]) -> Result<()>;

    /// Flush and finish the frame.
    fn finish_frame(&mut self);

    /// Read back the bound color buffer as RGBA8 in GPU (bottom-up) row
    /// order. Fails with [`RenderError::CaptureMismatch`] when the bound
    /// target does not match the requested dimensions.
    fn read_pixels(&mut self, width: u32, height: u32) -> Result<Vec<u8>>;

    /// Release all GPU resources. Idempotent.
    fn shutdown(&mut self);
}

pub(crate) fn draw_mode(topology: Topology) -> u32 {
    match topology {
        Topology::Lines => glow::LINES,
        Topology::Triangles => glow::TRIANGLES,
    }
}

/// Renderbuffer-backed color+depth target for unattended off-screen
/// rendering.
pub(crate) struct OffscreenTarget {
    fbo: glow::Framebuffer,
    color: glow::Renderbuffer,
    depth: glow::Renderbuffer,
}

impl OffscreenTarget {
    pub(crate) fn new(gl: &glow::Context, width: u32, height: u32) -> Result<Self> {
        unsafe {
            let fbo = gl.create_framebuffer().map_err(resource_failure)?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));

            let color = gl.create_renderbuffer().map_err(resource_failure)?;
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(color));
            gl.renderbuffer_storage(glow::RENDERBUFFER, glow::RGBA8, width as i32, height as i32);
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::RENDERBUFFER,
                Some(color),
            );

            let depth = gl.create_renderbuffer().map_err(resource_failure)?;
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH_COMPONENT24,
                width as i32,
                height as i32,
            );
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(depth),
            );

            if gl.check_framebuffer_status(glow::FRAMEBUFFER) != glow::FRAMEBUFFER_COMPLETE {
                gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                gl.delete_renderbuffer(color);
                gl.delete_renderbuffer(depth);
                gl.delete_framebuffer(fbo);
                return Err(RenderError::ResourceAcquisition {
                    reason: "off-screen framebuffer is incomplete".into(),
                });
            }

            Ok(Self { fbo, color, depth })
        }
    }

    pub(crate) fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.delete_renderbuffer(self.color);
            gl.delete_renderbuffer(self.depth);
            gl.delete_framebuffer(self.fbo);
        }
    }
}

/// Compile and link one vertex/fragment pair, surfacing driver logs.
pub(crate) fn compile_program(
    gl: &glow::Context,
    vs_source: &str,
    fs_source: &str,
) -> Result<glow::Program> {
    unsafe {
        let vs = gl
            .create_shader(glow::VERTEX_SHADER)
            .map_err(resource_failure)?;
        gl.shader_source(vs, vs_source);
        gl.compile_shader(vs);

        if !gl.get_shader_compile_status(vs) {
            let info = gl.get_shader_info_log(vs);
            gl.delete_shader(vs);
            return Err(RenderError::ResourceAcquisition {
                reason: format!("vertex shader: {info}"),
            });
        }

        let fs = gl
            .create_shader(glow::FRAGMENT_SHADER)
            .map_err(resource_failure)?;
        gl.shader_source(fs, fs_source);
        gl.compile_shader(fs);

        if !gl.get_shader_compile_status(fs) {
            let info = gl.get_shader_info_log(fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(RenderError::ResourceAcquisition {
                reason: format!("fragment shader: {info}"),
            });
        }

        let program = gl.create_program().map_err(resource_failure)?;
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let info = gl.get_program_info_log(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            gl.delete_program(program);
            return Err(RenderError::ResourceAcquisition {
                reason: format!("program linking: {info}"),
            });
        }

        gl.delete_shader(vs);
        gl.delete_shader(fs);

        Ok(program)
    }
}

/// Apply the viewport, depth test and clear color shared by both
/// pipeline styles.
pub(crate) fn configure_context(gl: &glow::Context, width: u32, height: u32, background: Color) {
    unsafe {
        gl.viewport(0, 0, width as i32, height as i32);
        gl.enable(glow::DEPTH_TEST);
        gl.clear_color(background.r, background.g, background.b, 1.0);
    }
}

pub(crate) fn clear_frame(gl: &glow::Context, background: Color) {
    unsafe {
        gl.clear_color(background.r, background.g, background.b, 1.0);
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    }
}

pub(crate) fn read_rgba(gl: &glow::Context, width: u32, height: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; width as usize * height as usize * 4];
    unsafe {
        gl.read_pixels(
            0,
            0,
            width as i32,
            height as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(&mut pixels),
        );
    }
    pixels
}

pub(crate) fn check_capture_dimensions(
    requested: (u32, u32),
    bound: (u32, u32),
) -> Result<()> {
    if requested != bound {
        return Err(RenderError::CaptureMismatch {
            expected: requested.0 as usize * requested.1 as usize * 4,
            actual: bound.0 as usize * bound.1 as usize * 4,
        });
    }
    Ok(())
}

fn resource_failure(reason: String) -> RenderError {
    RenderError::ResourceAcquisition { reason }
}
