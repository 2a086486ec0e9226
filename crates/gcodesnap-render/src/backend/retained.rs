//! Desktop GL 3.3 backend.
//!
//! Keeps one VAO and one vertex buffer alive for the renderer's lifetime
//! and re-specifies the buffer per batch. Core profile has no client-side
//! arrays or display lists, so retained GPU storage stands in for a
//! compiled batch.

use glam::Mat4;
use glow::HasContext;
use tracing::debug;

use gcodesnap_core::{Color, RendererConfig};

use crate::backend::{
    check_capture_dimensions, clear_frame, compile_program, configure_context, draw_mode,
    OffscreenTarget, RenderBackend,
};
use crate::batch::VertexBatch;
use crate::error::{RenderError, Result};
use crate::shaders::{LINE_FRAGMENT_SHADER_330, LINE_VERTEX_SHADER_330};

pub struct RetainedBackend {
    gl: glow::Context,
    program: glow::Program,
    camera_loc: Option<glow::UniformLocation>,
    color_loc: Option<glow::UniformLocation>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    target: Option<OffscreenTarget>,
    width: u32,
    height: u32,
    released: bool,
}

impl RetainedBackend {
    pub fn new(gl: glow::Context, config: &RendererConfig) -> Result<Self> {
        let program = compile_program(&gl, LINE_VERTEX_SHADER_330, LINE_FRAGMENT_SHADER_330)?;

        let (vao, vbo, camera_loc, color_loc) = unsafe {
            gl.use_program(Some(program));
            let camera_loc = gl.get_uniform_location(program, "u_camera");
            let color_loc = gl.get_uniform_location(program, "u_color");
            let vao = gl
                .create_vertex_array()
                .map_err(|reason| RenderError::ResourceAcquisition { reason })?;
            let vbo = gl
                .create_buffer()
                .map_err(|reason| RenderError::ResourceAcquisition { reason })?;
            (vao, vbo, camera_loc, color_loc)
        };

        // Unattended renders draw into a renderbuffer FBO; on-screen mode
        // stays on the default framebuffer supplied by the host surface.
        let target = if config.show_window {
            None
        } else {
            Some(OffscreenTarget::new(&gl, config.width, config.height)?)
        };

        configure_context(&gl, config.width, config.height, config.background_color);
        debug!(width = config.width, height = config.height, "retained GL backend ready");

        Ok(Self {
            gl,
            program,
            camera_loc,
            color_loc,
            vao,
            vbo,
            target,
            width: config.width,
            height: config.height,
            released: false,
        })
    }
}

impl RenderBackend for RetainedBackend {
    fn begin_frame(&mut self, background: Color) {
        clear_frame(&self.gl, background);
    }

    fn draw(&mut self, camera: &Mat4, batches: &[VertexBatch]) -> Result<()> {
        unsafe {
            self.gl.use_program(Some(self.program));
            self.gl.uniform_matrix_4_f32_slice(
                self.camera_loc.as_ref(),
                false,
                &camera.to_cols_array(),
            );
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));

            for batch in batches {
                if batch.is_empty() {
                    continue;
                }
                self.gl.uniform_4_f32(
                    self.color_loc.as_ref(),
                    batch.color.r,
                    batch.color.g,
                    batch.color.b,
                    1.0,
                );
                self.gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&batch.vertices),
                    glow::DYNAMIC_DRAW,
                );
                self.gl
                    .vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, 0, 0);
                self.gl.enable_vertex_attrib_array(0);
                self.gl
                    .draw_arrays(draw_mode(batch.topology), 0, batch.vertex_count());
            }

            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        Ok(())
    }

    fn finish_frame(&mut self) {
        unsafe {
            self.gl.flush();
            self.gl.finish();
        }
    }

    fn read_pixels(&mut self, width: u32, height: u32) -> Result<Vec<u8>> {
        check_capture_dimensions((width, height), (self.width, self.height))?;
        Ok(crate::backend::read_rgba(&self.gl, width, height))
    }

    fn shutdown(&mut self) {
        if self.released {
            return;
        }
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_program(self.program);
        }
        if let Some(target) = self.target.take() {
            target.destroy(&self.gl);
        }
        self.released = true;
    }
}

impl Drop for RetainedBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
