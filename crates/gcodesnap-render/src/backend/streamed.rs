//! GLES2-class backend for constrained hardware.
//!
//! No vertex array objects; one buffer object is created, filled, drawn
//! and deleted inside each draw call. GPU storage is transient so nothing
//! outlives the call on devices with little video memory.

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
use crate::shaders::{LINE_FRAGMENT_SHADER_ES, LINE_VERTEX_SHADER_ES};

pub struct StreamedBackend {
    gl: glow::Context,
    program: glow::Program,
    camera_loc: Option<glow::UniformLocation>,
    color_loc: Option<glow::UniformLocation>,
    target: Option<OffscreenTarget>,
    width: u32,
    height: u32,
    released: bool,
}

impl StreamedBackend {
    pub fn new(gl: glow::Context, config: &RendererConfig) -> Result<Self> {
        let program = compile_program(&gl, LINE_VERTEX_SHADER_ES, LINE_FRAGMENT_SHADER_ES)?;

        let (camera_loc, color_loc) = unsafe {
            gl.use_program(Some(program));
            (
                gl.get_uniform_location(program, "u_camera"),
                gl.get_uniform_location(program, "u_color"),
            )
        };

        let target = if config.show_window {
            None
        } else {
            Some(OffscreenTarget::new(&gl, config.width, config.height)?)
        };

        configure_context(&gl, config.width, config.height, config.background_color);
        debug!(width = config.width, height = config.height, "streamed GLES backend ready");

        Ok(Self {
            gl,
            program,
            camera_loc,
            color_loc,
            target,
            width: config.width,
            height: config.height,
            released: false,
        })
    }
}

impl RenderBackend for StreamedBackend {
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

                let vbo = self
                    .gl
                    .create_buffer()
                    .map_err(|reason| RenderError::ResourceAcquisition { reason })?;
                self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
                self.gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&batch.vertices),
                    glow::STATIC_DRAW,
                );
                self.gl
                    .vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, 0, 0);
                self.gl.enable_vertex_attrib_array(0);
                self.gl
                    .draw_arrays(draw_mode(batch.topology), 0, batch.vertex_count());
                self.gl.disable_vertex_attrib_array(0);
                self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
                self.gl.delete_buffer(vbo);
            }
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
            self.gl.delete_program(self.program);
        }
        if let Some(target) = self.target.take() {
            target.destroy(&self.gl);
        }
        self.released = true;
    }
}

impl Drop for StreamedBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
