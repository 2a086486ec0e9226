//! Renderer lifecycle state machine.
//!
//! `Uninitialized -> Initialized -> HasFrame -> Closed`, with explicit
//! typed errors for out-of-state operations. Per-render data (camera rig,
//! vertex batches) lives in each call's scope; the instance keeps only
//! the configuration, the backend handle and the last camera transform,
//! which `clear` needs to redraw the bed.
//!
//! Execution is single-threaded and synchronous: every operation blocks
//! until complete. The one deliberate exception is
//! [`Renderer::run_interactive`], which redraws until cancelled and is
//! meant only for interactive debugging, never the unattended path.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Mat4;
use glow::HasContext;
use tracing::{debug, info, warn};

use gcodesnap_core::{GeometryModel, PipelineKind, RendererConfig};

use crate::backend::{RenderBackend, RetainedBackend, StreamedBackend};
use crate::batch;
use crate::capture::{self, ThumbnailEncoder};
use crate::error::{RenderError, Result};
use crate::framing;

/// Lifecycle state of a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Initialized,
    HasFrame,
    Closed,
}

/// Toolpath preview renderer.
///
/// One instance owns its GL context and render targets exclusively from
/// initialize to close; hosts must serialize calls per instance.
pub struct Renderer {
    config: RendererConfig,
    state: RendererState,
    backend: Option<Box<dyn RenderBackend>>,
    last_camera: Mat4,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            state: RendererState::Uninitialized,
            backend: None,
            last_camera: Mat4::IDENTITY,
        }
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Acquire GPU resources on the given context and become ready to
    /// render. Idempotent when already initialized; resource failures
    /// surface here, never deferred to the first render.
    ///
    /// The backend variant follows the configured pipeline kind, with
    /// `Auto` resolved by context capability: embedded (GLES) contexts
    /// get the streamed path, desktop GL the retained path.
    pub fn initialize(&mut self, gl: glow::Context) -> Result<()> {
        match self.state {
            RendererState::Initialized | RendererState::HasFrame => return Ok(()),
            RendererState::Closed => {
                return Err(RenderError::Lifecycle {
                    operation: "initialize",
                    state: self.state,
                })
            }
            RendererState::Uninitialized => {}
        }
        self.validate_config()?;

        let backend: Box<dyn RenderBackend> = match self.config.pipeline {
            PipelineKind::Retained => Box::new(RetainedBackend::new(gl, &self.config)?),
            PipelineKind::Streamed => Box::new(StreamedBackend::new(gl, &self.config)?),
            PipelineKind::Auto => {
                if gl.version().is_embedded {
                    Box::new(StreamedBackend::new(gl, &self.config)?)
                } else {
                    Box::new(RetainedBackend::new(gl, &self.config)?)
                }
            }
        };
        self.install_backend(backend);
        Ok(())
    }

    /// Same transition as [`initialize`](Self::initialize) with a
    /// caller-supplied backend, for hosts that manage pipeline selection
    /// themselves.
    pub fn initialize_with_backend(&mut self, backend: Box<dyn RenderBackend>) -> Result<()> {
        match self.state {
            RendererState::Initialized | RendererState::HasFrame => return Ok(()),
            RendererState::Closed => {
                return Err(RenderError::Lifecycle {
                    operation: "initialize",
                    state: self.state,
                })
            }
            RendererState::Uninitialized => {}
        }
        self.validate_config()?;
        self.install_backend(backend);
        Ok(())
    }

    /// Render one model: clear, frame the camera, build and draw the
    /// part and bed batches. A new call supersedes the previous model.
    pub fn render_model(&mut self, model: &GeometryModel, auto_frame: bool) -> Result<()> {
        self.require_renderable("render_model")?;

        let rig = if auto_frame {
            framing::auto_frame(model, &self.config)
        } else {
            framing::fixed_frame(&self.config)
        };
        let batches = [
            batch::part_batch(model, self.config.part_color),
            batch::bed_batch(
                self.config.bed_width,
                self.config.bed_depth,
                self.config.bed_color,
            ),
        ];

        let background = self.config.background_color;
        let backend = self.backend_mut("render_model")?;
        backend.begin_frame(background);
        backend.draw(&rig.view_projection, &batches)?;
        backend.finish_frame();

        self.last_camera = rig.view_projection;
        self.state = RendererState::HasFrame;
        debug!(
            segments = model.segment_count(),
            auto_frame, "model rendered"
        );
        Ok(())
    }

    /// Clear the frame and redraw only the bed. State is unchanged.
    pub fn clear(&mut self) -> Result<()> {
        self.require_renderable("clear")?;

        let bed = batch::bed_batch(
            self.config.bed_width,
            self.config.bed_depth,
            self.config.bed_color,
        );
        let background = self.config.background_color;
        let camera = self.last_camera;
        let backend = self.backend_mut("clear")?;
        backend.begin_frame(background);
        backend.draw(&camera, &[bed])?;
        backend.finish_frame();
        Ok(())
    }

    /// Capture the rendered frame and hand it to the encoder. Requires a
    /// rendered frame: saving right after initialize is a capture
    /// mismatch, not a silent all-background "success".
    pub fn save(&mut self, destination: &Path, encoder: &dyn ThumbnailEncoder) -> Result<()> {
        let (width, height) = (self.config.width, self.config.height);
        match self.state {
            RendererState::HasFrame => {}
            RendererState::Initialized => {
                return Err(RenderError::CaptureMismatch {
                    expected: width as usize * height as usize * 4,
                    actual: 0,
                })
            }
            state => {
                return Err(RenderError::Lifecycle {
                    operation: "save",
                    state,
                })
            }
        }

        let backend = self.backend_mut("save")?;
        let pixels = capture::capture_frame(backend.as_mut(), width, height)?;
        encoder.encode(destination, width, height, &pixels)?;
        info!(destination = %destination.display(), "preview saved");
        Ok(())
    }

    /// Redraw the same frame until `cancel` is set, invoking the host's
    /// `present` callback (buffer swap) each iteration.
    ///
    /// This blocks the caller for as long as the loop runs and exists
    /// only for interactive debugging with `show_window` surfaces; the
    /// unattended path uses [`render_model`](Self::render_model), which
    /// executes exactly once and returns.
    pub fn run_interactive(
        &mut self,
        model: &GeometryModel,
        auto_frame: bool,
        cancel: &AtomicBool,
        mut present: impl FnMut(),
    ) -> Result<()> {
        self.require_renderable("run_interactive")?;

        let rig = if auto_frame {
            framing::auto_frame(model, &self.config)
        } else {
            framing::fixed_frame(&self.config)
        };
        let batches = [
            batch::part_batch(model, self.config.part_color),
            batch::bed_batch(
                self.config.bed_width,
                self.config.bed_depth,
                self.config.bed_color,
            ),
        ];

        warn!("entering interactive redraw loop; blocks until cancelled");
        let background = self.config.background_color;
        let backend = self.backend_mut("run_interactive")?;
        while !cancel.load(Ordering::Relaxed) {
            backend.begin_frame(background);
            backend.draw(&rig.view_projection, &batches)?;
            backend.finish_frame();
            present();
        }

        self.last_camera = rig.view_projection;
        self.state = RendererState::HasFrame;
        Ok(())
    }

    /// Release the backend and its GPU resources. Idempotent: closing an
    /// already-closed or never-initialized renderer does nothing.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut backend) = self.backend.take() {
            backend.shutdown();
        }
        if matches!(
            self.state,
            RendererState::Initialized | RendererState::HasFrame
        ) {
            self.state = RendererState::Closed;
            info!("renderer closed");
        }
        Ok(())
    }

    fn install_backend(&mut self, backend: Box<dyn RenderBackend>) {
        self.last_camera = framing::fixed_frame(&self.config).view_projection;
        self.backend = Some(backend);
        self.state = RendererState::Initialized;
        info!(
            width = self.config.width,
            height = self.config.height,
            bed_width = self.config.bed_width,
            bed_depth = self.config.bed_depth,
            "renderer initialized"
        );
    }

    fn require_renderable(&self, operation: &'static str) -> Result<()> {
        match self.state {
            RendererState::Initialized | RendererState::HasFrame => Ok(()),
            state => Err(RenderError::Lifecycle { operation, state }),
        }
    }

    fn backend_mut(&mut self, operation: &'static str) -> Result<&mut Box<dyn RenderBackend>> {
        let state = self.state;
        self.backend
            .as_mut()
            .ok_or(RenderError::Lifecycle { operation, state })
    }

    fn validate_config(&self) -> Result<()> {
        if self.config.bed_width <= 0.0 || self.config.bed_depth <= 0.0 {
            return Err(RenderError::InvalidConfig {
                reason: format!(
                    "bed dimensions must be positive, got {}x{}",
                    self.config.bed_width, self.config.bed_depth
                ),
            });
        }
        if self.config.width == 0 || self.config.height == 0 {
            return Err(RenderError::InvalidConfig {
                reason: format!(
                    "output dimensions must be non-zero, got {}x{}",
                    self.config.width, self.config.height
                ),
            });
        }
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.shutdown();
        }
    }
}
