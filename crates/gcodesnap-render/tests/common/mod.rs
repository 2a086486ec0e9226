//! Shared test doubles for renderer lifecycle tests.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

use gcodesnap_core::Color;
use gcodesnap_render::{RenderBackend, RenderError, VertexBatch};

/// Everything a backend was asked to do, for post-hoc assertions.
#[derive(Debug, Default)]
pub struct FrameLog {
    pub frames_begun: usize,
    pub backgrounds: Vec<Color>,
    pub draws: Vec<(Mat4, Vec<VertexBatch>)>,
    pub frames_finished: usize,
    pub shutdowns: usize,
}

/// Recording backend with a synthesized pixel buffer, so lifecycle and
/// capture behavior can be exercised without a GPU context.
pub struct MockBackend {
    pub log: Rc<RefCell<FrameLog>>,
    pub width: u32,
    pub height: u32,
    pub fill: [u8; 4],
}

impl MockBackend {
    pub fn new(width: u32, height: u32) -> (Self, Rc<RefCell<FrameLog>>) {
        let log = Rc::new(RefCell::new(FrameLog::default()));
        (
            Self {
                log: Rc::clone(&log),
                width,
                height,
                fill: [10, 20, 30, 255],
            },
            log,
        )
    }
}

impl RenderBackend for MockBackend {
    fn begin_frame(&mut self, background: Color) {
        let mut log = self.log.borrow_mut();
        log.frames_begun += 1;
        log.backgrounds.push(background);
    }

    fn draw(&mut self, camera: &Mat4, batches: &[VertexBatch]) -> Result<(), RenderError> {
        self.log
            .borrow_mut()
            .draws
            .push((*camera, batches.to_vec()));
        Ok(())
    }

    fn finish_frame(&mut self) {
        self.log.borrow_mut().frames_finished += 1;
    }

    fn read_pixels(&mut self, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        if (width, height) != (self.width, self.height) {
            return Err(RenderError::CaptureMismatch {
                expected: width as usize * height as usize * 4,
                actual: self.width as usize * self.height as usize * 4,
            });
        }
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&self.fill);
        }
        Ok(pixels)
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().shutdowns += 1;
    }
}
