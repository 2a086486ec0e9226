//! Frame capture and thumbnail handoff.
//!
//! GL returns pixel rows bottom-up while image formats expect top-down,
//! so every captured frame is flipped in place before it leaves this
//! module. Encoding is behind a trait; the default encoder writes the
//! buffer through the `image` crate with the format picked from the
//! destination extension.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info};

use crate::backend::RenderBackend;
use crate::error::{RenderError, Result};

/// Flip an RGBA8 buffer vertically in place.
pub fn flip_rows(pixels: &mut [u8], width: u32, height: u32) {
    let stride = width as usize * 4;
    let rows = height as usize;
    debug_assert_eq!(pixels.len(), stride * rows);

    for row in 0..rows / 2 {
        let (head, tail) = pixels.split_at_mut((rows - row - 1) * stride);
        head[row * stride..(row + 1) * stride].swap_with_slice(&mut tail[..stride]);
    }
}

/// Read the full color buffer from the backend, flipped to top-down row
/// order. The returned buffer is owned by the caller.
pub fn capture_frame(
    backend: &mut dyn RenderBackend,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    let mut pixels = backend.read_pixels(width, height)?;
    if pixels.len() != expected {
        return Err(RenderError::CaptureMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    flip_rows(&mut pixels, width, height);
    debug!(width, height, bytes = pixels.len(), "captured frame");
    Ok(pixels)
}

/// External image-encoding collaborator: takes the flipped RGBA bytes and
/// persists them under a destination identifier.
pub trait ThumbnailEncoder {
    fn encode(&self, destination: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()>;
}

/// Default encoder writing an image file, format chosen by the
/// destination's extension.
#[derive(Debug, Default)]
pub struct FileEncoder;

impl ThumbnailEncoder for FileEncoder {
    fn encode(&self, destination: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RenderError::CaptureMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        let image = RgbaImage::from_raw(width, height, rgba.to_vec()).ok_or_else(|| {
            RenderError::CaptureMismatch {
                expected,
                actual: rgba.len(),
            }
        })?;
        image.save(destination).map_err(|e| RenderError::Encode {
            destination: destination.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!(destination = %destination.display(), width, height, "thumbnail written");
        Ok(())
    }
}
