//! Camera framing for toolpath previews.
//!
//! Two modes: auto-framing fits the camera to the model's bounding volume
//! (accounting for mirrored and synchronized dual-part layouts), fixed
//! framing uses a default angle over the bed center. Both produce a
//! composed view-projection matrix ready for the shader's camera uniform.

use glam::{EulerRot, Mat4, Vec3};
use tracing::debug;

use gcodesnap_core::config::{
    AUTO_FOV_DEG, CAMERA_DISTANCE, FAR_PLANE, FIXED_EYE_Y, FIXED_EYE_Z, FIXED_FOV_DEG, NEAR_PLANE,
    WORLD_UP, ZOOM_DIVISOR,
};
use gcodesnap_core::{GeometryModel, PrintMode, RendererConfig};

/// A computed camera placement plus its composed transform.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub view_projection: Mat4,
}

/// Framing kernel: the point to look at and the distance scale factor.
///
/// With no bounding box the bed center at unit scale is used, so a model
/// the parser could not measure still renders a sensible frame.
pub fn auto_scale(model: &GeometryModel, config: &RendererConfig) -> (Vec3, f32) {
    let Some(bbox) = model.bbox() else {
        return (
            Vec3::new(config.bed_width / 2.0, config.bed_depth / 2.0, 0.0),
            1.0,
        );
    };

    match model.print_mode() {
        PrintMode::Sync => {
            // One part stands in for the pair; the offset shifts the
            // frame toward the midpoint between the twins. Zero offset
            // degenerates to normal framing.
            let offset = model.sync_offset();
            let target = Vec3::new(bbox.cx() + offset / 2.0, bbox.cy(), bbox.cz());
            let span = bbox.xmax + offset - bbox.xmin;
            (target, span.max(bbox.dy()).max(bbox.dz()) / ZOOM_DIVISOR)
        }
        PrintMode::Mirror => {
            // Mirrored output spans the full bed width, so frame the bed
            // center rather than the part itself.
            let target = Vec3::new(config.bed_width / 2.0, bbox.cy(), bbox.cz());
            let span = config.bed_width - 2.0 * bbox.xmin;
            (target, span.max(bbox.dy()).max(bbox.dz()) / ZOOM_DIVISOR)
        }
        PrintMode::Normal => {
            let target = Vec3::new(bbox.cx(), bbox.cy(), bbox.cz());
            let span = bbox.dx().max(bbox.dy()).max(bbox.dz());
            (target, span / ZOOM_DIVISOR)
        }
    }
}

/// Fit the camera around the model's bounding volume.
pub fn auto_frame(model: &GeometryModel, config: &RendererConfig) -> CameraRig {
    let (target, scale) = auto_scale(model, config);
    let eye = target + CAMERA_DISTANCE * scale;
    debug!(
        ?target,
        ?eye,
        scale,
        mode = ?model.print_mode(),
        "auto-framed camera"
    );

    let view = Mat4::look_at_rh(eye, target, WORLD_UP);
    let projection = Mat4::perspective_rh_gl(
        AUTO_FOV_DEG.to_radians(),
        config.aspect_ratio(),
        NEAR_PLANE,
        FAR_PLANE,
    );

    CameraRig {
        eye,
        target,
        view_projection: projection * view,
    }
}

/// Default preview angle over the bed center, used when auto-framing is
/// not requested. Configured camera position/rotation overrides replace
/// the computed defaults.
pub fn fixed_frame(config: &RendererConfig) -> CameraRig {
    let target = Vec3::new(config.bed_width / 2.0, config.bed_depth / 2.0, 0.0);
    let eye = config
        .camera_position
        .unwrap_or_else(|| Vec3::new(config.bed_width / 2.0, FIXED_EYE_Y, FIXED_EYE_Z));

    let view = match config.camera_rotation {
        Some(euler) => {
            // Explicit orientation: place then rotate the camera and
            // invert, instead of deriving orientation from a look-at.
            let camera =
                Mat4::from_translation(eye) * Mat4::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
            camera.inverse()
        }
        None => Mat4::look_at_rh(eye, target, WORLD_UP),
    };
    let projection = Mat4::perspective_rh_gl(
        FIXED_FOV_DEG.to_radians(),
        config.aspect_ratio(),
        NEAR_PLANE,
        FAR_PLANE,
    );

    CameraRig {
        eye,
        target,
        view_projection: projection * view,
    }
}
