//! Camera framing properties.

use glam::Vec3;
use proptest::prelude::*;

use gcodesnap_core::config::{CAMERA_DISTANCE, ZOOM_DIVISOR};
use gcodesnap_core::{BoundingBox, GeometryModel, PrintMode, RendererConfig};
use gcodesnap_render::{auto_frame, auto_scale, fixed_frame};

fn model_with_bbox(bbox: BoundingBox, mode: PrintMode, sync_offset: f32) -> GeometryModel {
    GeometryModel::new(Vec::new(), Some(bbox), mode, sync_offset).unwrap()
}

#[test]
fn normal_mode_frames_bbox_center() {
    let bbox = BoundingBox::new(50.0, 150.0, 50.0, 150.0, 0.0, 10.0).unwrap();
    let model = model_with_bbox(bbox, PrintMode::Normal, 0.0);
    let config = RendererConfig::new(200.0, 200.0);

    let (target, scale) = auto_scale(&model, &config);
    assert_eq!(target, Vec3::new(100.0, 100.0, 5.0));
    assert_eq!(scale, 100.0 / ZOOM_DIVISOR);
}

#[test]
fn eye_sits_at_scaled_camera_distance_from_target() {
    let bbox = BoundingBox::new(50.0, 150.0, 50.0, 150.0, 0.0, 10.0).unwrap();
    let model = model_with_bbox(bbox, PrintMode::Normal, 0.0);
    let config = RendererConfig::new(200.0, 200.0);

    let rig = auto_frame(&model, &config);
    let scale = 100.0 / ZOOM_DIVISOR;
    assert_eq!(rig.eye, rig.target + CAMERA_DISTANCE * scale);
}

#[test]
fn mirror_mode_centers_on_bed_regardless_of_part() {
    let config = RendererConfig::new(300.0, 300.0);
    for xmin in [0.0, 40.0, 120.0] {
        let bbox = BoundingBox::new(xmin, xmin + 50.0, 10.0, 60.0, 0.0, 20.0).unwrap();
        let model = model_with_bbox(bbox, PrintMode::Mirror, 0.0);
        let (target, scale) = auto_scale(&model, &config);
        assert_eq!(target.x, 150.0, "xmin={xmin}");
        assert_eq!(
            scale,
            (300.0 - 2.0 * xmin).max(50.0).max(20.0) / ZOOM_DIVISOR
        );
    }
}

#[test]
fn sync_mode_offsets_x_center_by_half_the_spacing() {
    let bbox = BoundingBox::new(20.0, 80.0, 20.0, 80.0, 0.0, 30.0).unwrap();
    let model = model_with_bbox(bbox, PrintMode::Sync, 40.0);
    let config = RendererConfig::new(365.0, 350.0);

    let (target, scale) = auto_scale(&model, &config);
    assert_eq!(target.x, bbox.cx() + 20.0);
    assert_eq!(target.y, bbox.cy());
    assert_eq!(scale, (80.0 + 40.0 - 20.0) / ZOOM_DIVISOR);
}

#[test]
fn sync_with_zero_offset_reduces_to_normal_framing() {
    let bbox = BoundingBox::new(20.0, 80.0, 20.0, 80.0, 0.0, 30.0).unwrap();
    let config = RendererConfig::new(365.0, 350.0);

    let synced = model_with_bbox(bbox, PrintMode::Sync, 0.0);
    let normal = model_with_bbox(bbox, PrintMode::Normal, 0.0);
    assert_eq!(
        auto_scale(&synced, &config).0.x,
        auto_scale(&normal, &config).0.x
    );
}

#[test]
fn missing_bbox_falls_back_to_bed_center_at_unit_scale() {
    let config = RendererConfig::new(365.0, 350.0);
    for mode in [PrintMode::Normal, PrintMode::Mirror, PrintMode::Sync] {
        let model = GeometryModel::new(Vec::new(), None, mode, 10.0).unwrap();
        let (target, scale) = auto_scale(&model, &config);
        assert_eq!(target, Vec3::new(365.0 / 2.0, 350.0 / 2.0, 0.0));
        assert_eq!(scale, 1.0);
    }
}

#[test]
fn fixed_frame_uses_default_eye_over_bed_center() {
    let config = RendererConfig::new(200.0, 200.0);
    let rig = fixed_frame(&config);
    assert_eq!(rig.eye, Vec3::new(100.0, -100.0, 200.0));
    assert_eq!(rig.target, Vec3::new(100.0, 100.0, 0.0));
}

#[test]
fn fixed_frame_honors_camera_position_override() {
    let config =
        RendererConfig::new(200.0, 200.0).with_camera_position(Vec3::new(10.0, -50.0, 80.0));
    let rig = fixed_frame(&config);
    assert_eq!(rig.eye, Vec3::new(10.0, -50.0, 80.0));
}

#[test]
fn fixed_frame_rotation_override_changes_orientation() {
    let config = RendererConfig::new(200.0, 200.0);
    let rotated = config
        .clone()
        .with_camera_rotation(Vec3::new(std::f32::consts::FRAC_PI_4, 0.0, 0.0));

    let plain = fixed_frame(&config);
    let overridden = fixed_frame(&rotated);
    assert_ne!(plain.view_projection, overridden.view_projection);
    for value in overridden.view_projection.to_cols_array() {
        assert!(value.is_finite());
    }
}

proptest! {
    // Doubling every bbox extent doubles the normal-mode scale.
    #[test]
    fn normal_scale_is_linear_in_largest_extent(
        xmin in -200.0f32..200.0,
        ymin in -200.0f32..200.0,
        zmin in 0.0f32..50.0,
        dx in 1.0f32..300.0,
        dy in 1.0f32..300.0,
        dz in 1.0f32..300.0,
    ) {
        let config = RendererConfig::default();
        let single = BoundingBox::new(xmin, xmin + dx, ymin, ymin + dy, zmin, zmin + dz).unwrap();
        let doubled =
            BoundingBox::new(xmin, xmin + 2.0 * dx, ymin, ymin + 2.0 * dy, zmin, zmin + 2.0 * dz)
                .unwrap();

        let (_, scale) = auto_scale(&model_with_bbox(single, PrintMode::Normal, 0.0), &config);
        let (_, scale2) = auto_scale(&model_with_bbox(doubled, PrintMode::Normal, 0.0), &config);
        prop_assert!((scale2 - 2.0 * scale).abs() <= 1e-3 * scale2.abs());
    }
}
