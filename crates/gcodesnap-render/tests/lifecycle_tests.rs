//! Renderer lifecycle state machine behavior, exercised through the
//! backend seam without a GPU context.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};

use common::MockBackend;
use gcodesnap_core::{GeometryModel, PrintMode, RendererConfig};
use gcodesnap_render::{RenderError, Renderer, RendererState, Topology};

fn small_config() -> RendererConfig {
    RendererConfig::new(200.0, 200.0).with_size(8, 8)
}

fn one_segment_model() -> GeometryModel {
    GeometryModel::new(
        vec![50.0, 50.0, 0.0, 150.0, 150.0, 10.0],
        None,
        PrintMode::Normal,
        0.0,
    )
    .unwrap()
}

fn initialized_renderer() -> (Renderer, std::rc::Rc<std::cell::RefCell<common::FrameLog>>) {
    let (backend, log) = MockBackend::new(8, 8);
    let mut renderer = Renderer::new(small_config());
    renderer.initialize_with_backend(Box::new(backend)).unwrap();
    (renderer, log)
}

#[test]
fn render_before_initialize_is_a_lifecycle_error() {
    let mut renderer = Renderer::new(small_config());
    let err = renderer.render_model(&one_segment_model(), true).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Lifecycle {
            operation: "render_model",
            state: RendererState::Uninitialized,
        }
    ));
}

#[test]
fn render_draws_part_then_bed() {
    let (mut renderer, log) = initialized_renderer();
    renderer.render_model(&one_segment_model(), true).unwrap();
    assert_eq!(renderer.state(), RendererState::HasFrame);

    let log = log.borrow();
    assert_eq!(log.frames_begun, 1);
    assert_eq!(log.frames_finished, 1);
    assert_eq!(log.draws.len(), 1);

    let (_, batches) = &log.draws[0];
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].topology, Topology::Lines);
    assert_eq!(batches[0].vertices.len(), 6);
    assert_eq!(batches[1].topology, Topology::Triangles);
    assert_eq!(batches[1].vertex_count(), 6);
}

#[test]
fn rendering_zero_segments_still_draws_the_bed() {
    let (mut renderer, log) = initialized_renderer();
    let empty = GeometryModel::new(Vec::new(), None, PrintMode::Normal, 0.0).unwrap();
    renderer.render_model(&empty, true).unwrap();
    assert_eq!(renderer.state(), RendererState::HasFrame);

    let log = log.borrow();
    let (_, batches) = &log.draws[0];
    assert!(batches[0].is_empty());
    assert_eq!(batches[1].vertex_count(), 6);
}

#[test]
fn second_initialize_is_a_no_op() {
    let (mut renderer, log) = initialized_renderer();
    let (other, other_log) = MockBackend::new(8, 8);
    renderer.initialize_with_backend(Box::new(other)).unwrap();

    renderer.render_model(&one_segment_model(), false).unwrap();
    assert_eq!(log.borrow().draws.len(), 1, "first backend kept");
    assert_eq!(other_log.borrow().draws.len(), 0, "second backend ignored");
}

#[test]
fn save_before_any_render_is_a_capture_mismatch() {
    let (mut renderer, _log) = initialized_renderer();
    let dir = tempfile::tempdir().unwrap();
    let err = renderer
        .save(&dir.path().join("preview.png"), &gcodesnap_render::FileEncoder)
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::CaptureMismatch {
            expected: 256,
            actual: 0,
        }
    ));
}

#[test]
fn save_after_render_writes_the_thumbnail() {
    let (mut renderer, _log) = initialized_renderer();
    renderer.render_model(&one_segment_model(), true).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("preview.png");
    renderer
        .save(&destination, &gcodesnap_render::FileEncoder)
        .unwrap();

    let written = image::open(&destination).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (8, 8));
}

#[test]
fn clear_redraws_only_the_bed() {
    let (mut renderer, log) = initialized_renderer();
    renderer.render_model(&one_segment_model(), true).unwrap();
    renderer.clear().unwrap();
    assert_eq!(renderer.state(), RendererState::HasFrame);

    let log = log.borrow();
    let (camera, batches) = log.draws.last().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].topology, Topology::Triangles);
    // Bed redraw reuses the camera of the preceding render.
    assert_eq!(*camera, log.draws[0].0);
}

#[test]
fn close_is_idempotent_and_releases_once() {
    let (mut renderer, log) = initialized_renderer();
    renderer.close().unwrap();
    renderer.close().unwrap();
    assert_eq!(renderer.state(), RendererState::Closed);
    assert_eq!(log.borrow().shutdowns, 1);
}

#[test]
fn close_before_initialize_is_a_no_op() {
    let mut renderer = Renderer::new(small_config());
    renderer.close().unwrap();
    assert_eq!(renderer.state(), RendererState::Uninitialized);
}

#[test]
fn render_after_close_errors_without_crashing() {
    let (mut renderer, _log) = initialized_renderer();
    renderer.close().unwrap();
    let err = renderer.render_model(&one_segment_model(), true).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Lifecycle {
            state: RendererState::Closed,
            ..
        }
    ));
}

#[test]
fn interactive_loop_stops_on_cancellation() {
    let (mut renderer, log) = initialized_renderer();
    let cancel = AtomicBool::new(false);
    let mut presented = 0usize;

    renderer
        .run_interactive(&one_segment_model(), true, &cancel, || {
            presented += 1;
            if presented == 3 {
                cancel.store(true, Ordering::Relaxed);
            }
        })
        .unwrap();

    assert_eq!(presented, 3);
    assert_eq!(renderer.state(), RendererState::HasFrame);
    assert_eq!(log.borrow().frames_begun, 3);
}

#[test]
fn initialize_rejects_degenerate_configuration() {
    let (backend, _log) = MockBackend::new(8, 8);
    let mut renderer = Renderer::new(RendererConfig::new(0.0, 200.0).with_size(8, 8));
    let err = renderer.initialize_with_backend(Box::new(backend)).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig { .. }));

    let (backend, _log) = MockBackend::new(8, 8);
    let mut renderer = Renderer::new(RendererConfig::new(200.0, 200.0).with_size(8, 0));
    let err = renderer.initialize_with_backend(Box::new(backend)).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig { .. }));
}
