//! End-to-end camera scenarios: a testbed-sized canvas, mouse picking under
//! pan and zoom, and configuration round trips.

use testbed_camera::prelude::*;

/// 1280x800 canvas looking at (0, 20) with a 25-unit half-height.
fn testbed_camera() -> CameraState {
    CameraState::new(Point2::new(0.0, 20.0), 25.0, 1.0, 1280.0, 800.0).unwrap()
}

// ---------------------------------------------------------------------------
// Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn canvas_center_through_every_space() {
    let cam = testbed_camera();
    let e = Point2::new(640.0, 400.0);
    assert_eq!(cam.convert(Space::Element, Space::Viewport, e), Point2::new(0.0, 0.0));
    assert_eq!(cam.convert(Space::Element, Space::Projection, e), Point2::new(0.0, 0.0));
    assert_eq!(cam.convert(Space::Element, Space::World, e), Point2::new(0.0, 20.0));
}

#[test]
fn top_right_corner_through_every_space() {
    let cam = testbed_camera();
    let e = Point2::new(1280.0, 0.0);
    assert_eq!(cam.convert(Space::Element, Space::Viewport, e), Point2::new(640.0, 400.0));
    assert_eq!(cam.convert(Space::Element, Space::Projection, e), Point2::new(40.0, 25.0));
    assert_eq!(cam.convert(Space::Element, Space::World, e), Point2::new(40.0, 45.0));
}

#[test]
fn bottom_left_corner_is_below_and_left_of_center() {
    let cam = testbed_camera();
    let w = cam.element_to_world(Point2::new(0.0, 800.0));
    assert_eq!(w, Point2::new(-40.0, -5.0));
}

#[test]
fn visible_height_is_twice_extent_times_zoom() {
    let mut cam = testbed_camera();
    for zoom in [0.5, 1.0, 2.0, 8.0] {
        cam.set_zoom(zoom).unwrap();
        let (min, max) = cam.visible_world_bounds();
        assert!(((max.y - min.y) - 2.0 * 25.0 * zoom).abs() < 1e-9);
        assert!(((max.x - min.x) - 2.0 * 25.0 * zoom * 1.6).abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Interactive picking stability
// ---------------------------------------------------------------------------

#[test]
fn picking_is_stable_across_pan_and_zoom() {
    let mut ctl = CameraController::new(testbed_camera(), ControllerSettings::default()).unwrap();
    let body = Point2::new(3.25, 12.5);

    for _ in 0..25 {
        ctl.drag_begin(Point2::new(500.0, 500.0));
        ctl.drag_update(Point2::new(517.0, 489.0));
        ctl.drag_end();
        ctl.wheel(Point2::new(700.0, 380.0), 1.0).unwrap();

        let cam = ctl.snapshot();
        let on_screen = cam.world_to_screen(body);
        let picked = cam.screen_to_world(on_screen);
        assert!(picked.approx_eq(body, 1e-9), "picked {picked:?} for {body:?}");
    }
}

#[test]
fn wheel_zoom_keeps_cursor_target_under_cursor() {
    let mut ctl = CameraController::new(testbed_camera(), ControllerSettings::default()).unwrap();
    let cursor = Point2::new(1000.0, 120.0);
    let target = ctl.camera().screen_to_world(cursor);
    for notches in [1.0, 3.0, -2.0, -5.0, 0.5] {
        ctl.wheel(cursor, notches).unwrap();
        let under = ctl.camera().screen_to_world(cursor);
        assert!(under.approx_eq(target, 1e-9), "{under:?} drifted from {target:?}");
    }
}

#[test]
fn resize_keeps_world_center_at_canvas_center() {
    let mut ctl = CameraController::new(testbed_camera(), ControllerSettings::default()).unwrap();
    ctl.resize(1920.0, 1080.0).unwrap();
    let cam = ctl.snapshot();
    assert_eq!(cam.screen_to_world(Point2::new(960.0, 540.0)), Point2::new(0.0, 20.0));
    // Extent stays the half-height, so the world shown per pixel shrinks.
    assert!((cam.world_units_per_pixel() - 50.0 / 1080.0).abs() < 1e-15);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn camera_config_json_round_trip() {
    let cam = testbed_camera();
    let json = serde_json::to_string(&cam.to_config()).unwrap();
    let parsed: CameraConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(CameraState::from_config(&parsed).unwrap(), cam);
}

#[test]
fn invalid_config_reports_field() {
    let cfg: CameraConfig = serde_json::from_str(r#"{"height": 0.0}"#).unwrap();
    let err = CameraState::from_config(&cfg).unwrap_err();
    assert_eq!(err.to_string(), "camera height must be positive, got 0");
}
