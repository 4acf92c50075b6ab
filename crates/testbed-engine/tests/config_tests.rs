//! Config files on disk feeding a session.

use std::path::PathBuf;

use testbed_engine::prelude::*;

/// A per-test file under the system temp dir, removed on drop.
struct TempConfig(PathBuf);

impl TempConfig {
    fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "testbed-engine-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        Self(path)
    }
}

impl Drop for TempConfig {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn saved_config_loads_back_identically() {
    let mut config = TestbedConfig::default();
    config.window.width = 1024;
    config.window.height = 768;
    config.camera.center = Point2::new(3.0, -2.0);
    config.camera.roll = 0.25;
    config.controller.zoom_step = 1.25;
    config.draw.contact_points = true;
    config.physics.step.hz = 120.0;

    let file = TempConfig::new("round-trip", &config.to_json_string().unwrap());
    let loaded = TestbedConfig::from_file(&file.0).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn loaded_file_drives_the_session() {
    let file = TempConfig::new(
        "session",
        r#"{
            "window": { "width": 400, "height": 400 },
            "camera": { "center": { "x": 10.0, "y": 0.0 }, "extent": 5.0 },
            "draw": { "body_labels": true },
            "physics": { "gravity": { "x": 0.0, "y": 0.0 }, "step": { "hz": 30.0 } }
        }"#,
    );
    let config = TestbedConfig::from_file(&file.0).unwrap();

    let mut physics = PhysicsWorld::new(config.physics.gravity);
    let ball = physics
        .add_body(&BodyDesc::dynamic(
            ColliderShape::Circle { radius: 0.5 },
            Point2::new(10.0, 0.0),
        ))
        .unwrap();
    let mut tb = Testbed::new(&config, physics).unwrap();

    let camera = tb.camera();
    assert_eq!(camera.width(), 400.0);
    assert_eq!(camera.height(), 400.0);
    // 2 * 5 / 400 units per pixel.
    assert!((camera.world_units_per_pixel() - 0.025).abs() < 1e-12);
    assert_eq!(tb.pick(Point2::new(200.0, 200.0)), Some(ball));
    assert!(tb.flags().body_labels);
    assert!((tb.stepper().fixed_dt() - 1.0 / 30.0).abs() < 1e-12);
}

#[test]
fn invalid_file_is_rejected_before_a_session_exists() {
    let file = TempConfig::new(
        "invalid",
        r#"{ "controller": { "min_zoom": 5.0, "max_zoom": 1.0 } }"#,
    );
    let err = TestbedConfig::from_file(&file.0).unwrap_err();
    assert!(matches!(err, ConfigError::Camera(CameraError::InvalidRange { .. })));
}
