//! Testbed configuration, loaded from JSON.
//!
//! Every section has defaults, so an empty object is a valid file:
//!
//! ```
//! use testbed_engine::config::TestbedConfig;
//!
//! let config = TestbedConfig::from_json_str("{}").unwrap();
//! assert_eq!(config.window.width, 1280);
//! assert_eq!(config.physics.step.hz, 60.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use testbed_camera::camera::{CameraConfig, CameraState};
use testbed_camera::controller::ControllerSettings;
use testbed_camera::point::Point2;

use crate::render::draw::DrawFlags;
use crate::tick::StepConfig;
use crate::ConfigError;

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial inner width in pixels.
    pub width: u32,
    /// Initial inner height in pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Testbed".to_owned(),
            width: 1280,
            height: 800,
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector in world units per second squared.
    pub gravity: Point2,
    /// Fixed step rate.
    pub step: StepConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Point2::new(0.0, -10.0),
            step: StepConfig::default(),
        }
    }
}

/// Everything the testbed host reads at start-up.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestbedConfig {
    /// Window settings. The window size also sets the camera viewport.
    pub window: WindowConfig,
    /// Initial camera. `width`/`height` are taken from the window.
    pub camera: CameraConfig,
    /// Interactive camera tuning.
    pub controller: ControllerSettings,
    /// Debug-draw layers enabled at start-up.
    pub draw: DrawFlags,
    /// Simulation settings.
    pub physics: PhysicsConfig,
}

impl TestbedConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or the error from
    /// [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json_str`](Self::from_json_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "testbed config loaded");
        Ok(config)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWindow`] for a zero-sized window,
    /// [`ConfigError::Camera`] for invalid camera or controller values and
    /// [`ConfigError::InvalidStepRate`] for a bad step rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidWindow {
                width: self.window.width,
                height: self.window.height,
            });
        }
        self.camera_state()?;
        self.controller.validate()?;
        if !self.physics.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(self.physics.gravity));
        }
        self.physics.step.validate()?;
        Ok(())
    }

    /// The initial camera, sized to the window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Camera`] if the camera section is invalid.
    pub fn camera_state(&self) -> Result<CameraState, ConfigError> {
        let config = CameraConfig {
            width: f64::from(self.window.width),
            height: f64::from(self.window.height),
            ..self.camera
        };
        Ok(CameraState::from_config(&config)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use testbed_camera::CameraError;

    use super::*;

    #[test]
    fn defaults_match_scenario_camera() {
        let config = TestbedConfig::default();
        config.validate().unwrap();
        let camera = config.camera_state().unwrap();
        assert_eq!((camera.width(), camera.height()), (1280.0, 800.0));
        assert_eq!(camera.center(), Point2::new(0.0, 20.0));
        assert_eq!(camera.extent(), 25.0);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn window_size_overrides_camera_size() {
        let config = TestbedConfig::from_json_str(
            r#"{"window": {"width": 640, "height": 480}, "camera": {"width": 10, "height": 10}}"#,
        )
        .unwrap();
        let camera = config.camera_state().unwrap();
        assert_eq!((camera.width(), camera.height()), (640.0, 480.0));
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config =
            TestbedConfig::from_json_str(r#"{"camera": {"zoom": 2.0}, "draw": {"aabbs": true}}"#)
                .unwrap();
        assert_eq!(config.camera.zoom, 2.0);
        assert_eq!(config.camera.extent, 25.0);
        assert!(config.draw.aabbs && config.draw.shapes);
        assert_eq!(config.window.title, "Testbed");
    }

    #[test]
    fn invalid_camera_is_reported() {
        let err = TestbedConfig::from_json_str(r#"{"camera": {"extent": 0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Camera(CameraError::NonPositive { field: "extent", .. })
        ));
    }

    #[test]
    fn invalid_controller_is_reported() {
        let err = TestbedConfig::from_json_str(r#"{"controller": {"min_zoom": 5, "max_zoom": 1}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Camera(CameraError::InvalidRange { .. })));
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = TestbedConfig::from_json_str(r#"{"window": {"width": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWindow { width: 0, .. }));
    }

    #[test]
    fn bad_step_rate_is_rejected() {
        let err =
            TestbedConfig::from_json_str(r#"{"physics": {"step": {"hz": 0}}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStepRate { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = TestbedConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = TestbedConfig::from_file("/nonexistent/testbed.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/testbed.json"));
    }

    #[test]
    fn json_round_trip() {
        let mut config = TestbedConfig::default();
        config.window.title = "Pendulum".to_owned();
        config.physics.gravity = Point2::new(0.0, -3.5);
        let json = config.to_json_string().unwrap();
        let back = TestbedConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
