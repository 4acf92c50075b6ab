//! Interactive pan/zoom/resize handling for a single camera.
//!
//! [`CameraController`] is the one writer of a host's camera. Input handlers
//! (mouse drag, wheel, keyboard, window resize) call into it between frames;
//! the render path takes a [`snapshot`](CameraController::snapshot) once per
//! frame and converts every point of that frame against the copy.
//!
//! Zoom follows the camera's convention: the zoom value multiplies the
//! world units shown per pixel, so *decreasing* it magnifies.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::CameraState;
use crate::point::Point2;
use crate::CameraError;

/// Tuning for interactive camera control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Factor applied per zoom step (wheel notch or key press). Must be > 1.
    pub zoom_step: f64,
    /// Smallest allowed zoom value (most magnified).
    pub min_zoom: f64,
    /// Largest allowed zoom value (least magnified).
    pub max_zoom: f64,
    /// Keyboard pan distance per press, in pixels.
    pub pan_step_px: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            min_zoom: 0.01,
            max_zoom: 100.0,
            pan_step_px: 32.0,
        }
    }
}

impl ControllerSettings {
    /// Check that the settings describe a usable zoom range.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] for a non-finite or non-positive value, or
    /// [`CameraError::InvalidRange`] if `min_zoom > max_zoom` or
    /// `zoom_step <= 1`.
    pub fn validate(&self) -> Result<(), CameraError> {
        for (field, value) in [
            ("zoom_step", self.zoom_step),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("pan_step_px", self.pan_step_px),
        ] {
            if !value.is_finite() {
                return Err(CameraError::NonFinite { field, value });
            }
            if value <= 0.0 {
                return Err(CameraError::NonPositive { field, value });
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(CameraError::InvalidRange {
                field: "zoom",
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if self.zoom_step <= 1.0 {
            return Err(CameraError::InvalidRange {
                field: "zoom_step",
                min: 1.0,
                max: self.zoom_step,
            });
        }
        Ok(())
    }
}

/// Owns the live camera and applies user interaction to it.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: CameraState,
    home: CameraState,
    settings: ControllerSettings,
    drag_anchor: Option<Point2>,
}

impl CameraController {
    /// Create a controller whose reset target is `camera`.
    ///
    /// The camera's zoom is clamped into the settings' range.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] if `settings` fail [`ControllerSettings::validate`].
    pub fn new(camera: CameraState, settings: ControllerSettings) -> Result<Self, CameraError> {
        settings.validate()?;
        let mut camera = camera;
        camera.set_zoom(camera.zoom().clamp(settings.min_zoom, settings.max_zoom))?;
        Ok(Self {
            camera,
            home: camera,
            settings,
            drag_anchor: None,
        })
    }

    /// Copy of the current camera, for one frame's worth of conversions.
    #[must_use]
    pub fn snapshot(&self) -> CameraState {
        self.camera
    }

    /// The current camera.
    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// The active settings.
    #[must_use]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Whether a pointer drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Apply a new viewport size. Centre, extent and zoom are kept.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] for a zero, negative or non-finite size; the
    /// camera is left unchanged.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), CameraError> {
        self.camera.set_viewport(width, height)?;
        self.home.set_viewport(width, height)?;
        debug!(width, height, "camera viewport resized");
        Ok(())
    }

    /// Pan so the world point under the cursor moves with a pixel delta.
    ///
    /// `dx`/`dy` are element-space deltas (y down), as reported by pointer
    /// motion events.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) {
        let from = self.camera.element_to_world(Point2::ZERO);
        let to = self.camera.element_to_world(Point2::new(dx, dy));
        self.shift_center(from - to);
    }

    /// Pan by a world-space displacement.
    pub fn pan_world(&mut self, dx: f64, dy: f64) {
        self.shift_center(Point2::new(dx, dy));
    }

    /// Keyboard pan: `steps_x`/`steps_y` multiples of the pan step, in
    /// screen directions (positive y moves the view up).
    pub fn pan_steps(&mut self, steps_x: f64, steps_y: f64) {
        let step = self.camera.pixels_to_world(self.settings.pan_step_px);
        self.pan_world(steps_x * step, steps_y * step);
    }

    /// Multiply the zoom by `factor` while keeping the world point under the
    /// pixel `anchor` fixed on screen.
    ///
    /// The resulting zoom is clamped into `[min_zoom, max_zoom]`.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] if `factor` is not finite and positive.
    pub fn zoom_at(&mut self, anchor: Point2, factor: f64) -> Result<(), CameraError> {
        if !factor.is_finite() {
            return Err(CameraError::NonFinite {
                field: "zoom_factor",
                value: factor,
            });
        }
        if factor <= 0.0 {
            return Err(CameraError::NonPositive {
                field: "zoom_factor",
                value: factor,
            });
        }
        let before = self.camera.element_to_world(anchor);
        let zoom = (self.camera.zoom() * factor).clamp(self.settings.min_zoom, self.settings.max_zoom);
        self.camera.set_zoom(zoom)?;
        let after = self.camera.element_to_world(anchor);
        self.shift_center(before - after);
        debug!(zoom, anchor_x = anchor.x, anchor_y = anchor.y, "camera zoomed");
        Ok(())
    }

    /// Magnify by one step about the viewport centre.
    pub fn zoom_in(&mut self) {
        self.zoom_about_center(1.0 / self.settings.zoom_step);
    }

    /// Shrink by one step about the viewport centre.
    pub fn zoom_out(&mut self) {
        self.zoom_about_center(self.settings.zoom_step);
    }

    /// Zoom by wheel notches at the cursor; positive notches magnify.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] if `notches` is non-finite.
    pub fn wheel(&mut self, anchor: Point2, notches: f64) -> Result<(), CameraError> {
        self.zoom_at(anchor, self.settings.zoom_step.powf(-notches))
    }

    /// Start a pointer drag at a pixel position.
    pub fn drag_begin(&mut self, at: Point2) {
        self.drag_anchor = Some(at);
    }

    /// Continue a drag; pans by the motion since the last update.
    ///
    /// Does nothing when no drag is active.
    pub fn drag_update(&mut self, at: Point2) {
        if let Some(last) = self.drag_anchor {
            let delta = at - last;
            self.pan_by_pixels(delta.x, delta.y);
            self.drag_anchor = Some(at);
        }
    }

    /// End the current drag.
    pub fn drag_end(&mut self) {
        self.drag_anchor = None;
    }

    /// Return to the home camera (viewport size is kept).
    pub fn reset(&mut self) {
        self.camera = self.home;
        self.drag_anchor = None;
        debug!("camera reset to home");
    }

    fn zoom_about_center(&mut self, factor: f64) {
        let center = Point2::new(self.camera.width() / 2.0, self.camera.height() / 2.0);
        // The step factor was validated with the settings, so this cannot fail.
        if let Err(e) = self.zoom_at(center, factor) {
            tracing::warn!(error = %e, "zoom step rejected");
        }
    }

    fn shift_center(&mut self, delta: Point2) {
        let center = self.camera.center() + delta;
        match self.camera.set_center(center) {
            Ok(()) => debug!(x = center.x, y = center.y, "camera panned"),
            Err(e) => tracing::warn!(error = %e, "pan produced a non-finite centre; ignored"),
        }
    }
}
