//! Camera state and its validated construction.
//!
//! A [`CameraState`] is the whole input to every coordinate conversion. It is
//! `Copy`: hosts keep one mutable camera and hand a copy (a frame snapshot)
//! to whatever converts points during that frame.

use serde::{Deserialize, Serialize};

use crate::point::Point2;
use crate::CameraError;

/// Serializable camera settings, as found in configuration files.
///
/// Converted into a [`CameraState`] with [`CameraState::from_config`], which
/// is where the invariants are checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space point at the middle of the viewport.
    pub center: Point2,
    /// Half-height of the visible world region at zoom 1, in world units.
    pub extent: f64,
    /// Multiplier applied to the viewport-to-projection scale.
    pub zoom: f64,
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Camera roll in radians. `0.0` disables the rotation step.
    pub roll: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            center: Point2::new(0.0, 20.0),
            extent: 25.0,
            zoom: 1.0,
            width: 1280.0,
            height: 800.0,
            roll: 0.0,
        }
    }
}

/// Camera parameters shared by all coordinate conversions.
///
/// Fields are private so the invariants hold for every value of this type:
/// `extent`, `zoom`, `width` and `height` are finite and strictly positive,
/// `center` and `roll` are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraState {
    center: Point2,
    extent: f64,
    zoom: f64,
    width: f64,
    height: f64,
    roll: f64,
}

impl CameraState {
    /// Create a camera with no roll.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] if any value is non-finite, or if `extent`,
    /// `zoom`, `width` or `height` is not strictly positive.
    pub fn new(
        center: Point2,
        extent: f64,
        zoom: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, CameraError> {
        Self::from_config(&CameraConfig {
            center,
            extent,
            zoom,
            width,
            height,
            roll: 0.0,
        })
    }

    /// Build a camera from configuration values.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CameraState::new`], plus a non-finite `roll`.
    pub fn from_config(config: &CameraConfig) -> Result<Self, CameraError> {
        Ok(Self {
            center: check_point("center", config.center)?,
            extent: check_positive("extent", config.extent)?,
            zoom: check_positive("zoom", config.zoom)?,
            width: check_positive("width", config.width)?,
            height: check_positive("height", config.height)?,
            roll: check_finite("roll", config.roll)?,
        })
    }

    /// The settings this camera was built from (or has been updated to).
    #[must_use]
    pub fn to_config(&self) -> CameraConfig {
        CameraConfig {
            center: self.center,
            extent: self.extent,
            zoom: self.zoom,
            width: self.width,
            height: self.height,
            roll: self.roll,
        }
    }

    // -- accessors ----------------------------------------------------------

    /// World-space point at the middle of the viewport.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Half-height of the visible world region at zoom 1.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Zoom multiplier.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Viewport width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Viewport height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Camera roll in radians.
    #[must_use]
    pub fn roll(&self) -> f64 {
        self.roll
    }

    /// Width over height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    // -- validated setters ----------------------------------------------------

    /// Move the camera to look at `center`.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::NonFinite`] if either coordinate is non-finite.
    pub fn set_center(&mut self, center: Point2) -> Result<(), CameraError> {
        self.center = check_point("center", center)?;
        Ok(())
    }

    /// Change the visible half-height at zoom 1.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] unless `extent` is finite and positive.
    pub fn set_extent(&mut self, extent: f64) -> Result<(), CameraError> {
        self.extent = check_positive("extent", extent)?;
        Ok(())
    }

    /// Change the zoom multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] unless `zoom` is finite and positive.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), CameraError> {
        self.zoom = check_positive("zoom", zoom)?;
        Ok(())
    }

    /// Change the viewport size, e.g. after a window resize.
    ///
    /// Both values are checked before either is written.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError`] unless both sizes are finite and positive.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Result<(), CameraError> {
        let width = check_positive("width", width)?;
        let height = check_positive("height", height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Change the camera roll. `0.0` turns the rotation step off.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::NonFinite`] if `roll` is non-finite.
    pub fn set_roll(&mut self, roll: f64) -> Result<(), CameraError> {
        self.roll = check_finite("roll", roll)?;
        Ok(())
    }
}

impl Default for CameraState {
    fn default() -> Self {
        let c = CameraConfig::default();
        Self {
            center: c.center,
            extent: c.extent,
            zoom: c.zoom,
            width: c.width,
            height: c.height,
            roll: c.roll,
        }
    }
}

impl TryFrom<CameraConfig> for CameraState {
    type Error = CameraError;

    fn try_from(config: CameraConfig) -> Result<Self, Self::Error> {
        Self::from_config(&config)
    }
}

impl<'de> Deserialize<'de> for CameraState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = CameraConfig::deserialize(deserializer)?;
        Self::from_config(&config).map_err(serde::de::Error::custom)
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<f64, CameraError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CameraError::NonFinite { field, value })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<f64, CameraError> {
    let value = check_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CameraError::NonPositive { field, value })
    }
}

fn check_point(field: &'static str, p: Point2) -> Result<Point2, CameraError> {
    check_finite(field, p.x)?;
    check_finite(field, p.y)?;
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_matches_default_config() {
        let cam = CameraState::default();
        assert_eq!(cam.to_config(), CameraConfig::default());
        assert_eq!(cam.center(), Point2::new(0.0, 20.0));
        assert_eq!(cam.extent(), 25.0);
        assert_eq!(cam.zoom(), 1.0);
        assert_eq!((cam.width(), cam.height()), (1280.0, 800.0));
        assert_eq!(cam.roll(), 0.0);
    }

    #[test]
    fn new_rejects_zero_extent() {
        let err = CameraState::new(Point2::ZERO, 0.0, 1.0, 100.0, 100.0).unwrap_err();
        assert!(matches!(err, CameraError::NonPositive { field: "extent", .. }));
    }

    #[test]
    fn new_rejects_negative_zoom() {
        let err = CameraState::new(Point2::ZERO, 1.0, -2.0, 100.0, 100.0).unwrap_err();
        assert!(matches!(err, CameraError::NonPositive { field: "zoom", .. }));
    }

    #[test]
    fn new_rejects_zero_viewport() {
        assert!(CameraState::new(Point2::ZERO, 1.0, 1.0, 0.0, 100.0).is_err());
        assert!(CameraState::new(Point2::ZERO, 1.0, 1.0, 100.0, 0.0).is_err());
    }

    #[test]
    fn new_rejects_nan_center() {
        let err = CameraState::new(Point2::new(f64::NAN, 0.0), 1.0, 1.0, 10.0, 10.0).unwrap_err();
        assert!(matches!(err, CameraError::NonFinite { field: "center", .. }));
    }

    #[test]
    fn infinite_zoom_is_non_finite_not_non_positive() {
        let err = CameraState::new(Point2::ZERO, 1.0, f64::INFINITY, 10.0, 10.0).unwrap_err();
        assert!(matches!(err, CameraError::NonFinite { field: "zoom", .. }));
    }

    #[test]
    fn failed_setter_leaves_state_untouched() {
        let mut cam = CameraState::default();
        assert!(cam.set_zoom(0.0).is_err());
        assert_eq!(cam.zoom(), 1.0);
        assert!(cam.set_viewport(640.0, -1.0).is_err());
        assert_eq!((cam.width(), cam.height()), (1280.0, 800.0));
    }

    #[test]
    fn setters_update_fields() {
        let mut cam = CameraState::default();
        cam.set_center(Point2::new(5.0, -5.0)).unwrap();
        cam.set_extent(10.0).unwrap();
        cam.set_zoom(2.0).unwrap();
        cam.set_viewport(640.0, 480.0).unwrap();
        cam.set_roll(0.5).unwrap();
        assert_eq!(
            cam.to_config(),
            CameraConfig {
                center: Point2::new(5.0, -5.0),
                extent: 10.0,
                zoom: 2.0,
                width: 640.0,
                height: 480.0,
                roll: 0.5,
            }
        );
        assert!((cam.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn try_from_config() {
        let cfg = CameraConfig {
            zoom: 0.0,
            ..CameraConfig::default()
        };
        assert!(CameraState::try_from(cfg).is_err());
        assert!(CameraState::try_from(CameraConfig::default()).is_ok());
    }

    #[test]
    fn deserialize_validates() {
        let ok: CameraState =
            serde_json::from_str(r#"{"center":{"x":1.0,"y":2.0},"extent":5.0}"#).unwrap();
        assert_eq!(ok.center(), Point2::new(1.0, 2.0));
        assert_eq!(ok.extent(), 5.0);
        assert_eq!(ok.zoom(), 1.0);

        let bad = serde_json::from_str::<CameraState>(r#"{"extent":-1.0}"#);
        assert!(bad.is_err());
    }
}
