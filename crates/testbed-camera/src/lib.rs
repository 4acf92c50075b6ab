//! Testbed Camera -- coordinate mapping between pixel and world space.
//!
//! This crate holds the camera used by the testbed's debug renderer and
//! input handling. A [`CameraState`](camera::CameraState) describes what part
//! of the simulation world is visible and how large the drawing surface is;
//! the mapper converts points between four spaces:
//!
//! | Space | Origin | Units | y axis |
//! |-------|--------|-------|--------|
//! | Element | surface top-left | pixels | down |
//! | Viewport | surface centre | pixels | up |
//! | Projection | surface centre | world units | up |
//! | World | simulation origin | world units | up |
//!
//! Conversions are pure functions of a camera snapshot and a point. They do
//! not validate anything: the camera is validated when it is built or
//! changed, so the per-frame hot path is plain arithmetic.
//!
//! # Quick Start
//!
//! ```
//! use testbed_camera::prelude::*;
//!
//! let camera = CameraState::default(); // 1280x800, centre (0, 20), extent 25
//! let world = camera.screen_to_world(Point2::new(1280.0, 0.0));
//! assert_eq!(world, Point2::new(40.0, 45.0));
//! assert_eq!(camera.world_to_screen(world), Point2::new(1280.0, 0.0));
//! ```

#![deny(unsafe_code)]

pub mod camera;
pub mod controller;
pub mod mapper;
pub mod point;
pub mod step;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when building or updating a camera.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    /// A value that must be strictly positive was zero or negative.
    #[error("camera {field} must be positive, got {value}")]
    NonPositive {
        field: &'static str,
        value: f64,
    },

    /// A value was NaN or infinite.
    #[error("camera {field} must be finite, got {value}")]
    NonFinite {
        field: &'static str,
        value: f64,
    },

    /// A `[min, max]` pair does not describe a usable range.
    #[error("camera {field} range [{min}, {max}] is invalid")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::camera::{CameraConfig, CameraState};
    pub use crate::controller::{CameraController, ControllerSettings};
    pub use crate::mapper::Space;
    pub use crate::point::Point2;
    pub use crate::step::{Step, StepChain};
    pub use crate::CameraError;
}
