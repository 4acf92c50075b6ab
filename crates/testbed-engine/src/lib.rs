//! Testbed Engine -- physics testbed host built around the testbed camera.
//!
//! This crate wires a rapier2d world to the coordinate mapper from
//! [`testbed_camera`]: a fixed-step clock advances the physics, the world is
//! walked through the [`DebugDraw`](render::draw::DebugDraw) seam into
//! world-space draw commands, and those commands are tessellated against a
//! camera snapshot for the GPU. With the `renderer` feature the same
//! pipeline runs in a winit window with mouse and keyboard camera control.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use testbed_engine::prelude::*;
//!
//! let config = TestbedConfig::default();
//! let mut physics = PhysicsWorld::new(config.physics.gravity);
//! let ball = physics
//!     .add_body(&BodyDesc::dynamic(ColliderShape::Circle { radius: 0.5 }, Point2::new(0.0, 20.0)))
//!     .unwrap();
//!
//! let mut testbed = Testbed::new(&config, physics).unwrap();
//! assert_eq!(testbed.advance(Duration::from_millis(110)), 6);
//!
//! // Clicking the middle of the default 1280x800 window picks the ball at (0, 20).
//! let picked = testbed.pick(Point2::new(640.0, 400.0));
//! assert_eq!(picked, Some(ball));
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod physics;
pub mod render;
pub mod testbed;
pub mod tick;

use std::path::PathBuf;

use physics::BodyId;
use testbed_camera::point::Point2;
use testbed_camera::CameraError;

/// Re-export the camera crate for convenience.
pub use testbed_camera;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON was malformed or had the wrong shape.
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    /// Camera or controller values were rejected.
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// The physics step rate is unusable.
    #[error("step rate must be positive with at least one substep, got {hz} Hz and {max_substeps} substeps")]
    InvalidStepRate { hz: f64, max_substeps: u32 },

    /// The window has no area.
    #[error("window size must be non-zero, got {width}x{height}")]
    InvalidWindow { width: u32, height: u32 },

    /// Gravity had a NaN or infinite component.
    #[error("gravity must be finite, got ({}, {})", .0.x, .0.y)]
    InvalidGravity(Point2),
}

/// Errors produced when building bodies and joints.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    /// A size that must be positive was zero, negative or non-finite.
    #[error("{field} must be positive and finite, got {value}")]
    InvalidSize { field: &'static str, value: f64 },

    /// A point list was too short for its shape.
    #[error("{shape} needs at least {min} vertices, got {got}")]
    TooFewVertices {
        shape: &'static str,
        min: usize,
        got: usize,
    },

    /// The points enclose no area (or a segment has zero length).
    #[error("shape vertices are degenerate")]
    DegeneratePolygon,

    /// The id does not name a live body.
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    /// A joint was asked to connect a body to itself.
    #[error("joint connects body {0} to itself")]
    SameBody(BodyId),

    /// A prismatic axis had zero length.
    #[error("prismatic joint axis must be non-zero")]
    DegenerateAxis,
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common testbed usage.
pub mod prelude {
    // Camera types.
    pub use testbed_camera::prelude::*;

    pub use crate::config::{PhysicsConfig, TestbedConfig, WindowConfig};
    pub use crate::physics::{
        BodyDesc, BodyId, BodyKind, BodyState, ColliderShape, CollisionPair, JointDesc, JointId,
        JointKind, PhysicsWorld,
    };
    pub use crate::render::draw::{Color, DebugDraw, DrawFlags, Pose};
    pub use crate::render::geometry::{build_frame, FrameGeometry, Vertex};
    pub use crate::render::recorder::{CommandRecorder, DrawCommand};
    pub use crate::testbed::Testbed;
    pub use crate::tick::{FixedStepper, StepConfig};
    pub use crate::{ConfigError, PhysicsError};

    #[cfg(feature = "renderer")]
    pub use crate::render::{app::run_windowed, renderer::DebugRenderer};
}
