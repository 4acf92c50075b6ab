//! The debug-draw seam: colors, poses, draw flags and the [`DebugDraw`] trait.
//!
//! The physics bridge ([`PhysicsWorld::debug_draw`](crate::physics::PhysicsWorld::debug_draw))
//! talks only to this trait. Shapes are emitted in their local frame inside
//! a [`push_transform`](DebugDraw::push_transform) /
//! [`pop_transform`](DebugDraw::pop_transform) pair; implementations decide
//! what "drawing" means (the headless [`CommandRecorder`](super::recorder::CommandRecorder)
//! records commands, a GPU backend tessellates them).

use serde::{Deserialize, Serialize};
use testbed_camera::point::Point2;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGBA color, each channel `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Disabled bodies.
    pub const INACTIVE: Self = Self::rgb(0.5, 0.5, 0.3);
    /// Fixed (static) bodies.
    pub const STATIC: Self = Self::rgb(0.5, 0.9, 0.5);
    /// Kinematic bodies.
    pub const KINEMATIC: Self = Self::rgb(0.5, 0.5, 0.9);
    /// Sleeping dynamic bodies.
    pub const SLEEPING: Self = Self::rgb(0.6, 0.6, 0.6);
    /// Awake dynamic bodies.
    pub const DYNAMIC: Self = Self::rgb(0.9, 0.7, 0.7);
    /// The body picked with the mouse.
    pub const SELECTED: Self = Self::rgb(1.0, 0.85, 0.2);
    /// Joint anchor segments.
    pub const JOINT: Self = Self::rgb(0.5, 0.8, 0.8);
    /// Bounding boxes.
    pub const AABB: Self = Self::rgb(0.9, 0.3, 0.9);
    /// Contact points.
    pub const CONTACT: Self = Self::rgb(0.3, 0.95, 0.3);
    /// Local x axis of a transform.
    pub const AXIS_X: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Local y axis of a transform.
    pub const AXIS_Y: Self = Self::rgb(0.0, 1.0, 0.0);
    /// HUD and label text.
    pub const TEXT: Self = Self::rgb(0.9, 0.6, 0.6);
    /// Particles drawn without per-particle colors.
    pub const PARTICLE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque color from three channels.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Fill color for solid shapes: half intensity, half transparent.
    #[must_use]
    pub fn fill(self) -> Self {
        Self {
            r: self.r * 0.5,
            g: self.g * 0.5,
            b: self.b * 0.5,
            a: 0.5,
        }
    }

    /// Channels as an array, as uploaded to the GPU.
    #[must_use]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

// ---------------------------------------------------------------------------
// Pose
// ---------------------------------------------------------------------------

/// Rigid 2D transform: rotate by `angle`, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation applied after the rotation.
    pub translation: Point2,
    /// Counter-clockwise rotation in radians.
    pub angle: f64,
}

impl Pose {
    /// No rotation, no translation.
    pub const IDENTITY: Self = Self {
        translation: Point2::ZERO,
        angle: 0.0,
    };

    /// Create a pose.
    #[must_use]
    pub const fn new(translation: Point2, angle: f64) -> Self {
        Self { translation, angle }
    }

    /// Map a local point into the parent frame.
    #[must_use]
    pub fn apply(&self, p: Point2) -> Point2 {
        self.rotate(p) + self.translation
    }

    /// Rotate a local direction (no translation).
    #[must_use]
    pub fn rotate(&self, v: Point2) -> Point2 {
        if self.angle == 0.0 {
            return v;
        }
        let (sin, cos) = self.angle.sin_cos();
        Point2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
    }

    /// `self ∘ inner`: first `inner`, then `self`.
    #[must_use]
    pub fn compose(&self, inner: &Pose) -> Pose {
        Pose {
            translation: self.apply(inner.translation),
            angle: self.angle + inner.angle,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// DrawFlags
// ---------------------------------------------------------------------------

/// Which layers the physics bridge emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawFlags {
    /// Collider shapes.
    pub shapes: bool,
    /// Joint anchor segments.
    pub joints: bool,
    /// Collider bounding boxes.
    pub aabbs: bool,
    /// Body centre-of-mass frames.
    pub center_of_mass: bool,
    /// Solver contact points.
    pub contact_points: bool,
    /// Body id labels anchored at each body's origin.
    pub body_labels: bool,
}

impl Default for DrawFlags {
    fn default() -> Self {
        Self {
            shapes: true,
            joints: true,
            aabbs: false,
            center_of_mass: false,
            contact_points: false,
            body_labels: false,
        }
    }
}

// ---------------------------------------------------------------------------
// DebugDraw
// ---------------------------------------------------------------------------

/// Length of the axis lines drawn by [`DebugDraw::draw_transform`], in world units.
pub const AXIS_SCALE: f64 = 0.4;

/// Primitive sink for debug visualization.
///
/// Geometry arguments are in the current local frame (world space when no
/// transform is pushed). Text is the exception: [`draw_string`](Self::draw_string)
/// takes element-space pixels and [`draw_string_world`](Self::draw_string_world)
/// takes a world-space anchor.
pub trait DebugDraw {
    /// Enter a local frame. Nested pushes compose.
    fn push_transform(&mut self, pose: Pose);

    /// Leave the innermost local frame.
    fn pop_transform(&mut self);

    /// Closed polygon outline.
    fn draw_polygon(&mut self, vertices: &[Point2], color: Color);

    /// Filled convex polygon with outline.
    fn draw_solid_polygon(&mut self, vertices: &[Point2], color: Color);

    /// Circle outline.
    fn draw_circle(&mut self, center: Point2, radius: f64, color: Color);

    /// Filled circle with a radius line along `axis` (a unit direction).
    fn draw_solid_circle(&mut self, center: Point2, radius: f64, axis: Point2, color: Color);

    /// Line segment.
    fn draw_segment(&mut self, a: Point2, b: Point2, color: Color);

    /// Square marker `size_px` pixels wide, whatever the zoom.
    fn draw_point(&mut self, p: Point2, size_px: f64, color: Color);

    /// Text with its top-left corner at an element-space pixel position.
    fn draw_string(&mut self, x: f64, y: f64, text: &str, color: Color);

    /// Text anchored at a world-space point.
    fn draw_string_world(&mut self, p: Point2, text: &str, color: Color);

    /// Red x axis and green y axis of a frame.
    fn draw_transform(&mut self, pose: Pose) {
        let origin = pose.translation;
        let x_end = pose.apply(Point2::new(AXIS_SCALE, 0.0));
        let y_end = pose.apply(Point2::new(0.0, AXIS_SCALE));
        self.draw_segment(origin, x_end, Color::AXIS_X);
        self.draw_segment(origin, y_end, Color::AXIS_Y);
    }

    /// Axis-aligned box outline from `min` to `max`.
    fn draw_aabb(&mut self, min: Point2, max: Point2, color: Color) {
        let corners = [
            Point2::new(min.x, min.y),
            Point2::new(max.x, min.y),
            Point2::new(max.x, max.y),
            Point2::new(min.x, max.y),
        ];
        self.draw_polygon(&corners, color);
    }

    /// Equal-radius discs, optionally colored one by one.
    ///
    /// When `colors` is shorter than `centers`, the remaining discs use
    /// [`Color::PARTICLE`].
    fn draw_particles(&mut self, centers: &[Point2], radius: f64, colors: Option<&[Color]>) {
        for (i, &center) in centers.iter().enumerate() {
            let color = colors
                .and_then(|c| c.get(i).copied())
                .unwrap_or(Color::PARTICLE);
            self.draw_solid_circle(center, radius, Point2::new(1.0, 0.0), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn fill_halves_intensity() {
        let c = Color::rgb(0.8, 0.4, 0.2).fill();
        assert_eq!(c, Color { r: 0.4, g: 0.2, b: 0.1, a: 0.5 });
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Color::STATIC.with_alpha(0.25);
        assert_eq!(c.to_array(), [0.5, 0.9, 0.5, 0.25]);
    }

    #[test]
    fn pose_rotates_then_translates() {
        let pose = Pose::new(Point2::new(10.0, 0.0), FRAC_PI_2);
        let p = pose.apply(Point2::new(1.0, 0.0));
        assert!(p.approx_eq(Point2::new(10.0, 1.0), EPSILON), "got {p:?}");
    }

    #[test]
    fn identity_pose_is_noop() {
        let p = Point2::new(3.0, -4.0);
        assert_eq!(Pose::IDENTITY.apply(p), p);
        assert_eq!(Pose::default(), Pose::IDENTITY);
    }

    #[test]
    fn compose_applies_inner_first() {
        let outer = Pose::new(Point2::new(5.0, 5.0), FRAC_PI_2);
        let inner = Pose::new(Point2::new(1.0, 0.0), 0.0);
        let composed = outer.compose(&inner);
        let p = Point2::new(0.0, 1.0);
        let expected = outer.apply(inner.apply(p));
        assert!(composed.apply(p).approx_eq(expected, EPSILON));
        assert!((composed.angle - FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn default_flags_draw_shapes_and_joints_only() {
        let flags = DrawFlags::default();
        assert!(flags.shapes && flags.joints);
        assert!(!flags.aabbs && !flags.center_of_mass && !flags.contact_points && !flags.body_labels);
    }

    #[test]
    fn flags_deserialize_with_defaults() {
        let flags: DrawFlags = serde_json::from_str(r#"{"aabbs": true}"#).unwrap();
        assert!(flags.aabbs);
        assert!(flags.shapes);
    }
}
