//! Headless [`DebugDraw`] implementation that records world-space commands.
//!
//! The recorder is bound to one camera snapshot per frame. Geometry is
//! resolved through the pose stack into world space, so the command list is
//! independent of the camera except for the two primitives that are defined
//! in pixels: point markers (sized with
//! [`world_units_per_pixel`](testbed_camera::camera::CameraState::world_units_per_pixel))
//! and text (placed in element space).

use serde::{Deserialize, Serialize};
use testbed_camera::camera::CameraState;
use testbed_camera::point::Point2;

use super::draw::{Color, DebugDraw, Pose};

/// One recorded primitive.
///
/// Every variant except [`Text`](Self::Text) is in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Closed outline.
    Polygon { vertices: Vec<Point2>, color: Color },
    /// Filled convex polygon with outline.
    SolidPolygon { vertices: Vec<Point2>, color: Color },
    /// Circle outline.
    Circle {
        center: Point2,
        radius: f64,
        color: Color,
    },
    /// Filled circle with a radius line; `axis` is a world-space unit vector.
    SolidCircle {
        center: Point2,
        radius: f64,
        axis: Point2,
        color: Color,
    },
    /// Line segment.
    Segment { a: Point2, b: Point2, color: Color },
    /// Square marker, `size` world units wide.
    Point {
        position: Point2,
        size: f64,
        color: Color,
    },
    /// Text; `position` is the element-space top-left corner in pixels.
    Text {
        position: Point2,
        text: String,
        color: Color,
    },
}

/// Records [`DrawCommand`]s against a camera snapshot.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    camera: CameraState,
    stack: Vec<Pose>,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    /// Start an empty frame against `camera`.
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// The camera snapshot this frame is recorded against.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Swap in a new snapshot for the next frame; recorded commands are kept.
    pub fn set_camera(&mut self, camera: CameraState) {
        self.camera = camera;
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drop all commands and any unbalanced transforms.
    pub fn clear(&mut self) {
        self.commands.clear();
        if !self.stack.is_empty() {
            tracing::warn!(depth = self.stack.len(), "frame ended with pushed transforms");
            self.stack.clear();
        }
    }

    /// Number of transforms currently pushed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn current(&self) -> Pose {
        self.stack.last().copied().unwrap_or(Pose::IDENTITY)
    }

    fn to_world(&self, p: Point2) -> Point2 {
        self.current().apply(p)
    }

    fn to_world_all(&self, vertices: &[Point2]) -> Vec<Point2> {
        let pose = self.current();
        vertices.iter().map(|&v| pose.apply(v)).collect()
    }
}

impl DebugDraw for CommandRecorder {
    fn push_transform(&mut self, pose: Pose) {
        let composed = self.current().compose(&pose);
        self.stack.push(composed);
    }

    fn pop_transform(&mut self) {
        if self.stack.pop().is_none() {
            tracing::warn!("pop_transform without matching push_transform; ignored");
        }
    }

    fn draw_polygon(&mut self, vertices: &[Point2], color: Color) {
        let vertices = self.to_world_all(vertices);
        self.commands.push(DrawCommand::Polygon { vertices, color });
    }

    fn draw_solid_polygon(&mut self, vertices: &[Point2], color: Color) {
        let vertices = self.to_world_all(vertices);
        self.commands.push(DrawCommand::SolidPolygon { vertices, color });
    }

    fn draw_circle(&mut self, center: Point2, radius: f64, color: Color) {
        let center = self.to_world(center);
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_solid_circle(&mut self, center: Point2, radius: f64, axis: Point2, color: Color) {
        let pose = self.current();
        self.commands.push(DrawCommand::SolidCircle {
            center: pose.apply(center),
            radius,
            axis: pose.rotate(axis),
            color,
        });
    }

    fn draw_segment(&mut self, a: Point2, b: Point2, color: Color) {
        let (a, b) = (self.to_world(a), self.to_world(b));
        self.commands.push(DrawCommand::Segment { a, b, color });
    }

    fn draw_point(&mut self, p: Point2, size_px: f64, color: Color) {
        let position = self.to_world(p);
        let size = size_px * self.camera.world_units_per_pixel();
        self.commands.push(DrawCommand::Point {
            position,
            size,
            color,
        });
    }

    fn draw_string(&mut self, x: f64, y: f64, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            position: Point2::new(x, y),
            text: text.to_owned(),
            color,
        });
    }

    fn draw_string_world(&mut self, p: Point2, text: &str, color: Color) {
        let position = self.camera.world_to_element(self.to_world(p));
        self.draw_string(position.x, position.y, text, color);
    }
}
