//! CPU-side tessellation of [`DrawCommand`]s into GPU vertices.
//!
//! World-space commands are mapped to pixels with the camera's
//! `world_to_element`, and pixels to clip space through
//! `element_to_viewport` scaled by `2/width`, `2/height`. Doing the camera
//! work here keeps the shader a passthrough and lets tests check exactly
//! where things land on screen without a GPU.

use std::f64::consts::TAU;

use testbed_camera::camera::CameraState;
use testbed_camera::point::Point2;

use super::draw::Color;
use super::recorder::DrawCommand;
use super::text;

/// Segments used to approximate a circle.
pub const CIRCLE_SEGMENTS: usize = 24;

/// Size of one glyph cell of HUD text, in pixels.
pub const TEXT_CELL_PX: f64 = 2.0;

/// A single vertex with clip-space position and RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "renderer",
    derive(bytemuck_derive::Pod, bytemuck_derive::Zeroable)
)]
pub struct Vertex {
    /// Clip-space position, `[-1, 1]` on both axes, y up.
    pub position: [f32; 2],
    /// RGBA color.
    pub color: [f32; 4],
}

/// Vertices for one frame, split by primitive topology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameGeometry {
    /// Triangle list: fills, point markers, text cells.
    pub triangles: Vec<Vertex>,
    /// Line list: outlines and segments.
    pub lines: Vec<Vertex>,
}

impl FrameGeometry {
    /// Whether nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty()
    }
}

/// Tessellate a frame's commands against `camera`.
pub fn build_frame(commands: &[DrawCommand], camera: &CameraState) -> FrameGeometry {
    let mut builder = Builder {
        camera,
        frame: FrameGeometry::default(),
    };
    for command in commands {
        builder.command(command);
    }
    builder.frame
}

/// Map an element-space pixel to clip space.
pub fn element_to_clip(camera: &CameraState, p: Point2) -> [f32; 2] {
    let v = camera.element_to_viewport(p);
    [
        (v.x / (camera.width() / 2.0)) as f32,
        (v.y / (camera.height() / 2.0)) as f32,
    ]
}

/// Map a world-space point to clip space.
pub fn world_to_clip(camera: &CameraState, p: Point2) -> [f32; 2] {
    element_to_clip(camera, camera.world_to_element(p))
}

struct Builder<'a> {
    camera: &'a CameraState,
    frame: FrameGeometry,
}

impl Builder<'_> {
    fn command(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Polygon { vertices, color } => self.outline(vertices, *color),
            DrawCommand::SolidPolygon { vertices, color } => {
                self.fan(vertices, color.fill());
                self.outline(vertices, *color);
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                let ring = circle_points(*center, *radius);
                self.outline(&ring, *color);
            }
            DrawCommand::SolidCircle {
                center,
                radius,
                axis,
                color,
            } => {
                let ring = circle_points(*center, *radius);
                self.fan(&ring, color.fill());
                self.outline(&ring, *color);
                self.line(*center, *center + *axis * *radius, *color);
            }
            DrawCommand::Segment { a, b, color } => self.line(*a, *b, *color),
            DrawCommand::Point {
                position,
                size,
                color,
            } => {
                let h = size / 2.0;
                let corners = [
                    *position + Point2::new(-h, -h),
                    *position + Point2::new(h, -h),
                    *position + Point2::new(h, h),
                    *position + Point2::new(-h, h),
                ];
                let clip = corners.map(|c| world_to_clip(self.camera, c));
                self.quad(clip, *color);
            }
            DrawCommand::Text {
                position,
                text,
                color,
            } => {
                for cell in text::lit_cells(text, *position, TEXT_CELL_PX) {
                    let corners = [
                        cell,
                        cell + Point2::new(TEXT_CELL_PX, 0.0),
                        cell + Point2::new(TEXT_CELL_PX, TEXT_CELL_PX),
                        cell + Point2::new(0.0, TEXT_CELL_PX),
                    ];
                    let clip = corners.map(|c| element_to_clip(self.camera, c));
                    self.quad(clip, *color);
                }
            }
        }
    }

    fn line(&mut self, a: Point2, b: Point2, color: Color) {
        let color = color.to_array();
        self.frame.lines.push(Vertex {
            position: world_to_clip(self.camera, a),
            color,
        });
        self.frame.lines.push(Vertex {
            position: world_to_clip(self.camera, b),
            color,
        });
    }

    /// Closed loop through `vertices`.
    fn outline(&mut self, vertices: &[Point2], color: Color) {
        match vertices {
            [] | [_] => {}
            [a, b] => self.line(*a, *b, color),
            _ => {
                for (i, &a) in vertices.iter().enumerate() {
                    let b = vertices[(i + 1) % vertices.len()];
                    self.line(a, b, color);
                }
            }
        }
    }

    /// Triangle fan around the first vertex; assumes a convex polygon.
    fn fan(&mut self, vertices: &[Point2], color: Color) {
        let Some((&first, rest)) = vertices.split_first() else {
            return;
        };
        let color = color.to_array();
        let origin = world_to_clip(self.camera, first);
        for pair in rest.windows(2) {
            for p in [origin, world_to_clip(self.camera, pair[0]), world_to_clip(self.camera, pair[1])] {
                self.frame.triangles.push(Vertex { position: p, color });
            }
        }
    }

    /// Two triangles from four clip-space corners in order.
    fn quad(&mut self, [a, b, c, d]: [[f32; 2]; 4], color: Color) {
        let color = color.to_array();
        for position in [a, b, c, a, c, d] {
            self.frame.triangles.push(Vertex { position, color });
        }
    }
}

fn circle_points(center: Point2, radius: f64) -> Vec<Point2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            let (sin, cos) = angle.sin_cos();
            center + Point2::new(cos, sin) * radius
        })
        .collect()
}
