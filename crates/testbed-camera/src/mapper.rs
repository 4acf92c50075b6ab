//! Conversions between element, viewport, projection and world space.
//!
//! The four spaces form a fixed chain:
//!
//! ```text
//! Element  <->  Viewport  <->  Projection  <->  World
//!  pixels,       origin at      viewport ×       projection
//!  top-left,     centre,        (2·extent/h)     + camera
//!  y down        y up           × zoom           centre
//! ```
//!
//! Each link is a [`StepChain`] built from the camera on demand; the public
//! conversions apply those chains. Composite conversions walk the links in
//! order and never reorder them, because scales and translations do not
//! commute.
//!
//! All conversions take the point by value and return a new one, so a caller
//! may write the result back over its input. [`CameraState::convert_into`]
//! offers the output-parameter form directly.
//!
//! # Example
//!
//! ```
//! use testbed_camera::prelude::*;
//!
//! let cam = CameraState::new(Point2::new(0.0, 20.0), 25.0, 1.0, 1280.0, 800.0).unwrap();
//! assert_eq!(cam.element_to_world(Point2::new(640.0, 400.0)), Point2::new(0.0, 20.0));
//! assert_eq!(cam.element_to_world(Point2::new(1280.0, 0.0)), Point2::new(40.0, 45.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::point::Point2;
use crate::step::{Step, StepChain};

/// One of the four camera coordinate spaces, ordered along the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Space {
    /// Pixel space of the drawing surface: origin top-left, y down.
    Element,
    /// Pixel space re-centred on the surface middle, y up.
    Viewport,
    /// Viewport scaled into world units around the camera.
    Projection,
    /// Simulation space.
    World,
}

impl Space {
    /// All spaces in chain order.
    pub const ALL: [Space; 4] = [Space::Element, Space::Viewport, Space::Projection, Space::World];

    fn rank(self) -> usize {
        self as usize
    }

    fn from_rank(rank: usize) -> Self {
        Self::ALL[rank]
    }
}

// ---------------------------------------------------------------------------
// Step chains for each link
// ---------------------------------------------------------------------------

impl CameraState {
    /// Scale factor from viewport pixels to world units: `(2·extent/height)·zoom`.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        (2.0 * self.extent() / self.height()) * self.zoom()
    }

    /// Element → viewport: recentre on the surface middle, then flip y.
    #[must_use]
    pub fn element_to_viewport_chain(&self) -> StepChain<2> {
        StepChain::new([
            Step::Translate {
                dx: -self.width() / 2.0,
                dy: -self.height() / 2.0,
            },
            Step::FlipY,
        ])
    }

    /// Viewport → projection: uniform scale by `(2·extent/height)·zoom`.
    #[must_use]
    pub fn viewport_to_projection_chain(&self) -> StepChain<1> {
        StepChain::new([Step::Scale(self.world_units_per_pixel())])
    }

    /// Projection → viewport: uniform scale by `(height/(2·extent))·(1/zoom)`.
    #[must_use]
    pub fn projection_to_viewport_chain(&self) -> StepChain<1> {
        StepChain::new([Step::Scale(
            (self.height() / (2.0 * self.extent())) * (1.0 / self.zoom()),
        )])
    }

    /// World → projection: subtract the centre, then undo the roll.
    #[must_use]
    pub fn world_to_projection_chain(&self) -> StepChain<2> {
        StepChain::new([Step::translate(-self.center()), Step::rotation(-self.roll())])
    }

    /// Projection → world: apply the roll, then add the centre.
    #[must_use]
    pub fn projection_to_world_chain(&self) -> StepChain<2> {
        StepChain::new([Step::rotation(self.roll()), Step::translate(self.center())])
    }

    // -----------------------------------------------------------------------
    // Elementary conversions
    // -----------------------------------------------------------------------

    /// Pixel point (origin top-left, y down) to viewport space.
    #[must_use]
    pub fn element_to_viewport(&self, p: Point2) -> Point2 {
        self.element_to_viewport_chain().apply(p)
    }

    /// Viewport point back to pixel space.
    #[must_use]
    pub fn viewport_to_element(&self, p: Point2) -> Point2 {
        self.element_to_viewport_chain().inverse().apply(p)
    }

    /// Viewport point to projection space.
    #[must_use]
    pub fn viewport_to_projection(&self, p: Point2) -> Point2 {
        self.viewport_to_projection_chain().apply(p)
    }

    /// Projection point to viewport space.
    #[must_use]
    pub fn projection_to_viewport(&self, p: Point2) -> Point2 {
        self.projection_to_viewport_chain().apply(p)
    }

    /// World point to projection space.
    #[must_use]
    pub fn world_to_projection(&self, p: Point2) -> Point2 {
        self.world_to_projection_chain().apply(p)
    }

    /// Projection point to world space.
    #[must_use]
    pub fn projection_to_world(&self, p: Point2) -> Point2 {
        self.projection_to_world_chain().apply(p)
    }

    // -----------------------------------------------------------------------
    // Composite conversions
    // -----------------------------------------------------------------------

    /// Pixel point to world space.
    #[must_use]
    pub fn element_to_world(&self, p: Point2) -> Point2 {
        let v = self.element_to_viewport(p);
        let pr = self.viewport_to_projection(v);
        self.projection_to_world(pr)
    }

    /// World point to pixel space.
    #[must_use]
    pub fn world_to_element(&self, p: Point2) -> Point2 {
        let pr = self.world_to_projection(p);
        let v = self.projection_to_viewport(pr);
        self.viewport_to_element(v)
    }

    /// Pixel point to projection space.
    #[must_use]
    pub fn element_to_projection(&self, p: Point2) -> Point2 {
        self.viewport_to_projection(self.element_to_viewport(p))
    }

    /// Alias of [`element_to_world`](Self::element_to_world).
    #[must_use]
    pub fn screen_to_world(&self, p: Point2) -> Point2 {
        self.element_to_world(p)
    }

    /// Alias of [`world_to_element`](Self::world_to_element).
    #[must_use]
    pub fn world_to_screen(&self, p: Point2) -> Point2 {
        self.world_to_element(p)
    }

    /// Convert `p` from any space to any other along the fixed chain.
    #[must_use]
    pub fn convert(&self, from: Space, to: Space, p: Point2) -> Point2 {
        let mut rank = from.rank();
        let target = to.rank();
        let mut out = p;
        while rank < target {
            out = self.step_up(Space::from_rank(rank), out);
            rank += 1;
        }
        while rank > target {
            out = self.step_down(Space::from_rank(rank), out);
            rank -= 1;
        }
        out
    }

    /// Output-parameter form of [`convert`](Self::convert).
    ///
    /// `src` is taken by value before `out` is written, so passing a copy of
    /// the destination's own value converts it in place.
    pub fn convert_into<'a>(
        &self,
        from: Space,
        to: Space,
        src: Point2,
        out: &'a mut Point2,
    ) -> &'a mut Point2 {
        *out = self.convert(from, to, src);
        out
    }

    /// Convert a pixel distance to world units.
    #[must_use]
    pub fn pixels_to_world(&self, pixels: f64) -> f64 {
        pixels * self.world_units_per_pixel()
    }

    /// Convert a world distance to pixels.
    #[must_use]
    pub fn world_to_pixels(&self, distance: f64) -> f64 {
        distance / self.world_units_per_pixel()
    }

    /// World-space box `(min, max)` covering the four viewport corners.
    #[must_use]
    pub fn visible_world_bounds(&self) -> (Point2, Point2) {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(self.width(), 0.0),
            Point2::new(0.0, self.height()),
            Point2::new(self.width(), self.height()),
        ];
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for corner in corners {
            let w = self.element_to_world(corner);
            min = Point2::new(min.x.min(w.x), min.y.min(w.y));
            max = Point2::new(max.x.max(w.x), max.y.max(w.y));
        }
        (min, max)
    }

    fn step_up(&self, from: Space, p: Point2) -> Point2 {
        match from {
            Space::Element => self.element_to_viewport(p),
            Space::Viewport => self.viewport_to_projection(p),
            Space::Projection => self.projection_to_world(p),
            Space::World => p,
        }
    }

    fn step_down(&self, from: Space, p: Point2) -> Point2 {
        match from {
            Space::World => self.world_to_projection(p),
            Space::Projection => self.projection_to_viewport(p),
            Space::Viewport => self.viewport_to_element(p),
            Space::Element => p,
        }
    }
}
