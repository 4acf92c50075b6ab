//! Typed affine steps and fixed-length step chains.
//!
//! Every camera conversion is a short, fixed sequence of elementary steps:
//! a translation, a uniform scale, a vertical flip, or a rotation. Keeping
//! them as data (instead of hand-inlined arithmetic) lets each step be
//! tested and inverted on its own, and lets the reserved camera-roll
//! rotation be switched on without touching the order of the others.
//!
//! Chains are `[Step; N]` arrays, so applying one never allocates.

use crate::point::Point2;

/// One elementary 2D affine step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Leaves the point unchanged. Stands in for a disabled step.
    Identity,
    /// Adds `(dx, dy)`.
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// Multiplies both coordinates by the factor.
    Scale(f64),
    /// Negates the y coordinate.
    FlipY,
    /// Rotates counter-clockwise about the origin by the angle in radians.
    Rotate(f64),
}

impl Step {
    /// Translation by a displacement.
    #[must_use]
    pub fn translate(offset: Point2) -> Self {
        Self::Translate {
            dx: offset.x,
            dy: offset.y,
        }
    }

    /// Rotation by `angle`, collapsing to [`Step::Identity`] when the angle is
    /// exactly zero so that an unrolled camera performs no trigonometry.
    #[must_use]
    pub fn rotation(angle: f64) -> Self {
        if angle == 0.0 {
            Self::Identity
        } else {
            Self::Rotate(angle)
        }
    }

    /// Apply the step to a point.
    #[inline]
    #[must_use]
    pub fn apply(self, p: Point2) -> Point2 {
        match self {
            Self::Identity => p,
            Self::Translate { dx, dy } => Point2::new(p.x + dx, p.y + dy),
            Self::Scale(k) => Point2::new(p.x * k, p.y * k),
            Self::FlipY => Point2::new(p.x, -p.y),
            Self::Rotate(angle) => {
                let (sin, cos) = angle.sin_cos();
                Point2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y)
            }
        }
    }

    /// The step that undoes this one.
    ///
    /// `Scale(0.0)` has no inverse; its "inverse" scales by infinity, which
    /// is why camera values are validated before any conversion runs.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Translate { dx, dy } => Self::Translate { dx: -dx, dy: -dy },
            Self::Scale(k) => Self::Scale(1.0 / k),
            Self::FlipY => Self::FlipY,
            Self::Rotate(angle) => Self::Rotate(-angle),
        }
    }

    /// Whether the step is a no-op.
    #[must_use]
    pub fn is_identity(self) -> bool {
        match self {
            Self::Identity => true,
            Self::Translate { dx, dy } => dx == 0.0 && dy == 0.0,
            Self::Scale(k) => k == 1.0,
            Self::FlipY => false,
            Self::Rotate(angle) => angle == 0.0,
        }
    }
}

/// An ordered, fixed-length sequence of [`Step`]s applied first to last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepChain<const N: usize> {
    steps: [Step; N],
}

impl<const N: usize> StepChain<N> {
    /// Build a chain from steps in application order.
    #[must_use]
    pub const fn new(steps: [Step; N]) -> Self {
        Self { steps }
    }

    /// The steps in application order.
    #[must_use]
    pub fn steps(&self) -> &[Step; N] {
        &self.steps
    }

    /// Apply every step in order.
    #[inline]
    #[must_use]
    pub fn apply(&self, p: Point2) -> Point2 {
        self.steps.iter().fold(p, |acc, step| step.apply(acc))
    }

    /// The chain that undoes this one: steps reversed, each inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut steps = self.steps;
        steps.reverse();
        for step in &mut steps {
            *step = step.inverse();
        }
        Self { steps }
    }

    /// Number of steps that actually change a point.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.steps.iter().filter(|s| !s.is_identity()).count()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn translate_adds_offset() {
        let step = Step::translate(Point2::new(3.0, -2.0));
        assert_eq!(step.apply(Point2::new(1.0, 1.0)), Point2::new(4.0, -1.0));
    }

    #[test]
    fn scale_is_uniform() {
        assert_eq!(Step::Scale(2.5).apply(Point2::new(2.0, -4.0)), Point2::new(5.0, -10.0));
    }

    #[test]
    fn flip_negates_y_only() {
        assert_eq!(Step::FlipY.apply(Point2::new(2.0, 3.0)), Point2::new(2.0, -3.0));
    }

    #[test]
    fn flip_is_an_involution() {
        let p = Point2::new(7.0, -9.5);
        assert_eq!(Step::FlipY.apply(Step::FlipY.apply(p)), p);
        assert_eq!(Step::FlipY.inverse(), Step::FlipY);
    }

    #[test]
    fn quarter_turn_rotates_x_onto_y() {
        let p = Step::Rotate(FRAC_PI_2).apply(Point2::new(1.0, 0.0));
        assert!(p.approx_eq(Point2::new(0.0, 1.0), EPSILON), "got {p:?}");
    }

    #[test]
    fn zero_rotation_collapses_to_identity() {
        assert_eq!(Step::rotation(0.0), Step::Identity);
        assert_eq!(Step::rotation(0.25), Step::Rotate(0.25));
    }

    #[test]
    fn every_step_is_undone_by_its_inverse() {
        let p = Point2::new(12.5, -3.25);
        for step in [
            Step::Identity,
            Step::translate(Point2::new(-4.0, 9.0)),
            Step::Scale(0.125),
            Step::FlipY,
            Step::Rotate(0.7),
        ] {
            let back = step.inverse().apply(step.apply(p));
            assert!(back.approx_eq(p, EPSILON), "{step:?} round trip gave {back:?}");
        }
    }

    #[test]
    fn identity_detection() {
        assert!(Step::Identity.is_identity());
        assert!(Step::translate(Point2::ZERO).is_identity());
        assert!(Step::Scale(1.0).is_identity());
        assert!(!Step::FlipY.is_identity());
        assert!(!Step::Scale(2.0).is_identity());
    }

    #[test]
    fn chain_applies_in_order() {
        // Scale-then-translate differs from translate-then-scale.
        let st = StepChain::new([Step::Scale(2.0), Step::translate(Point2::new(1.0, 0.0))]);
        let ts = StepChain::new([Step::translate(Point2::new(1.0, 0.0)), Step::Scale(2.0)]);
        let p = Point2::new(1.0, 1.0);
        assert_eq!(st.apply(p), Point2::new(3.0, 2.0));
        assert_eq!(ts.apply(p), Point2::new(4.0, 2.0));
    }

    #[test]
    fn chain_inverse_reverses_and_inverts() {
        let chain = StepChain::new([
            Step::translate(Point2::new(-640.0, -400.0)),
            Step::FlipY,
            Step::Scale(0.0625),
        ]);
        let inv = chain.inverse();
        assert_eq!(
            inv.steps(),
            &[
                Step::Scale(16.0),
                Step::FlipY,
                Step::translate(Point2::new(640.0, 400.0)),
            ]
        );
        let p = Point2::new(100.0, 250.0);
        assert_eq!(inv.apply(chain.apply(p)), p);
    }

    #[test]
    fn active_len_skips_identities() {
        let chain = StepChain::new([Step::Identity, Step::FlipY, Step::rotation(0.0)]);
        assert_eq!(chain.active_len(), 1);
    }
}
