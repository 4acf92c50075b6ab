//! Plain 2D point shared by every coordinate space.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point (or displacement) in one of the camera coordinate spaces.
///
/// The type carries no space tag: which space a value lives in is decided by
/// the conversion that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Compare with a mixed absolute/relative tolerance.
    ///
    /// Each coordinate passes when `|a - b| <= tol * max(1, |a|, |b|)`.
    #[must_use]
    pub fn approx_eq(self, other: Self, tol: f64) -> bool {
        fn close(a: f64, b: f64, tol: f64) -> bool {
            (a - b).abs() <= tol * 1.0_f64.max(a.abs()).max(b.abs())
        }
        close(self.x, other.x, tol) && close(self.y, other.y, tol)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for (f64, f64) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl Neg for Point2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(0.5, -4.0);
        assert_eq!(a + b, Point2::new(1.5, -2.0));
        assert_eq!(a - b, Point2::new(0.5, 6.0));
        assert_eq!(a * 2.0, Point2::new(2.0, 4.0));
        assert_eq!(-a, Point2::new(-1.0, -2.0));
    }

    #[test]
    fn assign_operators() {
        let mut p = Point2::new(1.0, 1.0);
        p += Point2::new(2.0, 3.0);
        assert_eq!(p, Point2::new(3.0, 4.0));
        p -= Point2::new(3.0, 4.0);
        assert_eq!(p, Point2::ZERO);
    }

    #[test]
    fn length_of_3_4_is_5() {
        assert_eq!(Point2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn approx_eq_scales_with_magnitude() {
        let a = Point2::new(1.0e9, 0.0);
        let b = Point2::new(1.0e9 + 0.5, 0.0);
        assert!(a.approx_eq(b, 1e-9));
        assert!(!Point2::new(0.0, 0.0).approx_eq(Point2::new(0.5, 0.0), 1e-9));
    }

    #[test]
    fn tuple_conversions() {
        let p: Point2 = (2.0, -1.0).into();
        assert_eq!(p, Point2::new(2.0, -1.0));
        let t: (f64, f64) = p.into();
        assert_eq!(t, (2.0, -1.0));
    }

    #[test]
    fn non_finite_detected() {
        assert!(Point2::new(1.0, 2.0).is_finite());
        assert!(!Point2::new(f64::NAN, 2.0).is_finite());
        assert!(!Point2::new(1.0, f64::INFINITY).is_finite());
    }
}
