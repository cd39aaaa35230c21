//! Geometric primitives for diagram construction.
//!
//! Catena uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! All coordinates are diagram-local: they are interpreted relative to the
//! SVG viewport the host inserts the built nodes into.

/// A 2D point in diagram-local coordinate space.
///
/// # Examples
///
/// ```
/// # use catena_core::geometry::Point;
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(100.0, 50.0);
///
/// let mid = a.midpoint(b);
/// assert_eq!(mid.x(), 50.0);
/// assert_eq!(mid.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns this vector rotated a quarter turn counter-clockwise on screen,
    /// i.e. `(x, y) -> (-y, x)`.
    ///
    /// The perpendicular has the same length as the input, so scaling it by a
    /// ratio yields a displacement proportional to the original vector.
    ///
    /// ```
    /// # use catena_core::geometry::Point;
    /// let chord = Point::new(10.0, 0.0);
    /// assert_eq!(chord.perpendicular(), Point::new(0.0, 10.0));
    /// ```
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Angle of this vector in radians, as returned by `atan2(y, x)`.
    ///
    /// The zero vector has angle `0`.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Rotates this point by `angle` radians around `pivot`.
    pub fn rotate_around(self, pivot: Point, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let offset = self.sub_point(pivot);
        pivot.add_point(Point::new(
            offset.x * cos - offset.y * sin,
            offset.x * sin + offset.y * cos,
        ))
    }

    /// Returns true when both coordinates are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(10.0, 20.0);
        let p2 = Point::new(5.0, 5.0);

        assert_eq!(p1.add_point(p2), Point::new(15.0, 25.0));
        assert_eq!(p1.sub_point(p2), Point::new(5.0, 15.0));
        assert_eq!(p1.midpoint(p2), Point::new(7.5, 12.5));
        assert_eq!(p1.scale(0.5), Point::new(5.0, 10.0));
    }

    #[test]
    fn test_point_hypot() {
        assert_approx_eq!(f32, Point::new(3.0, 4.0).hypot(), 5.0);
        assert_approx_eq!(f32, Point::default().hypot(), 0.0);
    }

    #[test]
    fn test_perpendicular_preserves_length() {
        let v = Point::new(3.0, -4.0);
        let perp = v.perpendicular();

        assert_approx_eq!(f32, perp.hypot(), v.hypot());
        // Dot product of a vector with its perpendicular is zero
        assert_approx_eq!(f32, v.x() * perp.x() + v.y() * perp.y(), 0.0);
    }

    #[test]
    fn test_angle_of_zero_vector() {
        assert_approx_eq!(f32, Point::default().angle(), 0.0);
        assert_approx_eq!(
            f32,
            Point::new(0.0, 1.0).angle(),
            std::f32::consts::FRAC_PI_2
        );
    }

    #[test]
    fn test_rotate_around() {
        let rotated =
            Point::new(2.0, 1.0).rotate_around(Point::new(1.0, 1.0), std::f32::consts::PI);

        assert_approx_eq!(f32, rotated.x(), 0.0, epsilon = 1e-5);
        assert_approx_eq!(f32, rotated.y(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f32::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f32::INFINITY).is_finite());
    }
}
