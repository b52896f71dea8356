//! Planar points and the Euclidean metric.

/// A city location in the plane.
///
/// Points are `Copy` and an engine keeps its point set behind an
/// `Arc<[Point]>`, so once a run starts the coordinates never change.
///
/// # Examples
///
/// ```
/// use tsp_anneal::tsp::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert!((a.distance(&b) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance `sqrt((x1-x2)^2 + (y1-y2)^2)`.
    ///
    /// Symmetric, non-negative and zero iff the points coincide.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns `true` when both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_pythagorean() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Point::new(-2.5, 7.0);
        let b = Point::new(3.25, -1.5);
        assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn test_distance_zero_iff_coincident() {
        let a = Point::new(12.0, 34.0);
        assert_eq!(a.distance(&a), 0.0);
        assert!(a.distance(&Point::new(12.0, 34.000001)) > 0.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(0.0, 1.0).is_finite());
        assert!(!Point::new(f64::NAN, 1.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_from_tuple() {
        let p: Point = (2.0, 3.0).into();
        assert_eq!(p, Point::new(2.0, 3.0));
    }
}
