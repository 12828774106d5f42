use crate::math::{midpoint, normalize, Point3, Vector3};

/// A straight two-point span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
}

impl Segment {
    /// Creates a segment from two points.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Euclidean length of the span.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Midpoint of the span.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        midpoint(&self.start, &self.end)
    }

    /// Unit direction from `start` to `end`, or `None` for a zero-length span.
    #[must_use]
    pub fn direction(&self) -> Option<Vector3> {
        normalize(&(self.end - self.start))
    }
}
