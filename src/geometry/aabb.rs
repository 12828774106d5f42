use crate::math::{midpoint, Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a box from its two corners.
    #[must_use]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Returns the box grown by `tolerance` on every side.
    #[must_use]
    pub fn expanded(&self, tolerance: f64) -> Self {
        let pad = Vector3::repeat(tolerance);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Inclusive inside-or-on-boundary test.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        midpoint(&self.min, &self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_box_grows_every_axis() {
        let b = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0)).expanded(2.0);
        assert_eq!(b.min, Point3::new(-2.0, -2.0, -2.0));
        assert_eq!(b.max, Point3::new(12.0, 12.0, 12.0));
    }

    #[test]
    fn boundary_is_inside() {
        let b = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(b.contains(&Point3::new(1.0, 0.0, 0.5)));
        assert!(!b.contains(&Point3::new(1.0, -0.01, 0.5)));
    }

    #[test]
    fn center_of_box() {
        let b = Aabb::new(Point3::new(-2.0, 0.0, 4.0), Point3::new(2.0, 6.0, 8.0));
        assert_eq!(b.center(), Point3::new(0.0, 3.0, 6.0));
    }
}
