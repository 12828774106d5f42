use tracing::warn;

use crate::geometry::Aabb;
use crate::host::SolidGeometry;
use crate::index::ObjectId;
use crate::math::Point3;

/// Tests a point against a bounding box grown by a tolerance on every side.
pub struct PointInBox {
    point: Point3,
    extent: Aabb,
    tolerance: f64,
}

impl PointInBox {
    /// Creates a new `PointInBox` query.
    #[must_use]
    pub fn new(point: Point3, extent: Aabb, tolerance: f64) -> Self {
        Self {
            point,
            extent,
            tolerance,
        }
    }

    /// Returns `true` if the point is inside or on the expanded box.
    #[must_use]
    pub fn execute(&self) -> bool {
        self.extent.expanded(self.tolerance).contains(&self.point)
    }
}

/// Tests a point against the expanded bounding box of a model part.
pub struct PointInPart {
    point: Point3,
    part: ObjectId,
    tolerance: f64,
}

impl PointInPart {
    /// Creates a new `PointInPart` query.
    #[must_use]
    pub fn new(point: Point3, part: ObjectId, tolerance: f64) -> Self {
        Self {
            point,
            part,
            tolerance,
        }
    }

    /// Executes the query. A part without a bounding box contains nothing.
    pub fn execute<G: SolidGeometry + ?Sized>(&self, solids: &G) -> bool {
        let Some(extent) = solids.bounding_box(self.part) else {
            warn!(part = %self.part, "part has no bounding box");
            return false;
        };
        PointInBox::new(self.point, extent, self.tolerance).execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryModel;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn tolerance_expands_the_box() {
        assert!(PointInBox::new(Point3::new(11.0, 5.0, 5.0), unit_box(), 2.0).execute());
        assert!(!PointInBox::new(Point3::new(13.0, 5.0, 5.0), unit_box(), 2.0).execute());
    }

    #[test]
    fn expanded_boundary_is_inclusive() {
        assert!(PointInBox::new(Point3::new(12.0, -2.0, 5.0), unit_box(), 2.0).execute());
    }

    #[test]
    fn every_axis_must_hold() {
        assert!(!PointInBox::new(Point3::new(5.0, 5.0, -0.5), unit_box(), 0.0).execute());
    }

    #[test]
    fn part_lookup() {
        let mut model = MemoryModel::new();
        let part = model.add_part(unit_box());

        assert!(PointInPart::new(Point3::new(5.0, 5.0, 5.0), part, 0.0).execute(&model));
        assert!(!PointInPart::new(Point3::new(5.0, 5.0, 5.0), ObjectId(77), 0.0).execute(&model));
    }
}
