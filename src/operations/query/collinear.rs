use crate::error::{GeometryError, Result};
use crate::geometry::Segment;
use crate::math::{normalize, point_line_distance, Point3, Vector3, PARALLEL_TOLERANCE};

/// Classifies bars as collinear with a reference line.
///
/// A candidate is collinear when its direction is parallel to the reference
/// (either orientation, `|ref · dir| >= 1 - PARALLEL_TOLERANCE`) and its
/// midpoint lies within `lateral_tolerance` of the infinite reference line.
#[derive(Debug, Clone)]
pub struct IsCollinear {
    origin: Point3,
    direction: Vector3,
    lateral_tolerance: f64,
}

impl IsCollinear {
    /// Creates a classifier for the line through `origin` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` is zero-length.
    pub fn new(origin: Point3, direction: Vector3, lateral_tolerance: f64) -> Result<Self> {
        let direction = normalize(&direction).ok_or(GeometryError::ZeroVector)?;
        Ok(Self {
            origin,
            direction,
            lateral_tolerance,
        })
    }

    /// Creates a classifier for the line carrying `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if `reference` has zero length.
    pub fn from_reference(reference: &Segment, lateral_tolerance: f64) -> Result<Self> {
        Self::new(reference.start, reference.end - reference.start, lateral_tolerance)
    }

    /// Perpendicular distance from `point` to the reference line.
    #[must_use]
    pub fn lateral_offset(&self, point: &Point3) -> f64 {
        point_line_distance(point, &self.origin, &self.direction)
    }

    /// Returns `true` if `candidate` is parallel to the reference and its
    /// midpoint is within the lateral tolerance. A zero-length candidate is
    /// never collinear.
    #[must_use]
    pub fn execute(&self, candidate: &Segment) -> bool {
        let Some(dir) = candidate.direction() else {
            return false;
        };
        if self.direction.dot(&dir).abs() < 1.0 - PARALLEL_TOLERANCE {
            return false;
        }
        self.lateral_offset(&candidate.midpoint()) <= self.lateral_tolerance
    }
}
