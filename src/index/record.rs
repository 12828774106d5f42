use std::fmt;

use crate::geometry::Segment;
use crate::math::{midpoint, normalize, points_equal, Point3, Vector3, POINT_TOLERANCE};

slotmap::new_key_type! {
    /// Arena key of an endpoint record.
    pub struct RecordId;
}

/// Opaque identifier of an object in the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub i64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cached endpoints and direction of one tracked bar.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRecord {
    /// The object this record describes.
    pub id: ObjectId,
    /// Start and end point. The order carries no meaning beyond being stable.
    pub endpoints: [Point3; 2],
    /// Unit vector from `endpoints[0]` to `endpoints[1]`; `None` for a
    /// zero-length bar or before directions have been computed.
    pub direction: Option<Vector3>,
}

impl EndpointRecord {
    pub(crate) fn new(id: ObjectId, endpoints: [Point3; 2]) -> Self {
        Self {
            id,
            endpoints,
            direction: None,
        }
    }

    /// The record as a two-point span.
    #[must_use]
    pub fn segment(&self) -> Segment {
        Segment::new(self.endpoints[0], self.endpoints[1])
    }

    /// Midpoint between the two endpoints.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        midpoint(&self.endpoints[0], &self.endpoints[1])
    }

    /// Recomputes the direction; returns `false` when the bar is degenerate.
    pub(crate) fn refresh_direction(&mut self) -> bool {
        let [a, b] = &self.endpoints;
        self.direction = if points_equal(a, b, POINT_TOLERANCE) {
            None
        } else {
            normalize(&(b - a))
        };
        self.direction.is_some()
    }
}
