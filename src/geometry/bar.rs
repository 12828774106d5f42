use crate::math::{points_equal, Point3, POINT_TOLERANCE};

use super::Segment;

/// Ordered centre-line points of a bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    /// The polygon vertices, in order.
    pub points: Vec<Point3>,
}

impl Polygon {
    /// Creates a polygon from its points.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// First and last point, or `None` when the polygon has fewer than two points.
    #[must_use]
    pub fn endpoints(&self) -> Option<Segment> {
        match self.points.as_slice() {
            [first, .., last] => Some(Segment::new(*first, *last)),
            _ => None,
        }
    }

    fn replace_matching(&mut self, old: &Point3, new: &Point3) -> bool {
        let mut changed = false;
        for p in &mut self.points {
            if points_equal(p, old, POINT_TOLERANCE) {
                *p = *new;
                changed = true;
            }
        }
        changed
    }
}

/// Geometry of a bar object as stored by the host model.
///
/// A single bar carries one polygon; a bar group carries one polygon per
/// member bar. Engine algorithms only see the two-point abstraction
/// exposed by [`endpoints`](Self::endpoints).
#[derive(Debug, Clone, PartialEq)]
pub enum BarGeometry {
    /// A single bar.
    Single(Polygon),
    /// A group of bars sharing one definition.
    Group(Vec<Polygon>),
}

impl BarGeometry {
    /// Convenience constructor for a straight single bar.
    #[must_use]
    pub fn straight(start: Point3, end: Point3) -> Self {
        Self::Single(Polygon::new(vec![start, end]))
    }

    /// The two representative endpoints: first and last point of the first polygon.
    #[must_use]
    pub fn endpoints(&self) -> Option<Segment> {
        match self {
            Self::Single(poly) => poly.endpoints(),
            Self::Group(polys) => polys.first().and_then(Polygon::endpoints),
        }
    }

    /// Moves every point matching `old` (within [`POINT_TOLERANCE`]) to `new`.
    ///
    /// Returns `true` if at least one point was moved.
    pub fn move_endpoint(&mut self, old: &Point3, new: &Point3) -> bool {
        match self {
            Self::Single(poly) => poly.replace_matching(old, new),
            Self::Group(polys) => polys
                .iter_mut()
                .fold(false, |changed, poly| poly.replace_matching(old, new) || changed),
        }
    }

    /// Replaces the geometry with the straight span `start`-`end`.
    ///
    /// A group keeps its member count; every member becomes the span.
    pub fn set_span(&mut self, start: Point3, end: Point3) {
        let span = Polygon::new(vec![start, end]);
        match self {
            Self::Single(poly) => *poly = span,
            Self::Group(polys) => {
                for poly in polys.iter_mut() {
                    *poly = span.clone();
                }
            }
        }
    }
}
