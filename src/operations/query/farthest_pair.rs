use crate::error::Result;
use crate::geometry::Segment;
use crate::index::{EndpointIndex, ObjectId};
use crate::math::Point3;

/// Finds the two most distant endpoints drawn from a pair of indexed bars.
pub struct FarthestPair {
    first: ObjectId,
    second: ObjectId,
}

impl FarthestPair {
    /// Creates a new `FarthestPair` query.
    #[must_use]
    pub fn new(first: ObjectId, second: ObjectId) -> Self {
        Self { first, second }
    }

    /// Executes the query over the cached endpoints of both objects.
    ///
    /// # Errors
    ///
    /// Returns an error if either object is not indexed.
    pub fn execute(&self, index: &EndpointIndex) -> Result<Option<Segment>> {
        let a = index.record(self.first)?;
        let b = index.record(self.second)?;
        Ok(farthest_pair(&a.endpoints, &b.endpoints))
    }
}

/// Returns the pair of points with maximum mutual distance.
///
/// Cross pairs `a × b` are scanned first, then pairs within `a`, then pairs
/// within `b`; on equal distance the earliest pair scanned is kept. Returns
/// `None` when no pair can be formed.
#[must_use]
pub fn farthest_pair(a: &[Point3], b: &[Point3]) -> Option<Segment> {
    let cross = a.iter().flat_map(|p| b.iter().map(move |q| (p, q)));
    let pairs = cross.chain(inner_pairs(a)).chain(inner_pairs(b));

    let mut best: Option<(f64, Segment)> = None;
    for (p, q) in pairs {
        let distance = (q - p).norm();
        if best.is_none_or(|(d, _)| distance > d) {
            best = Some((distance, Segment::new(*p, *q)));
        }
    }
    best.map(|(_, span)| span)
}

fn inner_pairs(points: &[Point3]) -> impl Iterator<Item = (&Point3, &Point3)> {
    points
        .iter()
        .enumerate()
        .flat_map(move |(i, p)| points[i + 1..].iter().map(move |q| (p, q)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn disjoint_bars_span_outer_endpoints() {
        let span = farthest_pair(
            &[p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)],
            &[p(20.0, 0.0, 0.0), p(30.0, 0.0, 0.0)],
        )
        .unwrap();
        assert_eq!(span, Segment::new(p(0.0, 0.0, 0.0), p(30.0, 0.0, 0.0)));
    }

    #[test]
    fn bar_containing_the_other_keeps_its_own_span() {
        let span = farthest_pair(
            &[p(4.0, 0.0, 0.0), p(6.0, 0.0, 0.0)],
            &[p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)],
        )
        .unwrap();
        assert_eq!(span, Segment::new(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)));
    }

    #[test]
    fn cross_pair_wins_a_tie() {
        // Cross pair (0,0,0)-(10,0,0) and intra-b pair (10,0,0)-(0,0,0) have equal length.
        let span = farthest_pair(&[p(0.0, 0.0, 0.0)], &[p(10.0, 0.0, 0.0), p(0.0, 0.0, 0.0)]).unwrap();
        assert_eq!(span, Segment::new(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)));
    }

    #[test]
    fn coincident_points_still_form_a_pair() {
        let span = farthest_pair(&[p(1.0, 1.0, 1.0)], &[p(1.0, 1.0, 1.0)]).unwrap();
        assert!(span.length() < 1e-12);
    }

    #[test]
    fn empty_lists_have_no_pair() {
        assert!(farthest_pair(&[], &[]).is_none());
    }

    #[test]
    fn query_reads_cached_endpoints() {
        let mut index = EndpointIndex::new();
        index.insert(ObjectId(1), p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0));
        index.insert(ObjectId(2), p(20.0, 0.0, 0.0), p(30.0, 0.0, 0.0));

        let span = FarthestPair::new(ObjectId(1), ObjectId(2))
            .execute(&index)
            .unwrap()
            .unwrap();
        assert!((span.length() - 30.0).abs() < 1e-12);
        assert!(FarthestPair::new(ObjectId(1), ObjectId(9)).execute(&index).is_err());
    }
}
